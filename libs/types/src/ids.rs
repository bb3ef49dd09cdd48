//! Identifier types for portal entities
//!
//! Lessons have no identity of their own: they are addressed by their
//! position inside a course outline, see [`LessonKey`].

use crate::errors::ProgressError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Course identifier (slug, e.g. "forex-fundamentals")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Composite key of a lesson: (course id, module index, lesson index)
///
/// Canonical string form is `"{course_id}-{module_index}-{lesson_index}"`,
/// which is also the serialized form. Course ids may contain hyphens; the
/// two trailing components are always the indices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonKey {
    pub course_id: CourseId,
    pub module_index: usize,
    pub lesson_index: usize,
}

impl LessonKey {
    pub fn new(course_id: CourseId, module_index: usize, lesson_index: usize) -> Self {
        Self {
            course_id,
            module_index,
            lesson_index,
        }
    }

    /// Position of the lesson inside its course outline
    pub fn position(&self) -> (usize, usize) {
        (self.module_index, self.lesson_index)
    }
}

impl fmt::Display for LessonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.course_id, self.module_index, self.lesson_index
        )
    }
}

impl FromStr for LessonKey {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ProgressError::InvalidLessonKey(s.to_string());

        let mut parts = s.rsplitn(3, '-');
        let lesson_index = parts
            .next()
            .and_then(parse_index)
            .ok_or_else(invalid)?;
        let module_index = parts
            .next()
            .and_then(parse_index)
            .ok_or_else(invalid)?;
        let course_id = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;

        Ok(Self::new(CourseId::new(course_id), module_index, lesson_index))
    }
}

/// Index in canonical decimal form only: no sign, no leading zeros.
fn parse_index(part: &str) -> Option<usize> {
    let canonical = !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'));
    if !canonical {
        return None;
    }
    part.parse().ok()
}

impl TryFrom<String> for LessonKey {
    type Error = ProgressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LessonKey> for String {
    fn from(key: LessonKey) -> Self {
        key.to_string()
    }
}
