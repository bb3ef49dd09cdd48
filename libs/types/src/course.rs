//! Course outline types
//!
//! A course is static reference data: an ordered list of modules, each an
//! ordered list of lessons. Progress is tracked elsewhere, by lesson key.

use crate::errors::OutlineError;
use crate::ids::{CourseId, LessonKey};
use serde::{Deserialize, Serialize};

/// Training discipline a course belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Fitness,
    Karate,
    Forex,
}

/// A single lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    /// Display label, e.g. "12 min"
    pub duration: String,
    pub content: String,
}

impl Lesson {
    pub fn new(
        title: impl Into<String>,
        duration: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            duration: duration.into(),
            content: content.into(),
        }
    }
}

/// Ordered group of lessons inside a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    pub title: String,
    pub lessons: Vec<Lesson>,
}

impl CourseModule {
    pub fn new(title: impl Into<String>, lessons: Vec<Lesson>) -> Self {
        Self {
            title: title.into(),
            lessons,
        }
    }
}

/// Course outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub discipline: Discipline,
    pub modules: Vec<CourseModule>,
}

impl Course {
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        discipline: Discipline,
        modules: Vec<CourseModule>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            discipline,
            modules,
        }
    }

    /// Total number of lessons across all modules
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    pub fn module(&self, module_index: usize) -> Option<&CourseModule> {
        self.modules.get(module_index)
    }

    pub fn lesson(&self, module_index: usize, lesson_index: usize) -> Option<&Lesson> {
        self.module(module_index)
            .and_then(|m| m.lessons.get(lesson_index))
    }

    /// Key addressing the lesson at the given position in this course
    pub fn lesson_key(&self, module_index: usize, lesson_index: usize) -> LessonKey {
        LessonKey::new(self.id.clone(), module_index, lesson_index)
    }

    /// Iterate `(module_index, lesson_index, lesson)` in outline order
    pub fn lessons(&self) -> impl Iterator<Item = (usize, usize, &Lesson)> + '_ {
        self.modules.iter().enumerate().flat_map(|(m, module)| {
            module
                .lessons
                .iter()
                .enumerate()
                .map(move |(l, lesson)| (m, l, lesson))
        })
    }

    /// Check the outline is well formed.
    ///
    /// Rejects an empty id, empty titles and modules without lessons.
    pub fn validate(&self) -> Result<(), OutlineError> {
        if self.id.is_empty() {
            return Err(OutlineError::EmptyCourseId);
        }
        let course_id = self.id.to_string();
        if self.title.trim().is_empty() {
            return Err(OutlineError::EmptyTitle {
                course_id,
                location: "course".to_string(),
            });
        }
        for (m, module) in self.modules.iter().enumerate() {
            if module.title.trim().is_empty() {
                return Err(OutlineError::EmptyTitle {
                    course_id,
                    location: format!("module {}", m),
                });
            }
            if module.lessons.is_empty() {
                return Err(OutlineError::EmptyModule {
                    course_id,
                    module_index: m,
                });
            }
            for (l, lesson) in module.lessons.iter().enumerate() {
                if lesson.title.trim().is_empty() {
                    return Err(OutlineError::EmptyTitle {
                        course_id,
                        location: format!("module {} lesson {}", m, l),
                    });
                }
            }
        }
        Ok(())
    }
}
