//! Course catalog — static outline reference data
//!
//! Loaded once at startup, either from the embedded default catalog or from
//! a JSON file (an array of courses). Every course is validated before it is
//! accepted and ids must be unique.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;
use types::course::{Course, Discipline};
use types::errors::OutlineError;
use types::ids::CourseId;

/// Default catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Validated courses keyed by id (sorted).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseCatalog {
    courses: BTreeMap<CourseId, Course>,
}

impl CourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog embedded in the binary.
    pub fn builtin() -> Result<Self, OutlineError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a JSON array of courses.
    pub fn from_json(json: &str) -> Result<Self, OutlineError> {
        let courses: Vec<Course> =
            serde_json::from_str(json).map_err(|e| OutlineError::Parse(e.to_string()))?;

        let mut catalog = Self::new();
        for course in courses {
            catalog.insert(course)?;
        }
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OutlineError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| OutlineError::Io(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            courses = catalog.len(),
            "Loaded course catalog"
        );
        Ok(catalog)
    }

    /// Add a course after validating its outline.
    pub fn insert(&mut self, course: Course) -> Result<(), OutlineError> {
        course.validate()?;
        if self.courses.contains_key(&course.id) {
            return Err(OutlineError::DuplicateCourse {
                course_id: course.id.to_string(),
            });
        }
        self.courses.insert(course.id.clone(), course);
        Ok(())
    }

    pub fn get(&self, id: &CourseId) -> Result<&Course, OutlineError> {
        self.courses
            .get(id)
            .ok_or_else(|| OutlineError::CourseNotFound {
                course_id: id.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// All courses, sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = &Course> + '_ {
        self.courses.values()
    }

    pub fn by_discipline(&self, discipline: Discipline) -> impl Iterator<Item = &Course> + '_ {
        self.iter().filter(move |c| c.discipline == discipline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::course::{CourseModule, Lesson};

    fn one_lesson_course(id: &str) -> Course {
        Course::new(
            CourseId::new(id),
            "Course",
            Discipline::Fitness,
            vec![CourseModule::new(
                "Module",
                vec![Lesson::new("Lesson", "1 min", "")],
            )],
        )
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = CourseCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 3);
        for discipline in [Discipline::Fitness, Discipline::Karate, Discipline::Forex] {
            assert_eq!(catalog.by_discipline(discipline).count(), 1);
        }
    }

    #[test]
    fn test_builtin_forex_course() {
        let catalog = CourseCatalog::builtin().unwrap();
        let course = catalog.get(&CourseId::new("forex-fundamentals")).unwrap();
        assert_eq!(course.modules.len(), 2);
        assert_eq!(course.lesson_count(), 6);
    }

    #[test]
    fn test_iter_sorted_by_id() {
        let catalog = CourseCatalog::builtin().unwrap();
        let ids: Vec<&str> = catalog.iter().map(|c| c.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_get_missing() {
        let catalog = CourseCatalog::new();
        assert_eq!(
            catalog.get(&CourseId::new("nope")),
            Err(OutlineError::CourseNotFound {
                course_id: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_insert_duplicate() {
        let mut catalog = CourseCatalog::new();
        catalog.insert(one_lesson_course("a")).unwrap();
        assert_eq!(
            catalog.insert(one_lesson_course("a")),
            Err(OutlineError::DuplicateCourse {
                course_id: "a".to_string()
            })
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_insert_rejects_invalid_outline() {
        let mut catalog = CourseCatalog::new();
        let mut course = one_lesson_course("a");
        course.modules[0].lessons.clear();
        assert!(matches!(
            catalog.insert(course),
            Err(OutlineError::EmptyModule { .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            CourseCatalog::from_json("{not json"),
            Err(OutlineError::Parse(_))
        ));
    }

    #[test]
    fn test_from_path_missing_file() {
        assert!(matches!(
            CourseCatalog::from_path("/definitely/not/here.json"),
            Err(OutlineError::Io(_))
        ));
    }
}
