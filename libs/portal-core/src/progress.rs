//! Course Progress Gate — sequential lesson unlocking
//!
//! Lessons unlock strictly in outline order: a lesson is open once its
//! immediate predecessor is completed. The predecessor of the first lesson of
//! a module is the last lesson of the previous module. Lesson (0, 0) is
//! always open.
//!
//! The completed set is owned by the caller and passed into every call; this
//! module holds no state of its own. `mark_complete` is the only mutator and
//! only ever grows the set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;
use types::course::Course;
use types::errors::ProgressError;
use types::ids::LessonKey;

// ---------------------------------------------------------------------------
// Completed set
// ---------------------------------------------------------------------------

/// Set of completed lesson keys, owned by the caller.
///
/// Sorted (`BTreeSet`) so serialization and iteration are deterministic.
/// Serializes as a plain array of key strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedLessons(BTreeSet<LessonKey>);

impl CompletedLessons {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, key: &LessonKey) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LessonKey> + '_ {
        self.0.iter()
    }
}

impl FromIterator<LessonKey> for CompletedLessons {
    fn from_iter<I: IntoIterator<Item = LessonKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// State of a single lesson.
///
/// `Completed` implies the lesson was unlocked when it was marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Locked,
    Unlocked,
    Completed,
}

/// Status of one lesson at its outline position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonState {
    pub key: LessonKey,
    pub status: LessonStatus,
}

/// Completion counters for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    /// completed / total × 100, unrounded; 0 for an empty course
    pub percent: Decimal,
}

impl ProgressSummary {
    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Completion percentage of `course`.
///
/// Only keys addressing lessons of this course count. Returns 0 when the
/// course has no lessons.
pub fn calculate_progress(course: &Course, completed: &CompletedLessons) -> Decimal {
    progress_summary(course, completed).percent
}

/// Completed/total counters and percentage.
pub fn progress_summary(course: &Course, completed: &CompletedLessons) -> ProgressSummary {
    let total = course.lesson_count();
    let done = course
        .lessons()
        .filter(|(m, l, _)| completed.contains(&course.lesson_key(*m, *l)))
        .count();

    let percent = if total == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(done as u64) * Decimal::ONE_HUNDRED / Decimal::from(total as u64)
    };

    ProgressSummary {
        completed: done,
        total,
        percent,
    }
}

/// True once every lesson of a non-empty course is completed.
pub fn is_finished(course: &Course, completed: &CompletedLessons) -> bool {
    progress_summary(course, completed).is_finished()
}

/// Whether the lesson at `(module_index, lesson_index)` may be opened.
///
/// Fails with `ModuleOutOfRange` / `LessonOutOfRange` for positions outside
/// the outline.
pub fn is_lesson_unlocked(
    course: &Course,
    completed: &CompletedLessons,
    module_index: usize,
    lesson_index: usize,
) -> Result<bool, ProgressError> {
    check_bounds(course, module_index, lesson_index)?;
    Ok(unlocked_unchecked(course, completed, module_index, lesson_index))
}

/// Locked, unlocked or completed.
pub fn lesson_status(
    course: &Course,
    completed: &CompletedLessons,
    module_index: usize,
    lesson_index: usize,
) -> Result<LessonStatus, ProgressError> {
    check_bounds(course, module_index, lesson_index)?;
    Ok(status_unchecked(course, completed, module_index, lesson_index))
}

/// Status of every lesson, in outline order.
pub fn lesson_states(course: &Course, completed: &CompletedLessons) -> Vec<LessonState> {
    course
        .lessons()
        .map(|(m, l, _)| LessonState {
            key: course.lesson_key(m, l),
            status: status_unchecked(course, completed, m, l),
        })
        .collect()
}

/// First lesson that is unlocked but not yet completed.
///
/// `None` when the course is finished or empty.
pub fn next_lesson(course: &Course, completed: &CompletedLessons) -> Option<LessonKey> {
    course
        .lessons()
        .find(|(m, l, _)| status_unchecked(course, completed, *m, *l) == LessonStatus::Unlocked)
        .map(|(m, l, _)| course.lesson_key(m, l))
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

/// Add the lesson to the completed set.
///
/// Returns `Ok(true)` when the key was inserted and `Ok(false)` when it was
/// already present (idempotent). A locked lesson cannot be completed.
pub fn mark_complete(
    course: &Course,
    completed: &mut CompletedLessons,
    module_index: usize,
    lesson_index: usize,
) -> Result<bool, ProgressError> {
    check_bounds(course, module_index, lesson_index)?;

    let key = course.lesson_key(module_index, lesson_index);
    if completed.contains(&key) {
        return Ok(false);
    }
    if !unlocked_unchecked(course, completed, module_index, lesson_index) {
        return Err(ProgressError::LessonLocked {
            key: key.to_string(),
        });
    }

    debug!(lesson = %key, "Lesson marked complete");
    completed.0.insert(key);
    Ok(true)
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

fn check_bounds(
    course: &Course,
    module_index: usize,
    lesson_index: usize,
) -> Result<(), ProgressError> {
    let module = course
        .module(module_index)
        .ok_or_else(|| ProgressError::ModuleOutOfRange {
            course_id: course.id.to_string(),
            module_index,
            module_count: course.modules.len(),
        })?;

    if lesson_index >= module.lessons.len() {
        return Err(ProgressError::LessonOutOfRange {
            course_id: course.id.to_string(),
            module_index,
            lesson_index,
            lesson_count: module.lessons.len(),
        });
    }
    Ok(())
}

/// Position of the lesson that must be completed before this one.
///
/// Modules without lessons are skipped when crossing a module boundary, so
/// in an outline shaped `[0, 2]` lesson `(1, 0)` starts unlocked. The plain
/// "last lesson of module m-1" rule would instead name a lesson that does not
/// exist and lock everything after an empty module for good. Catalog outlines
/// reject empty modules, so only hand-built courses reach this branch.
/// `None` means the lesson is the first of the course.
fn predecessor(course: &Course, module_index: usize, lesson_index: usize) -> Option<(usize, usize)> {
    if lesson_index > 0 {
        return Some((module_index, lesson_index - 1));
    }
    course.modules[..module_index]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, module)| !module.lessons.is_empty())
        .map(|(m, module)| (m, module.lessons.len() - 1))
}

fn unlocked_unchecked(
    course: &Course,
    completed: &CompletedLessons,
    module_index: usize,
    lesson_index: usize,
) -> bool {
    match predecessor(course, module_index, lesson_index) {
        None => true,
        Some((m, l)) => completed.contains(&course.lesson_key(m, l)),
    }
}

fn status_unchecked(
    course: &Course,
    completed: &CompletedLessons,
    module_index: usize,
    lesson_index: usize,
) -> LessonStatus {
    if completed.contains(&course.lesson_key(module_index, lesson_index)) {
        LessonStatus::Completed
    } else if unlocked_unchecked(course, completed, module_index, lesson_index) {
        LessonStatus::Unlocked
    } else {
        LessonStatus::Locked
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use types::course::{CourseModule, Discipline, Lesson};
    use types::ids::CourseId;

    fn course_with_shape(shape: &[usize]) -> Course {
        let modules = shape
            .iter()
            .enumerate()
            .map(|(m, &count)| {
                let lessons = (0..count)
                    .map(|l| Lesson::new(format!("Lesson {}.{}", m, l), "5 min", "..."))
                    .collect();
                CourseModule::new(format!("Module {}", m), lessons)
            })
            .collect();
        Course::new(CourseId::new("fx101"), "Forex 101", Discipline::Forex, modules)
    }

    fn key(m: usize, l: usize) -> LessonKey {
        LessonKey::new(CourseId::new("fx101"), m, l)
    }

    #[test]
    fn test_progress_empty_course() {
        let course = course_with_shape(&[]);
        assert_eq!(calculate_progress(&course, &CompletedLessons::new()), Decimal::ZERO);
        assert!(!is_finished(&course, &CompletedLessons::new()));
        assert_eq!(next_lesson(&course, &CompletedLessons::new()), None);
    }

    #[test]
    fn test_progress_counts_only_this_course() {
        let course = course_with_shape(&[2, 2]);
        let completed: CompletedLessons = vec![
            key(0, 0),
            LessonKey::new(CourseId::new("karate-basics"), 0, 1),
            // outside the outline of fx101
            key(7, 7),
        ]
        .into_iter()
        .collect();

        let summary = progress_summary(&course, &completed);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.percent, Decimal::from(25));
    }

    #[test]
    fn test_progress_fraction() {
        let course = course_with_shape(&[3]);
        let completed: CompletedLessons = vec![key(0, 0)].into_iter().collect();
        let pct = calculate_progress(&course, &completed);
        assert!(pct > Decimal::from(33) && pct < Decimal::from(34));
    }

    #[test]
    fn test_first_lesson_always_unlocked() {
        let course = course_with_shape(&[2, 3]);
        assert!(is_lesson_unlocked(&course, &CompletedLessons::new(), 0, 0).unwrap());
    }

    #[test]
    fn test_locked_without_predecessor() {
        let course = course_with_shape(&[2, 3]);
        let empty = CompletedLessons::new();
        assert!(!is_lesson_unlocked(&course, &empty, 0, 1).unwrap());
        assert!(!is_lesson_unlocked(&course, &empty, 1, 0).unwrap());
        assert!(!is_lesson_unlocked(&course, &empty, 1, 2).unwrap());
    }

    #[test]
    fn test_cross_module_unlock_uses_last_lesson() {
        let course = course_with_shape(&[2, 3]);
        // Completing (0, 0) alone must not open module 1
        let partial: CompletedLessons = vec![key(0, 0)].into_iter().collect();
        assert!(!is_lesson_unlocked(&course, &partial, 1, 0).unwrap());

        let full: CompletedLessons = vec![key(0, 0), key(0, 1)].into_iter().collect();
        assert!(is_lesson_unlocked(&course, &full, 1, 0).unwrap());
    }

    #[test]
    fn test_empty_module_is_skipped() {
        let course = course_with_shape(&[1, 0, 2]);
        let completed: CompletedLessons = vec![key(0, 0)].into_iter().collect();
        assert!(is_lesson_unlocked(&course, &completed, 2, 0).unwrap());
    }

    #[test]
    fn test_leading_empty_module() {
        let course = course_with_shape(&[0, 2]);
        assert!(is_lesson_unlocked(&course, &CompletedLessons::new(), 1, 0).unwrap());
    }

    #[test]
    fn test_out_of_range() {
        let course = course_with_shape(&[2, 3]);
        let empty = CompletedLessons::new();
        assert_eq!(
            is_lesson_unlocked(&course, &empty, 2, 0),
            Err(ProgressError::ModuleOutOfRange {
                course_id: "fx101".to_string(),
                module_index: 2,
                module_count: 2,
            })
        );
        assert_eq!(
            is_lesson_unlocked(&course, &empty, 0, 2),
            Err(ProgressError::LessonOutOfRange {
                course_id: "fx101".to_string(),
                module_index: 0,
                lesson_index: 2,
                lesson_count: 2,
            })
        );
    }

    #[test]
    fn test_mark_complete_idempotent() {
        let course = course_with_shape(&[2]);
        let mut completed = CompletedLessons::new();

        assert_eq!(mark_complete(&course, &mut completed, 0, 0), Ok(true));
        let once = completed.clone();
        assert_eq!(mark_complete(&course, &mut completed, 0, 0), Ok(false));
        assert_eq!(completed, once);
        assert_eq!(completed.len(), 1);
    }

    #[test]
    fn test_mark_complete_locked_lesson() {
        let course = course_with_shape(&[2]);
        let mut completed = CompletedLessons::new();
        assert_eq!(
            mark_complete(&course, &mut completed, 0, 1),
            Err(ProgressError::LessonLocked {
                key: "fx101-0-1".to_string()
            })
        );
        assert!(completed.is_empty());
    }

    #[test]
    fn test_mark_complete_out_of_range() {
        let course = course_with_shape(&[2]);
        let mut completed = CompletedLessons::new();
        assert!(matches!(
            mark_complete(&course, &mut completed, 0, 9),
            Err(ProgressError::LessonOutOfRange { .. })
        ));
    }

    #[test]
    fn test_lesson_status_and_next() {
        let course = course_with_shape(&[2, 1]);
        let completed: CompletedLessons = vec![key(0, 0)].into_iter().collect();

        assert_eq!(lesson_status(&course, &completed, 0, 0), Ok(LessonStatus::Completed));
        assert_eq!(lesson_status(&course, &completed, 0, 1), Ok(LessonStatus::Unlocked));
        assert_eq!(lesson_status(&course, &completed, 1, 0), Ok(LessonStatus::Locked));
        assert_eq!(next_lesson(&course, &completed), Some(key(0, 1)));

        let states = lesson_states(&course, &completed);
        let statuses: Vec<LessonStatus> = states.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![LessonStatus::Completed, LessonStatus::Unlocked, LessonStatus::Locked]
        );
        assert_eq!(states[2].key, key(1, 0));
    }

    #[test]
    fn test_completed_serializes_as_key_strings() {
        let completed: CompletedLessons = vec![key(0, 1), key(0, 0)].into_iter().collect();
        let json = serde_json::to_string(&completed).unwrap();
        assert_eq!(json, r#"["fx101-0-0","fx101-0-1"]"#);

        let restored: CompletedLessons = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, completed);
    }
}
