//! Error types for the portal core
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Top-level portal error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortalError {
    #[error("Calculator error: {0}")]
    Calculator(#[from] CalculatorError),

    #[error("Progress error: {0}")]
    Progress(#[from] ProgressError),

    #[error("Outline error: {0}")]
    Outline(#[from] OutlineError),
}

/// Risk calculator errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    /// Entry equals stop-loss: the trade carries no risk distance.
    #[error("Degenerate trade: stop-loss equals entry price {entry}")]
    DegenerateTrade { entry: String },

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),

    #[error("Invalid balance: {0}")]
    InvalidBalance(String),

    #[error("Invalid lot size: {0}")]
    InvalidLotSize(String),

    #[error("Invalid pip convention: {0}")]
    InvalidPipConvention(String),

    /// Result does not fit the decimal range.
    #[error("Arithmetic overflow computing {0}")]
    Overflow(String),
}

/// Course progress errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgressError {
    #[error("Module index {module_index} out of range for course {course_id} ({module_count} modules)")]
    ModuleOutOfRange {
        course_id: String,
        module_index: usize,
        module_count: usize,
    },

    #[error("Lesson index {lesson_index} out of range for module {module_index} of course {course_id} ({lesson_count} lessons)")]
    LessonOutOfRange {
        course_id: String,
        module_index: usize,
        lesson_index: usize,
        lesson_count: usize,
    },

    #[error("Lesson {key} is locked")]
    LessonLocked { key: String },

    #[error("Invalid lesson key: {0}")]
    InvalidLessonKey(String),
}

/// Course outline errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutlineError {
    #[error("Course id must not be empty")]
    EmptyCourseId,

    #[error("Empty title in course {course_id}: {location}")]
    EmptyTitle { course_id: String, location: String },

    #[error("Module {module_index} of course {course_id} has no lessons")]
    EmptyModule { course_id: String, module_index: usize },

    #[error("Duplicate course: {course_id}")]
    DuplicateCourse { course_id: String },

    #[error("Course not found: {course_id}")]
    CourseNotFound { course_id: String },

    #[error("Outline parse error: {0}")]
    Parse(String),

    #[error("Outline I/O error: {0}")]
    Io(String),
}
