use portal_core::calculator::{PipConvention, TradeMetrics};
use portal_core::progress::{CompletedLessons, LessonStatus, ProgressSummary};
use serde::{Deserialize, Serialize};
use types::course::{Course, Discipline};
use types::errors::ProgressError;
use types::ids::{CourseId, LessonKey};

/// Parse client-held key strings into a completed set.
fn parse_completed(keys: &[String]) -> Result<CompletedLessons, ProgressError> {
    keys.iter().map(|key| key.parse::<LessonKey>()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateResponse {
    /// Rounded to 2 decimals for display
    pub metrics: TradeMetrics,
    pub convention: PipConvention,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCoursesQuery {
    pub discipline: Option<Discipline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: CourseId,
    pub title: String,
    pub discipline: Discipline,
    pub module_count: usize,
    pub lesson_count: usize,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            discipline: course.discipline,
            module_count: course.modules.len(),
            lesson_count: course.lesson_count(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressRequest {
    /// Lesson keys as held by the client, e.g. "karate-white-belt-0-1"
    #[serde(default)]
    pub completed: Vec<String>,
}

impl ProgressRequest {
    pub fn completed_lessons(&self) -> Result<CompletedLessons, ProgressError> {
        parse_completed(&self.completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonView {
    pub key: LessonKey,
    pub module_index: usize,
    pub lesson_index: usize,
    pub title: String,
    pub duration: String,
    pub status: LessonStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub course_id: CourseId,
    pub summary: ProgressSummary,
    pub finished: bool,
    pub next_lesson: Option<LessonKey>,
    pub lessons: Vec<LessonView>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompleteRequest {
    #[serde(default)]
    pub completed: Vec<String>,
    pub module_index: usize,
    pub lesson_index: usize,
}

impl CompleteRequest {
    pub fn completed_lessons(&self) -> Result<CompletedLessons, ProgressError> {
        parse_completed(&self.completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteResponse {
    /// False when the lesson was already completed
    pub inserted: bool,
    pub completed: CompletedLessons,
    pub summary: ProgressSummary,
    pub next_lesson: Option<LessonKey>,
}
