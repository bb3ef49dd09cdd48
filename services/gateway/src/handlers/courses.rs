use crate::error::AppError;
use crate::models::{
    CompleteRequest, CompleteResponse, CourseSummary, LessonView, ListCoursesQuery,
    ProgressRequest, ProgressResponse,
};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use portal_core::progress::{self, CompletedLessons};
use types::course::Course;
use types::ids::CourseId;

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> Json<Vec<CourseSummary>> {
    let courses = match query.discipline {
        Some(discipline) => state
            .catalog
            .by_discipline(discipline)
            .map(CourseSummary::from)
            .collect(),
        None => state.catalog.iter().map(CourseSummary::from).collect(),
    };
    Json(courses)
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = state.catalog.get(&CourseId::new(course_id))?;
    Ok(Json(course.clone()))
}

pub async fn course_progress(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    payload: Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<Json<ProgressResponse>, AppError> {
    let Json(payload) = payload?;
    let completed = payload.completed_lessons()?;
    let course = state.catalog.get(&CourseId::new(course_id))?;
    Ok(Json(progress_view(course, &completed)))
}

pub async fn complete_lesson(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    payload: Result<Json<CompleteRequest>, JsonRejection>,
) -> Result<Json<CompleteResponse>, AppError> {
    let Json(payload) = payload?;
    let mut completed = payload.completed_lessons()?;
    let course = state.catalog.get(&CourseId::new(course_id))?;

    let inserted = progress::mark_complete(
        course,
        &mut completed,
        payload.module_index,
        payload.lesson_index,
    )?;

    if inserted {
        tracing::info!(
            course_id = %course.id,
            module_index = payload.module_index,
            lesson_index = payload.lesson_index,
            "Lesson completed"
        );
    }

    let summary = progress::progress_summary(course, &completed);
    let next_lesson = progress::next_lesson(course, &completed);

    Ok(Json(CompleteResponse {
        inserted,
        completed,
        summary,
        next_lesson,
    }))
}

fn progress_view(course: &Course, completed: &CompletedLessons) -> ProgressResponse {
    let summary = progress::progress_summary(course, completed);
    let lessons = progress::lesson_states(course, completed)
        .into_iter()
        .filter_map(|state| {
            let (m, l) = state.key.position();
            let lesson = course.lesson(m, l)?;
            Some(LessonView {
                module_index: m,
                lesson_index: l,
                title: lesson.title.clone(),
                duration: lesson.duration.clone(),
                status: state.status,
                key: state.key,
            })
        })
        .collect();

    ProgressResponse {
        course_id: course.id.clone(),
        finished: summary.is_finished(),
        summary,
        next_lesson: progress::next_lesson(course, completed),
        lessons,
    }
}
