use crate::handlers::{self, calculator, courses};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/calculator", post(calculator::calculate))
        .route("/courses", get(courses::list_courses))
        .route("/courses/{course_id}", get(courses::get_course))
        .route("/courses/{course_id}/progress", post(courses::course_progress))
        .route("/courses/{course_id}/complete", post(courses::complete_lesson));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
