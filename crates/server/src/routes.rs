use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers::{quiz, system};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let quiz_routes = Router::new()
        .route("/start", post(quiz::start))
        .route("/question", post(quiz::question))
        .route("/answer", post(quiz::answer))
        .route("/complete", post(quiz::complete));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .route("/api/system/health", get(system::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
