use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/chat/send", post(handlers::chat_form))
        .route("/chat/suggestion", post(handlers::suggestion_form))
        .route("/filter", post(handlers::filter_form))
        .route("/refresh", post(handlers::refresh_form))
        .route("/ui/chat", post(handlers::chat))
        .route("/ui/suggestion", post(handlers::suggestion))
        .route("/ui/filter", post(handlers::filter))
        .route("/ui/refresh", post(handlers::refresh))
        .with_state(state)
}
