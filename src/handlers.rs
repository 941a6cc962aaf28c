use crate::chat::SendOutcome;
use crate::errors::AppError;
use crate::models::{ChatRequest, FilterForm, FilterRequest, SuggestionRequest};
use crate::poller::RefreshOutcome;
use crate::state::AppState;
use crate::ui::render_page;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub outcome: SendOutcome,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub enabled: bool,
    pub refresh: Option<RefreshOutcome>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub outcome: RefreshOutcome,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.view.lock().await;
    Html(render_page(&view.doc, state.reload_secs))
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// The send runs on its own task so a client hanging up does not cut it short.
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let chat = state.chat.clone();
    let outcome = tokio::spawn(async move { chat.send(&payload.message).await })
        .await
        .map_err(AppError::internal)?;
    Ok(Json(ChatResponse { outcome }))
}

/// Starts the send in the background so the page shows the loading entry
/// until the reply lands.
pub async fn chat_form(State(state): State<AppState>, Form(payload): Form<ChatRequest>) -> Redirect {
    let chat = state.chat.clone();
    tokio::spawn(async move {
        chat.send(&payload.message).await;
    });
    Redirect::to("/")
}

pub async fn suggestion(
    State(state): State<AppState>,
    Json(payload): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let label = apply_suggestion(&state, payload.index).await?;
    Ok(Json(SuggestionResponse { label }))
}

pub async fn suggestion_form(
    State(state): State<AppState>,
    Form(payload): Form<SuggestionRequest>,
) -> Result<Redirect, AppError> {
    apply_suggestion(&state, payload.index).await?;
    Ok(Redirect::to("/"))
}

async fn apply_suggestion(state: &AppState, index: usize) -> Result<String, AppError> {
    state
        .chat
        .use_suggestion(index)
        .await
        .ok_or_else(|| AppError::bad_request(format!("no suggestion at index {index}")))
}

pub async fn filter(
    State(state): State<AppState>,
    Json(payload): Json<FilterRequest>,
) -> Json<FilterResponse> {
    let refresh = state.poller.set_filter(payload.enabled).await;
    Json(FilterResponse {
        enabled: payload.enabled,
        refresh,
    })
}

pub async fn filter_form(State(state): State<AppState>, Form(payload): Form<FilterForm>) -> Redirect {
    state.poller.set_filter(payload.enabled.is_some()).await;
    Redirect::to("/")
}

pub async fn refresh(State(state): State<AppState>) -> Json<RefreshResponse> {
    let outcome = state.poller.refresh().await;
    Json(RefreshResponse { outcome })
}

pub async fn refresh_form(State(state): State<AppState>) -> Redirect {
    state.poller.refresh().await;
    Redirect::to("/")
}
