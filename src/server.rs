//! HTTP surface: the signup API plus the static site.

use crate::signup::{SignupError, SignupRequest, SignupService, MSG_SUCCESS};
use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct AppState {
    pub signups: SignupService,
}

impl AppState {
    pub fn new(signups: SignupService) -> Self {
        Self { signups }
    }
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SignupListResponse {
    pub success: bool,
    pub count: usize,
    pub signups: Vec<Value>,
}

/// Build the application router.
///
/// Requests that match neither an API route nor a file under `public_dir`
/// get `public_dir/index.html` with status 404. That includes an API path
/// hit with the wrong method.
pub fn build_router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let public_dir = public_dir.as_ref();
    let static_site = ServeDir::new(public_dir)
        .not_found_service(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route(
            "/api/signup",
            post(submit_signup).fallback_service(static_site.clone()),
        )
        .route(
            "/api/signups",
            get(list_signups).fallback_service(static_site.clone()),
        )
        .fallback_service(static_site)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn submit_signup(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<SignupResponse>), SignupError> {
    let payload = read_signup(request).await?;
    state.signups.submit(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            success: true,
            message: MSG_SUCCESS.to_string(),
        }),
    ))
}

async fn list_signups(State(state): State<AppState>) -> Json<SignupListResponse> {
    let signups = state.signups.list().await;
    Json(SignupListResponse {
        success: true,
        count: signups.len(),
        signups,
    })
}

/// Decode a signup body as a URL-encoded form or, otherwise, as JSON.
async fn read_signup(request: Request) -> Result<SignupRequest, SignupError> {
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

    let payload = if is_form {
        Form::<SignupRequest>::from_request(request, &())
            .await
            .map(|Form(payload)| payload)
            .map_err(|rejection| invalid_body(rejection.body_text()))?
    } else {
        Json::<SignupRequest>::from_request(request, &())
            .await
            .map(|Json(payload)| payload)
            .map_err(|rejection| invalid_body(rejection.body_text()))?
    };
    Ok(payload)
}

fn invalid_body(detail: String) -> SignupError {
    debug!("Rejected signup body: {}", detail);
    SignupError::Validation(format!("Invalid request body: {}", detail))
}
