use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use digest_core::Msg;
use digest_engine::Background;
use digest_logging::{digest_debug, digest_error, digest_warn};
use serde::Deserialize;
use uuid::Uuid;

use super::effects::EffectRunner;
use super::sessions::SessionRegistry;
use super::ui::{PageInput, Renderer};

pub const SESSION_COOKIE: &str = "digest_session";

#[derive(Clone)]
pub struct AppState {
    pub title: Arc<str>,
    pub sessions: SessionRegistry,
    pub runner: Arc<EffectRunner>,
    pub renderer: Arc<Renderer>,
    pub background: Arc<Background>,
}

#[derive(Debug, Deserialize)]
struct TopicForm {
    topic: String,
}

#[derive(Debug, Deserialize)]
struct SearchForm {
    #[serde(default)]
    query: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/topic", post(toggle_topic))
        .route("/search", post(submit_search))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn index(State(app): State<AppState>, headers: HeaderMap) -> Response {
    let (session_id, handle, created) = app.sessions.resolve(session_cookie(&headers));
    let state = handle.lock().await;
    let view = state.view();
    let page = app.renderer.render_page(&PageInput {
        title: &app.title,
        view: &view,
        background: &app.background,
        search_input: state.search_topic(),
    });

    match page {
        Ok(html) => with_session_cookie(Html(html).into_response(), session_id, created),
        Err(err) => {
            digest_error!("Failed to render page for session {}: {}", session_id, err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

async fn toggle_topic(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TopicForm>,
) -> Response {
    interact(&app, &headers, Msg::TopicPressed(form.topic)).await
}

async fn submit_search(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Response {
    interact(&app, &headers, Msg::SearchSubmitted(form.query)).await
}

async fn healthz() -> &'static str {
    "ok"
}

// Post/redirect/get: every interaction ends with a redirect to the page.
async fn interact(app: &AppState, headers: &HeaderMap, msg: Msg) -> Response {
    let (session_id, handle, created) = app.sessions.resolve(session_cookie(headers));
    let mut state = handle.lock().await;
    let changed = app.runner.dispatch(&mut state, msg).await;
    digest_debug!("Session {} interaction done (changed={})", session_id, changed);
    with_session_cookie(Redirect::to("/").into_response(), session_id, created)
}

fn session_cookie(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find_map(|id| Uuid::parse_str(id.trim()).ok())
}

fn with_session_cookie(mut response: Response, session_id: Uuid, created: bool) -> Response {
    if !created {
        return response;
    }
    let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(err) => digest_warn!("Could not encode session cookie: {}", err),
    }
    response
}
