//! # Web Server
//!
//! HTTP surface for the debate page.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Live turns delivered over Server-Sent Events
//! - 1.0.0: Page, vote, export and health routes

use anyhow::Result;
use axum::{
    extract::{Form, Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Redirect, Response,
    },
    routing::{get, post},
    Json, Router,
};
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::sync::Arc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tower_http::set_header::SetResponseHeaderLayer;
use uuid::Uuid;

use crate::core::{log_preview, Config};
use crate::features::debate::{
    event_channel, DebateEvent, DebateOrchestrator, DebateRequest, Rounds, EXPORT_FILE_NAME,
};
use crate::features::presentation::{render_page, Vote};
use crate::features::session::{run_session_debate, SessionId, SessionStore, StartRejected};

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "debate_session";

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub orchestrator: Arc<DebateOrchestrator>,
    /// Stylesheet injected into every page
    pub stylesheet: Arc<String>,
}

impl AppState {
    pub fn new(sessions: SessionStore, orchestrator: Arc<DebateOrchestrator>, stylesheet: String) -> Self {
        Self {
            sessions,
            orchestrator,
            stylesheet: Arc::new(stylesheet),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StreamParams {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub rounds: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub winner: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/debate/stream", get(debate_stream))
        .route("/debate/vote", post(vote))
        .route("/debate/export", get(export))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

/// Bind to the configured address and serve until the process exits
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("🌐 Debate page listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Extract the session id from the `Cookie` header, if present and well formed
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

fn session_cookie(id: SessionId) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Attach `Set-Cookie` when the session was created by this request
fn with_session_cookie(mut response: Response, id: SessionId, created: bool) -> Response {
    if created {
        if let Ok(value) = HeaderValue::from_str(&session_cookie(id)) {
            response.headers_mut().insert(SET_COOKIE, value);
        }
    }
    response
}

async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, created) = state.sessions.get_or_create(session_from_headers(&headers));
    let page = state
        .sessions
        .snapshot(id)
        .map(|session| render_page(&session, &state.stylesheet));

    let response = match page {
        Some(page) => Html(page).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };
    with_session_cookie(response, id, created)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.len(),
    }))
}

/// Start (or refuse to restart) the session's debate and stream its events
async fn debate_stream(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<StreamParams>,
) -> Response {
    let (id, created) = state.sessions.get_or_create(session_from_headers(&headers));

    let attempt = state.sessions.with_session(id, |session| {
        session.apply_topic(&params.topic);
        let rounds = params.rounds.map(Rounds::clamped).unwrap_or(session.rounds);
        session.try_start(rounds).map(|epoch| {
            (
                epoch,
                DebateRequest {
                    topic: session.topic.clone(),
                    rounds,
                },
            )
        })
    });

    let (tx, rx) = event_channel();
    match attempt {
        Some(Ok((epoch, request))) => {
            info!(
                "Session {} starting debate on '{}' for {} round(s)",
                id,
                log_preview(&request.topic),
                request.rounds.get()
            );
            tokio::spawn(run_session_debate(
                state.sessions.clone(),
                id,
                epoch,
                state.orchestrator.clone(),
                request,
                tx,
            ));
        }
        Some(Err(StartRejected::AlreadyStarted)) => {
            debug!("Session {} already started, ignoring start", id);
            let _ = tx.send(DebateEvent::AlreadyStarted).await;
        }
        Some(Err(rejected @ StartRejected::EmptyTopic)) => {
            warn!("Session {} start rejected: {}", id, rejected);
            let response = (StatusCode::BAD_REQUEST, rejected.to_string()).into_response();
            return with_session_cookie(response, id, created);
        }
        None => {
            error!("Session {} vanished before the debate could start", id);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    let stream = ReceiverStream::new(rx).map(move |event| {
        if event.is_terminal() {
            debug!("Session {} stream closing after {:?}", id, event);
        }
        Event::default().json_data(&event)
    });

    let response = Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response();
    with_session_cookie(response, id, created)
}

async fn vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<VoteForm>,
) -> Response {
    let Some(choice) = Vote::parse(&form.winner) else {
        return (StatusCode::BAD_REQUEST, "unknown vote option").into_response();
    };

    let (id, created) = state.sessions.get_or_create(session_from_headers(&headers));
    let response = match state.sessions.with_session(id, |session| session.cast_vote(choice)) {
        Some(Ok(())) => {
            info!("Session {} voted {}", id, choice.value());
            Redirect::to("/").into_response()
        }
        Some(Err(rejected)) => (StatusCode::CONFLICT, rejected.to_string()).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };
    with_session_cookie(response, id, created)
}

async fn export(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, created) = state.sessions.get_or_create(session_from_headers(&headers));

    let response = match state.sessions.snapshot(id) {
        Some(session) if session.started() => (
            [
                (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                ),
            ],
            session.transcript.export_text(),
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, "no debate to export yet").into_response(),
    };
    with_session_cookie(response, id, created)
}
