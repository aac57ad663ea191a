//! HTTP ingress and read API
//!
//! Routes:
//! - `POST /event`                        third-party event notification (logged only)
//! - `GET  /healthz`                      record count, 503 when storage is down
//! - `GET  /status`                       per-game status reports
//! - `GET  /fingerprint/{game}`           history, newest first
//! - `GET  /fingerprint/{game}/latest`    latest record
//! - `GET  /fingerprint/{game}/sha/{sha}` stored fingerprint document

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ft_core::{Game, Lookup, StoreError};
use journal::{Backend, FingerprintStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use watcher::{unix_now, StatusBoard};

/// Store type shared by the daemon and the HTTP layer
pub type SharedStore = Arc<FingerprintStore<Box<dyn Backend>>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub board: StatusBoard,
    pub games: Vec<Game>,
}

/// Event payload posted by third parties
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventImageUrl {
    pub game_name: String,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct Health {
    records: u64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/event", post(post_event))
        .route("/healthz", get(healthz))
        .route("/status", get(status))
        .route("/fingerprint/:game", get(history))
        .route("/fingerprint/:game/latest", get(latest))
        .route("/fingerprint/:game/sha/:sha", get(by_sha))
        .with_state(state)
}

async fn post_event(Json(event): Json<EventImageUrl>) -> StatusCode {
    info!("Received event for {}: {}", event.game_name, event.image_url);
    StatusCode::OK
}

async fn healthz(State(state): State<AppState>) -> Response {
    match state.store.count() {
        Lookup::Failed(e) => store_error(&e),
        count => Json(Health {
            records: count.value().unwrap_or(0),
        })
        .into_response(),
    }
}

async fn status(State(state): State<AppState>) -> Response {
    Json(state.board.snapshot(&state.games, unix_now())).into_response()
}

async fn history(State(state): State<AppState>, Path(game): Path<String>) -> Response {
    let game = match parse_game(&game) {
        Ok(game) => game,
        Err(response) => return response,
    };

    match state.store.history(game) {
        Lookup::Value(entries) => Json(entries).into_response(),
        Lookup::Empty => Json(Vec::<ft_core::HistoryEntry>::new()).into_response(),
        Lookup::Failed(e) => store_error(&e),
    }
}

async fn latest(State(state): State<AppState>, Path(game): Path<String>) -> Response {
    let game = match parse_game(&game) {
        Ok(game) => game,
        Err(response) => return response,
    };

    match state.store.latest(game) {
        Lookup::Value(record) => Json(record).into_response(),
        Lookup::Empty => error_response(StatusCode::NOT_FOUND, format!("no fingerprints for {}", game)),
        Lookup::Failed(e) => store_error(&e),
    }
}

async fn by_sha(State(state): State<AppState>, Path((game, sha)): Path<(String, String)>) -> Response {
    let game = match parse_game(&game) {
        Ok(game) => game,
        Err(response) => return response,
    };

    match state.store.by_sha(game, &sha) {
        Ok(document) => Json(document).into_response(),
        Err(e) => store_error(&e),
    }
}

fn parse_game(raw: &str) -> Result<Game, Response> {
    raw.parse::<Game>()
        .map_err(|e| error_response(StatusCode::NOT_FOUND, e.to_string()))
}

fn store_error(e: &StoreError) -> Response {
    let status = match e {
        StoreError::NotFound { .. } | StoreError::MissingPayload { .. } => StatusCode::NOT_FOUND,
        StoreError::Deserialization(_) | StoreError::InvalidRecord(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StoreError::Connection(_) | StoreError::Query(_) | StoreError::StartupFatal(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    error_response(status, e.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}
