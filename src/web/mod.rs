//! Registration form server: appends participants to the roster CSV.

pub mod pages;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::core::roster::RosterStore;
use crate::domain::model::Participant;
use crate::utils::error::{DrawError, Result};
use crate::utils::validation::validate_form_field;
use pages::{FlashLevel, Pages};

/// Shared state accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: RosterStore,
    pages: Arc<Pages>,
    /// Appends from concurrent requests go through this lock one at a time.
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(participants_path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: RosterStore::new(participants_path),
            pages: Arc::new(Pages::new()?),
            write_lock: Arc::new(Mutex::new(())),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit))
        .route("/participants", get(participants))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct FlashQuery {
    flash: Option<String>,
    level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubmitForm {
    department: String,
    name: String,
}

async fn health() -> &'static str {
    "ok"
}

/// GET / - registration form with an optional flash message.
async fn index(
    State(state): State<AppState>,
    Query(query): Query<FlashQuery>,
) -> std::result::Result<Html<String>, StatusCode> {
    let level = FlashLevel::parse(query.level.as_deref().unwrap_or_default());
    let flash = query.flash.as_deref().map(|message| (level, message));
    state.pages.render_index(flash).map(Html).map_err(render_failed)
}

/// POST /submit - validate and append, then redirect back to the form.
async fn submit(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Redirect {
    let participant = match (
        validate_form_field("department", &form.department),
        validate_form_field("name", &form.name),
    ) {
        (Ok(department), Ok(name)) => Participant { department, name },
        (Err(e), _) | (_, Err(e)) => {
            tracing::info!("Rejected registration: {}", e);
            return flash_redirect(FlashLevel::Error, &e.user_friendly_message());
        }
    };

    let result = {
        let _guard = state.write_lock.lock().await;
        let store = state.store.clone();
        let row = participant.clone();
        // 檔案寫入不佔用 async worker
        tokio::task::spawn_blocking(move || store.append(&row)).await
    };

    match result {
        Ok(Ok(())) => flash_redirect(
            FlashLevel::Success,
            &format!("Added participant: {}", participant),
        ),
        Ok(Err(e)) => {
            tracing::error!("Failed to register {}: {}", participant, e);
            flash_redirect(FlashLevel::Error, &registration_error(&e))
        }
        Err(join_err) => {
            tracing::error!("Append task for {} failed: {}", participant, join_err);
            flash_redirect(
                FlashLevel::Error,
                &format!("Could not add participant: {}", join_err),
            )
        }
    }
}

/// GET /participants - every row currently in the source.
async fn participants(
    State(state): State<AppState>,
) -> std::result::Result<Html<String>, StatusCode> {
    let store = state.store.clone();
    let listed = tokio::task::spawn_blocking(move || store.list())
        .await
        .unwrap_or_else(|join_err| {
            Err(DrawError::IoError(std::io::Error::other(join_err.to_string())))
        });

    let page = match listed {
        Ok(rows) => state.pages.render_participants(&rows, None),
        Err(e) => {
            tracing::warn!("Failed to read participants: {}", e);
            state.pages.render_participants(
                &[],
                Some(&format!("Could not read participant list: {}", e)),
            )
        }
    };
    page.map(Html).map_err(render_failed)
}

fn render_failed(e: DrawError) -> StatusCode {
    tracing::error!("Failed to render page: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

fn registration_error(e: &DrawError) -> String {
    format!("Could not add participant: {}", e)
}

fn flash_redirect(level: FlashLevel, message: &str) -> Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("flash", message)
        .append_pair("level", level.as_str())
        .finish();
    Redirect::to(&format!("/?{}", query))
}
