//! REST surface: axum handlers mapping the wire DTOs from the `shared`
//! crate onto domain commands.
//!
//! Handlers stay thin. All validation lives in the domain layer; this
//! module only translates between JSON shapes and domain types and maps
//! [`NotebookError`] variants onto status codes.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::domain::commands::{caretakers, handoff, notebooks, notes, tasks};
use crate::domain::dates;
use crate::domain::models;
use crate::errors::NotebookError;
use crate::Backend;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<Backend>,
}

impl AppState {
    pub fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }
}

/// Build the `/api` router over a backend.
pub fn router(backend: Arc<Backend>) -> Router {
    let api = Router::new()
        .route("/notebooks", post(create_notebook).get(notebook_index))
        .route("/notebooks/:id", get(get_notebook))
        .route("/notebooks/:id/today", get(get_today))
        .route("/notebooks/:id/history", get(get_history))
        .route("/notebooks/:id/notes", post(create_note))
        .route(
            "/notebooks/:id/notes/:note_id",
            axum::routing::put(update_note).delete(delete_note),
        )
        .route("/notebooks/:id/tasks", post(create_task))
        .route(
            "/notebooks/:id/tasks/:task_id",
            axum::routing::put(update_task).delete(delete_task),
        )
        .route("/notebooks/:id/tasks/:task_id/toggle", post(toggle_task))
        .route(
            "/notebooks/:id/caretakers",
            get(list_caretakers).post(add_caretaker),
        )
        .route("/notebooks/:id/caretakers/archive", post(archive_caretaker))
        .route("/notebooks/:id/caretakers/restore", post(restore_caretaker))
        .route("/notebooks/:id/caretakers/primary", post(set_primary_caretaker))
        .route("/notebooks/:id/caretakers/rename", post(rename_caretaker))
        .route("/notebooks/:id/handoff", post(perform_handoff))
        .route("/notebooks/:id/handoff/targets", get(handoff_targets));

    Router::new()
        .nest("/api", api)
        .with_state(AppState::new(backend))
}

/// Domain error translated to an HTTP response.
pub struct ApiError(NotebookError);

impl From<NotebookError> for ApiError {
    fn from(err: NotebookError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            NotebookError::Validation(reason) => (StatusCode::UNPROCESSABLE_ENTITY, reason),
            NotebookError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{} not found", what))
            }
            NotebookError::QuotaExceeded => (
                StatusCode::INSUFFICIENT_STORAGE,
                "Storage is full. Free up some space and try again.".to_string(),
            ),
            NotebookError::Cancelled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The request was interrupted. Please try again.".to_string(),
            ),
            NotebookError::Store(detail) => {
                tracing::error!("Storage failure: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again.".to_string(),
                )
            }
        };
        (status, Json(shared::ErrorResponse { error: message })).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

// ---- notebooks ----

async fn create_notebook(
    State(state): State<AppState>,
    Json(request): Json<shared::CreateNotebookRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("POST /api/notebooks - caree: {}", request.caree_name);
    let result = state
        .backend
        .notebook_service
        .create_notebook(notebooks::CreateNotebookCommand {
            caree_name: request.caree_name,
        })?;
    Ok((StatusCode::CREATED, Json(metadata_to_wire(&result.notebook))))
}

async fn notebook_index(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let index = state.backend.notebook_service.index()?;
    Ok(Json(shared::NotebookIndex {
        known_notebooks: index.known_notebooks,
        last_used: index.last_used,
    }))
}

async fn get_notebook(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let notebook = state.backend.notebook_service.get_notebook(&id)?;
    Ok(Json(metadata_to_wire(&notebook)))
}

// ---- today & history ----

async fn get_today(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/notebooks/{}/today", id);
    // Opening counts as "using" the notebook for the device index.
    state.backend.notebook_service.open_notebook(&id)?;
    match state.backend.note_service.load_today(&id)? {
        Some(today) => Ok(Json(day_to_wire(&today))),
        None => Err(ApiError(NotebookError::Cancelled)),
    }
}

async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let result = state.backend.note_service.get_notes_by_date(&id)?;
    let today = dates::today_key();
    // Most recent first, and today belongs to the live view, not history.
    let days: Vec<shared::HistoryDay> = result
        .days
        .into_iter()
        .rev()
        .filter(|(date, _)| *date != today)
        .map(|(date, notes)| shared::HistoryDay {
            date,
            care_notes: notes.iter().map(note_to_wire).collect(),
        })
        .collect();
    Ok(Json(shared::HistoryResponse { days }))
}

// ---- notes ----

async fn create_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<shared::CreateNoteRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("POST /api/notebooks/{}/notes - author: {}", id, request.author);
    let result = state.backend.note_service.add_note(
        &id,
        notes::CreateNoteCommand {
            author: request.author,
            text: request.note,
        },
    )?;
    Ok((StatusCode::CREATED, Json(note_to_wire(&result.note))))
}

async fn update_note(
    State(state): State<AppState>,
    Path((id, note_id)): Path<(String, String)>,
    Json(request): Json<shared::UpdateNoteRequest>,
) -> ApiResult<impl IntoResponse> {
    let result = state.backend.note_service.update_note(
        &id,
        notes::UpdateNoteCommand {
            note_id,
            requested_by: request.requested_by,
            text: request.note,
        },
    )?;
    Ok(Json(note_to_wire(&result.note)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteNoteQuery {
    requested_by: String,
}

async fn delete_note(
    State(state): State<AppState>,
    Path((id, note_id)): Path<(String, String)>,
    Query(query): Query<DeleteNoteQuery>,
) -> ApiResult<impl IntoResponse> {
    state.backend.note_service.delete_note(
        &id,
        notes::DeleteNoteCommand {
            note_id,
            requested_by: query.requested_by,
        },
    )?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- tasks ----

async fn create_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<shared::CreateTaskRequest>,
) -> ApiResult<impl IntoResponse> {
    let result = state
        .backend
        .task_service
        .add_task(&id, tasks::CreateTaskCommand { text: request.text })?;
    Ok((StatusCode::CREATED, Json(task_to_wire(&result.task))))
}

async fn update_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(String, String)>,
    Json(request): Json<shared::UpdateTaskRequest>,
) -> ApiResult<impl IntoResponse> {
    let result = state.backend.task_service.update_task(
        &id,
        tasks::UpdateTaskCommand {
            task_id,
            text: request.text,
        },
    )?;
    Ok(Json(task_to_wire(&result.task)))
}

async fn delete_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    state
        .backend
        .task_service
        .delete_task(&id, tasks::DeleteTaskCommand { task_id })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let result = state
        .backend
        .task_service
        .toggle_task(&id, tasks::ToggleTaskCommand { task_id })?;
    Ok(Json(task_to_wire(&result.task)))
}

// ---- caretakers ----

async fn list_caretakers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let result = state.backend.caretaker_service.get_caretakers(&id)?;
    Ok(Json(roster_to_wire(&result.caretakers)))
}

async fn add_caretaker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<shared::AddCaretakerRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("POST /api/notebooks/{}/caretakers - name: {}", id, request.name);
    let result = state
        .backend
        .caretaker_service
        .add_caretaker(&id, caretakers::AddCaretakerCommand { name: request.name })?;
    Ok((StatusCode::CREATED, Json(roster_to_wire(&result.caretakers))))
}

async fn archive_caretaker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<shared::CaretakerActionRequest>,
) -> ApiResult<impl IntoResponse> {
    let result = state
        .backend
        .caretaker_service
        .archive_caretaker(&id, caretakers::ArchiveCaretakerCommand { name: request.name })?;
    Ok(Json(roster_to_wire(&result.caretakers)))
}

async fn restore_caretaker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<shared::CaretakerActionRequest>,
) -> ApiResult<impl IntoResponse> {
    let result = state
        .backend
        .caretaker_service
        .restore_caretaker(&id, caretakers::RestoreCaretakerCommand { name: request.name })?;
    Ok(Json(roster_to_wire(&result.caretakers)))
}

async fn set_primary_caretaker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<shared::CaretakerActionRequest>,
) -> ApiResult<impl IntoResponse> {
    let result = state
        .backend
        .caretaker_service
        .set_primary_caretaker(&id, caretakers::SetPrimaryCaretakerCommand { name: request.name })?;
    Ok(Json(roster_to_wire(&result.caretakers)))
}

async fn rename_caretaker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<shared::RenameCaretakerRequest>,
) -> ApiResult<impl IntoResponse> {
    let result = state.backend.caretaker_service.update_caretaker_name(
        &id,
        caretakers::RenameCaretakerCommand {
            name: request.name,
            new_name: request.new_name,
        },
    )?;
    Ok(Json(roster_to_wire(&result.caretakers)))
}

// ---- handoff ----

async fn perform_handoff(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<shared::HandoffRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("POST /api/notebooks/{}/handoff - to: {}", id, request.to);
    let result = state
        .backend
        .handoff_service
        .handoff(&id, handoff::HandoffCommand { to: request.to })?;
    Ok(Json(day_to_wire(&result.today)))
}

async fn handoff_targets(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let result = state.backend.handoff_service.eligible_targets(&id)?;
    Ok(Json(roster_to_wire(&result.targets)))
}

// ---- wire mapping ----

fn metadata_to_wire(notebook: &models::NotebookMetadata) -> shared::NotebookMetadata {
    shared::NotebookMetadata {
        id: notebook.id.clone(),
        caree_name: notebook.caree_name.clone(),
        created_at: notebook.created_at.to_rfc3339(),
    }
}

fn note_to_wire(note: &models::CareNote) -> shared::CareNote {
    shared::CareNote {
        id: note.id.clone(),
        time: note.time.clone(),
        note: note.note.clone(),
        author: note.author.clone(),
        created_at: note.created_at.to_rfc3339(),
        edited_at: note.edited_at.map(|at| at.to_rfc3339()),
    }
}

fn task_to_wire(task: &models::Task) -> shared::Task {
    shared::Task {
        id: task.id.clone(),
        text: task.text.clone(),
        done: task.done,
        created_at: task.created_at.to_rfc3339(),
    }
}

fn caretaker_to_wire(caretaker: &models::Caretaker) -> shared::Caretaker {
    shared::Caretaker {
        id: caretaker.id.clone(),
        name: caretaker.name.clone(),
        is_primary: caretaker.is_primary,
        is_active: caretaker.is_active,
    }
}

fn roster_to_wire(roster: &[models::Caretaker]) -> Vec<shared::Caretaker> {
    roster.iter().map(caretaker_to_wire).collect()
}

fn day_to_wire(day: &models::DayRecord) -> shared::TodayState {
    shared::TodayState {
        date: day.date.clone(),
        care_notes: day.care_notes.iter().map(note_to_wire).collect(),
        tasks: day.tasks.iter().map(task_to_wire).collect(),
        current_caregiver: day.current_caregiver.clone(),
        last_updated_by: day.last_updated_by.clone(),
    }
}
