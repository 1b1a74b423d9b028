//! Notes REST API — list, create, update and delete over the injected store.
//!
//! Handlers stay thin: they pull the store out of [`AppState`], hand the
//! request to [`crate::notes`], and let [`ApiError`] shape failures.

use actix_web::{web, HttpResponse};
use notes_types::{CreateNoteRequest, MessageResponse};

use crate::error::ApiError;
use crate::notes;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notes")
            .app_data(json_config())
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}

/// Unparseable or mistyped JSON bodies answer 400 with the usual `{message}` shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::debug!("[NOTES] Rejected body for {} {}: {}", req.method(), req.path(), err);
        ApiError::InvalidBody.into()
    })
}

/// GET /api/notes
async fn list_notes(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let notes = notes::list_notes(state.store.as_ref())?;
    Ok(HttpResponse::Ok().json(notes))
}

/// POST /api/notes
async fn create_note(
    state: web::Data<AppState>,
    body: web::Json<CreateNoteRequest>,
) -> Result<HttpResponse, ApiError> {
    let note = notes::create_note(state.store.as_ref(), &body)?;
    Ok(HttpResponse::Created().json(note))
}

/// PUT /api/notes/{id}
///
/// The body is taken as raw JSON; field types are checked only after the note
/// has been found.
async fn update_note(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let note = notes::update_note(state.store.as_ref(), &path, &body)?;
    Ok(HttpResponse::Ok().json(note))
}

/// DELETE /api/notes/{id}
async fn delete_note(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    notes::delete_note(state.store.as_ref(), &path)?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Deleted successfully")))
}
