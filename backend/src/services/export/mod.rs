//! # Export Service Module
//!
//! Downloads of a stored form's submissions, served as attachments named
//! `{title}_submissions.{csv,json}`.

mod csv;
mod json;

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::web::{get, scope};
use actix_web::{HttpResponse, Scope};
use common::export::ExportFile;

const API_PATH: &str = "/api/forms/{form_id}/export";

/// Configures and returns the Actix `Scope` for the export routes.
///
/// # Registered Routes:
///
/// *   **`GET /csv`**: `Timestamp` plus one column per field label, every
///     data cell quoted. `204 No Content` while the form has no submissions.
/// *   **`GET /json`**: the submission records, pretty-printed.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/csv", get().to(csv::process))
        .route("/json", get().to(json::process))
}

fn attachment(file: ExportFile) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(file.mime_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.filename)],
        })
        .body(file.content)
}
