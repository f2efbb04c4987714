use crate::services::{stored_form, storage_error_response};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use log::error;

/// Actix web handler for `GET /api/forms/{form_id}/submissions`.
///
/// # Returns
/// - `200 OK` with the submissions, oldest first.
/// - `404 Not Found` if the form does not exist.
/// - `503 Service Unavailable` if the log cannot be read.
pub async fn process(form_id: web::Path<i64>, state: web::Data<AppState>) -> impl Responder {
    let form_id = form_id.into_inner();
    if let Err(e) = stored_form(&state.db, form_id) {
        return storage_error_response("Error retrieving form", e);
    }

    match state.submissions().list(&form_id.to_string()) {
        Ok(submissions) => HttpResponse::Ok().json(submissions),
        Err(e) => {
            error!("Error reading submissions of form {}: {}", form_id, e);
            HttpResponse::ServiceUnavailable().body(format!("Error reading submissions: {}", e))
        }
    }
}
