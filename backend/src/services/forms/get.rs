use crate::services::storage_error_response;
use crate::state::AppState;
use crate::storage::forms::get_form;
use actix_web::{web, HttpResponse, Responder};

/// Actix web handler for `GET /api/forms/{form_id}`.
///
/// # Returns
/// - `200 OK` with the `BackendFormResponse`.
/// - `404 Not Found` if no form has this id.
/// - `503 Service Unavailable` on storage errors.
pub async fn process(form_id: web::Path<i64>, state: web::Data<AppState>) -> impl Responder {
    match get_form(&state.db, form_id.into_inner()) {
        Ok(form) => HttpResponse::Ok().json(form),
        Err(e) => storage_error_response("Error retrieving form", e),
    }
}
