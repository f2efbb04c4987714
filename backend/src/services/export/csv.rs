use super::attachment;
use crate::services::{stored_form, storage_error_response};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::export::to_csv;
use log::error;

/// Actix web handler for `GET /api/forms/{form_id}/export/csv`.
///
/// # Returns
/// - `200 OK` with the CSV attachment.
/// - `204 No Content` when there is nothing to export.
/// - `404 Not Found` if the form does not exist.
pub async fn process(form_id: web::Path<i64>, state: web::Data<AppState>) -> impl Responder {
    let form_id = form_id.into_inner();
    let form = match stored_form(&state.db, form_id) {
        Ok(form) => form,
        Err(e) => return storage_error_response("Error retrieving form", e),
    };
    let submissions = match state.submissions().list(&form_id.to_string()) {
        Ok(submissions) => submissions,
        Err(e) => {
            error!("Error reading submissions of form {}: {}", form_id, e);
            return HttpResponse::ServiceUnavailable()
                .body(format!("Error reading submissions: {}", e));
        }
    };

    match to_csv(&form, &submissions) {
        Ok(Some(file)) => attachment(file),
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(e) => {
            error!("Error exporting form {} as CSV: {}", form_id, e);
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}
