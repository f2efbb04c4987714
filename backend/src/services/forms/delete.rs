use crate::services::storage_error_response;
use crate::state::AppState;
use crate::storage::forms::delete_form;
use actix_web::{web, HttpResponse, Responder};
use log::{info, warn};

/// Actix web handler for `DELETE /api/forms/{form_id}`.
///
/// The form's submission log goes with it.
pub async fn process(form_id: web::Path<i64>, state: web::Data<AppState>) -> impl Responder {
    let form_id = form_id.into_inner();
    if let Err(e) = delete_form(&state.db, form_id) {
        return storage_error_response("Error deleting form", e);
    }
    if let Err(e) = state.submissions().clear(&form_id.to_string()) {
        warn!("Form {} deleted but its submissions were kept: {}", form_id, e);
    }
    info!("Deleted form {}", form_id);
    HttpResponse::NoContent().finish()
}
