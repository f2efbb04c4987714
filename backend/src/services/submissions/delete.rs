use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use log::{error, info};

/// Actix web handler for `DELETE /api/forms/{form_id}/submissions/{submission_id}`.
pub async fn process(path: web::Path<(i64, String)>, state: web::Data<AppState>) -> impl Responder {
    let (form_id, submission_id) = path.into_inner();
    match state.submissions().remove(&form_id.to_string(), &submission_id) {
        Ok(true) => {
            info!("Deleted submission {} of form {}", submission_id, form_id);
            HttpResponse::NoContent().finish()
        }
        Ok(false) => HttpResponse::NotFound().body(format!("submission {} not found", submission_id)),
        Err(e) => {
            error!("Error deleting submission {}: {}", submission_id, e);
            HttpResponse::ServiceUnavailable().body(format!("Error deleting submission: {}", e))
        }
    }
}
