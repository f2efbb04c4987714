use crate::services::storage_error_response;
use crate::state::AppState;
use crate::storage::forms::list_forms;
use actix_web::{web, HttpResponse, Responder};

/// Actix web handler for `GET /api/forms`.
pub async fn process(state: web::Data<AppState>) -> impl Responder {
    match list_forms(&state.db) {
        Ok(forms) => HttpResponse::Ok().json(forms),
        Err(e) => storage_error_response("Error retrieving forms", e),
    }
}
