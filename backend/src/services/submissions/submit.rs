use crate::services::{stored_form, storage_error_response};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::submission::FormSubmission;
use common::requests::{SubmitRequest, ValidationFailure};
use common::validation::validate_all;
use log::{debug, error, info};

/// Actix web handler for `POST /api/forms/{form_id}/submissions`.
///
/// Validates every field of the stored form before recording anything.
///
/// # Returns
/// - `201 Created` with the stored `FormSubmission`.
/// - `400 Bad Request` if the form has no fields.
/// - `404 Not Found` if the form does not exist.
/// - `422 Unprocessable Entity` with a `ValidationFailure` body.
/// - `503 Service Unavailable` on storage errors.
pub async fn process(
    form_id: web::Path<i64>,
    state: web::Data<AppState>,
    payload: web::Json<SubmitRequest>,
) -> impl Responder {
    let form_id = form_id.into_inner();
    let form = match stored_form(&state.db, form_id) {
        Ok(form) => form,
        Err(e) => return storage_error_response("Error retrieving form", e),
    };
    if form.fields.is_empty() {
        return HttpResponse::BadRequest().body("Form has no fields to submit");
    }

    let data = payload.into_inner().data;
    let errors = validate_all(&form, &data);
    if !errors.is_empty() {
        debug!("Submission to form {} rejected on {} field(s)", form_id, errors.len());
        return HttpResponse::UnprocessableEntity().json(ValidationFailure { errors });
    }

    let submission = FormSubmission::new(data);
    match state.submissions().append(&form_id.to_string(), submission.clone()) {
        Ok(()) => {
            info!("Recorded submission {} for form {}", submission.id, form_id);
            HttpResponse::Created().json(submission)
        }
        Err(e) => {
            error!("Error recording submission for form {}: {}", form_id, e);
            HttpResponse::ServiceUnavailable().body(format!("Error recording submission: {}", e))
        }
    }
}
