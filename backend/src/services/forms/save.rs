//! # Form Save Service
//!
//! `POST /api/forms` and `PUT /api/forms/{form_id}`. Both take a
//! `SaveFormRequest`, check it, store it through `storage::forms` and answer
//! with the stored `BackendFormResponse`.
//!
//! The check refuses field type codes the registry does not know (the lenient
//! client-side mapping would quietly turn them into text fields) and runs the
//! same field configuration check the builder runs before saving a field.

use crate::services::storage_error_response;
use crate::state::AppState;
use crate::storage::forms::{create_form, update_form};
use actix_web::{web, HttpResponse, Responder};
use common::mapper;
use common::model::dto::SaveFormRequest;
use common::model::field_type::FieldType;
use common::validation::check_field;
use log::info;

/// Handler for `POST /api/forms`: `201 Created`, or `400` for an invalid body.
pub async fn create(
    state: web::Data<AppState>,
    payload: web::Json<SaveFormRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    if let Err(message) = check_request(&request) {
        return HttpResponse::BadRequest().body(message);
    }
    match create_form(&state.db, &request, state.actor_id) {
        Ok(stored) => {
            info!("Created form {} ({})", stored.form_id, stored.title);
            HttpResponse::Created().json(stored)
        }
        Err(e) => storage_error_response("Error saving form", e),
    }
}

/// Handler for `PUT /api/forms/{form_id}`: `200 OK`, `400` or `404`.
pub async fn update(
    form_id: web::Path<i64>,
    state: web::Data<AppState>,
    payload: web::Json<SaveFormRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    if let Err(message) = check_request(&request) {
        return HttpResponse::BadRequest().body(message);
    }
    match update_form(&state.db, form_id.into_inner(), &request, state.actor_id) {
        Ok(stored) => {
            info!("Updated form {}", stored.form_id);
            HttpResponse::Ok().json(stored)
        }
        Err(e) => storage_error_response("Error saving form", e),
    }
}

fn check_request(request: &SaveFormRequest) -> Result<(), String> {
    if let Some(unknown) = request
        .form_fields
        .iter()
        .find(|f| FieldType::from_code(f.field_type_id).is_none())
    {
        return Err(format!(
            "Unknown field type code {} on field '{}'",
            unknown.field_type_id, unknown.label
        ));
    }

    let form = mapper::from_backend(request.clone().into_response());
    for field in &form.fields {
        check_field(field).map_err(|e| format!("Field '{}': {}", field.label, e))?;
    }
    Ok(())
}
