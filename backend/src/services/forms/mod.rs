//! # Forms Service Module
//!
//! CRUD endpoints on backend form records under `/api/forms`. Request and
//! response bodies use the wire shapes of `common::model::dto`.
//!
//! ## Sub-modules:
//! - `list`: all stored forms.
//! - `get`: one stored form.
//! - `save`: creation and update, after checking every field definition.
//! - `delete`: removal of a form together with its submissions.

mod delete;
mod get;
mod list;
mod save;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

/// The base path for all form endpoints.
const API_PATH: &str = "/api/forms";

/// Configures and returns the Actix `Scope` for the form routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: every stored form as `BackendFormResponse[]`.
/// *   **`POST /`**: stores a `SaveFormRequest` as a new form, `201 Created`.
/// *   **`GET /{form_id}`**: one form, `404` when unknown.
/// *   **`PUT /{form_id}`**: replaces the form's content, `404` when unknown.
/// *   **`DELETE /{form_id}`**: `204 No Content`, `404` when unknown.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::create))
        .route("/{form_id}", get().to(get::process))
        .route("/{form_id}", put().to(save::update))
        .route("/{form_id}", delete().to(delete::process))
}
