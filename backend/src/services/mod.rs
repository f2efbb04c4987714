//! HTTP API of the forms service.
//!
//! - `forms`: CRUD on backend form records (`/api/forms`).
//! - `submissions`: collecting and deleting responses to a stored form.
//! - `export`: CSV and JSON downloads of a form's responses.

pub mod export;
pub mod forms;
pub mod submissions;

use crate::storage::{forms as form_records, Database, StorageError};
use actix_web::{web, HttpResponse};
use common::mapper;
use common::model::form::Form;
use log::error;

/// Registers every scope. The nested `/api/forms/{form_id}/...` scopes go
/// first: actix dispatches to the first scope whose prefix matches.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submissions::configure_routes())
        .service(export::configure_routes())
        .service(forms::configure_routes());
}

/// A stored form in the editing model, as submissions and exports see it.
pub(crate) fn stored_form(db: &Database, form_id: i64) -> Result<Form, StorageError> {
    form_records::get_form(db, form_id).map(mapper::from_backend)
}

/// `404` for unknown forms, `503` with a message for anything else.
pub(crate) fn storage_error_response(context: &str, e: StorageError) -> HttpResponse {
    match e {
        StorageError::NotFound(_) => HttpResponse::NotFound().body(e.to_string()),
        other => {
            error!("{}: {}", context, other);
            HttpResponse::ServiceUnavailable().body(format!("{}: {}", context, other))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::state::AppState;
    use crate::storage::Database;
    use common::mapper;
    use common::model::dto::SaveFormRequest;
    use common::model::field::{Field, FieldKind, TextRules};
    use common::model::field_type::FieldType;
    use common::model::form::Form;
    use tempfile::{tempdir, TempDir};

    /// State over a throwaway database; keep the directory alive for the test.
    pub fn state() -> (TempDir, AppState) {
        let dir = tempdir().unwrap();
        let state = AppState {
            db: Database::new(dir.path().join("forms.sqlite")),
            actor_id: 1,
        };
        (dir, state)
    }

    /// A two-field form: a required name (3 to 20 chars) and topic checkboxes.
    pub fn contact_request() -> SaveFormRequest {
        let mut name = Field::new(FieldType::Text);
        name.label = "Name".into();
        name.required = true;
        name.kind = FieldKind::Text {
            validation: TextRules {
                min_length: Some(3),
                max_length: Some(20),
                pattern: None,
            },
        };
        let mut topics = Field::new(FieldType::Checkbox);
        topics.label = "Topics".into();
        topics.kind = FieldKind::Checkbox {
            options: vec!["Billing".into(), "Support".into()],
        };
        mapper::to_backend(&Form {
            id: Some("local".into()),
            title: "Contact".into(),
            fields: vec![name, topics],
            ..Form::default()
        })
    }
}
