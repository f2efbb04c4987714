//! Conversion between the editing model and the backend wire shapes.
//!
//! Both directions are total. Outbound, anything the form does not have yet
//! is replaced by the backend's "new" or empty value. Inbound, a field type
//! code the registry does not know becomes a text field; this loses the
//! original type and is logged.

use crate::model::dto::{
    BackendFormFieldResponse, BackendFormResponse, FieldConfiguration,
    FieldConfigurationPayload, FormFieldPayload, FormPayload, SaveFormRequest, ValidationRecord,
};
use crate::model::field::{Field, FieldKind, TextRules};
use crate::model::field_type::FieldType;
use crate::model::form::Form;
use log::warn;

/// User id written into the audit columns when no signed-in user is known.
pub const DEFAULT_ACTOR_ID: i64 = 1;

/// Builds the save request for `form` on behalf of [`DEFAULT_ACTOR_ID`].
pub fn to_backend(form: &Form) -> SaveFormRequest {
    to_backend_as(form, DEFAULT_ACTOR_ID)
}

/// Builds the save request for `form` with `actor` in the audit columns.
pub fn to_backend_as(form: &Form, actor: i64) -> SaveFormRequest {
    SaveFormRequest {
        form: FormPayload {
            form_id: form.form_id.unwrap_or(0),
            title: form.title.clone(),
            description: form.description.clone(),
            is_active: form.is_active.unwrap_or(true),
            theme: form.theme.clone(),
            modified_by: actor,
        },
        form_fields: form
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| field_to_backend(field, index, actor))
            .collect(),
    }
}

/// `sort_order` is always the field's 1-based position in the form.
fn field_to_backend(field: &Field, index: usize, actor: i64) -> FormFieldPayload {
    FormFieldPayload {
        field_id: field.field_id.unwrap_or(0),
        form_id: field.form_id.unwrap_or(0),
        label: field.label.clone(),
        field_type_id: field.field_type().code(),
        is_required: field.required,
        placeholder: field.placeholder.clone(),
        sort_order: index as i32 + 1,
        is_active: field.is_active.unwrap_or(true),
        created_by: actor,
        modified_by: actor,
        configuration: FieldConfigurationPayload {
            options: field.kind.options().to_vec(),
            validation: field
                .kind
                .text_rules()
                .map(rules_to_record)
                .unwrap_or_default(),
            default_value: field.default_value.clone(),
        },
    }
}

/// Maps a stored backend form to the editing model. The numeric id doubles as
/// the client-local id.
pub fn from_backend(response: BackendFormResponse) -> Form {
    Form {
        id: Some(response.form_id.to_string()),
        title: response.title,
        description: response.description,
        fields: response
            .form_fields
            .into_iter()
            .map(field_from_backend)
            .collect(),
        theme: response.theme,
        form_id: Some(response.form_id),
        is_active: Some(response.is_active),
        created_date: Some(response.created_date),
        created_by: Some(response.created_by),
        modified_date: Some(response.modified_date),
        modified_by: Some(response.modified_by),
    }
}

fn field_from_backend(response: BackendFormFieldResponse) -> Field {
    let field_type = FieldType::from_code(response.field_type_id).unwrap_or_else(|| {
        warn!(
            "Unknown field type code {} on field {}, reading it as text",
            response.field_type_id, response.field_id
        );
        FieldType::Text
    });
    let configuration = response.configuration.unwrap_or_default();

    Field {
        id: response.field_id.to_string(),
        kind: FieldKind::with_parts(
            field_type,
            configuration.options,
            record_to_rules(configuration.validation),
        ),
        label: response.label,
        placeholder: response.placeholder.unwrap_or_default(),
        required: response.is_required,
        default_value: configuration.default_value,
        field_id: Some(response.field_id),
        form_id: Some(response.form_id),
        sort_order: Some(response.sort_order),
        is_active: Some(response.is_active),
    }
}

fn rules_to_record(rules: &TextRules) -> ValidationRecord {
    ValidationRecord {
        min_length: rules.min_length,
        max_length: rules.max_length,
        pattern: rules.pattern.clone().unwrap_or_default(),
    }
}

fn record_to_rules(record: ValidationRecord) -> TextRules {
    TextRules {
        min_length: record.min_length,
        max_length: record.max_length,
        pattern: Some(record.pattern).filter(|p| !p.is_empty()),
    }
}

impl SaveFormRequest {
    /// The response shape this request is stored as, before the backend
    /// assigns ids and audit dates. Ids of 0 stay 0.
    pub fn into_response(self) -> BackendFormResponse {
        let form_id = self.form.form_id;
        BackendFormResponse {
            form_id,
            title: self.form.title,
            description: self.form.description,
            is_active: self.form.is_active,
            theme: self.form.theme,
            created_date: String::new(),
            created_by: self.form.modified_by,
            modified_date: String::new(),
            modified_by: self.form.modified_by,
            form_fields: self
                .form_fields
                .into_iter()
                .map(|field| BackendFormFieldResponse {
                    field_id: field.field_id,
                    form_id: if field.form_id == 0 { form_id } else { field.form_id },
                    label: field.label,
                    field_type_id: field.field_type_id,
                    is_required: field.is_required,
                    placeholder: Some(field.placeholder).filter(|p| !p.is_empty()),
                    sort_order: field.sort_order,
                    is_active: field.is_active,
                    created_date: String::new(),
                    created_by: field.created_by,
                    modified_date: String::new(),
                    modified_by: field.modified_by,
                    configuration: Some(FieldConfiguration {
                        options: field.configuration.options,
                        validation: field.configuration.validation,
                        default_value: field.configuration.default_value,
                    }),
                })
                .collect(),
        }
    }
}
