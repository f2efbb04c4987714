//! Editing state of the form builder.
//!
//! The [`Workspace`] owns the list of known forms and a copy of the form
//! being edited. Every change goes through `&mut self`. Persistence goes to
//! the injected [`KeyValueStore`]: the form list through [`FormRepository`],
//! responses through [`SubmissionStore`].
//!
//! Network traffic stays outside: callers fetch from the backend and hand the
//! result in (`load_forms`, `load_form`, `apply_backend_save`). The workspace
//! only maps and records it.

use crate::export::{self, ExportError, ExportFile};
use crate::mapper;
use crate::model::dto::{BackendFormResponse, SaveFormRequest};
use crate::model::field::Field;
use crate::model::field_type::FieldType;
use crate::model::form::{Form, FormUpdate};
use crate::model::submission::{FormSubmission, SubmissionData};
use crate::storage::{FormRepository, KeyValueStore, StoreError, SubmissionStore};
use crate::validation::{check_field, validate_all, FieldConfigError, FormErrors};
use log::{debug, info, warn};
use std::fmt::Display;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Please save the current form to the database before creating a new one.")]
    UnsyncedForm,
    #[error("The current form has not been created yet")]
    NoCurrentForm,
    #[error("Form {0} not found")]
    FormNotFound(String),
    #[error("Field {0} not found")]
    FieldNotFound(String),
    #[error("Failed to load form from backend: {0}")]
    Remote(String),
    #[error(transparent)]
    InvalidField(#[from] FieldConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("This form has no fields. Please add fields to the form before submitting.")]
    NoFields,
    #[error("Please fix {} validation error(s) before submitting.", .0.len())]
    Invalid(FormErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Where `load_forms` got its list from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The backend answered; holds the number of forms.
    Remote(usize),
    /// The backend failed and the locally saved forms were used.
    LocalFallback { count: usize, error: String },
    /// The backend failed and nothing was saved locally.
    Unavailable { error: String },
}

pub struct Workspace<S> {
    store: S,
    forms: Vec<Form>,
    current: Form,
    search_term: String,
}

impl<S: KeyValueStore> Workspace<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            forms: Vec::new(),
            current: Form::default(),
            search_term: String::new(),
        }
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    pub fn current_form(&self) -> &Form {
        &self.current
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Forms whose title contains the search term, ignoring case.
    pub fn filtered_forms(&self) -> Vec<&Form> {
        let needle = self.search_term.to_lowercase();
        self.forms
            .iter()
            .filter(|form| form.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Replaces the form list with the backend's answer, or falls back once
    /// to the locally saved list when the fetch failed.
    pub fn load_forms<E: Display>(
        &mut self,
        fetched: Result<Vec<BackendFormResponse>, E>,
    ) -> Result<LoadOutcome, StoreError> {
        match fetched {
            Ok(responses) => {
                self.forms = responses.into_iter().map(mapper::from_backend).collect();
                info!("Loaded {} forms from backend", self.forms.len());
                Ok(LoadOutcome::Remote(self.forms.len()))
            }
            Err(e) => {
                let error = e.to_string();
                warn!("Error loading forms: {}", error);
                let saved = self.repository().load()?;
                if saved.is_empty() {
                    return Ok(LoadOutcome::Unavailable { error });
                }
                self.forms = saved;
                info!("Loaded {} forms from local storage", self.forms.len());
                Ok(LoadOutcome::LocalFallback {
                    count: self.forms.len(),
                    error,
                })
            }
        }
    }

    /// Makes a single form fetched from the backend the current one.
    pub fn load_form<E: Display>(
        &mut self,
        fetched: Result<BackendFormResponse, E>,
    ) -> Result<&Form, WorkspaceError> {
        let response = fetched.map_err(|e| {
            warn!("Error loading form from backend: {}", e);
            WorkspaceError::Remote(e.to_string())
        })?;
        self.current = mapper::from_backend(response);
        Ok(&self.current)
    }

    /// Starts a new form named after the number of known forms.
    ///
    /// Refused while the current form exists locally but not on the backend.
    pub fn create_new_form(&mut self) -> Result<&Form, WorkspaceError> {
        if self.current.is_unsynced() {
            return Err(WorkspaceError::UnsyncedForm);
        }
        let form = Form {
            id: Some(new_id()),
            title: format!("Form {}", self.forms.len() + 1),
            ..Form::default()
        };
        self.forms.push(form.clone());
        self.current = form;
        Ok(&self.current)
    }

    pub fn update_current_form(&mut self, update: FormUpdate) {
        update.apply(&mut self.current);
    }

    /// Writes the current form into the list and saves the list locally.
    pub fn save_form(&mut self) -> Result<(), WorkspaceError> {
        let id = self.current.id.clone().ok_or(WorkspaceError::NoCurrentForm)?;
        match self.forms.iter_mut().find(|f| f.id.as_deref() == Some(id.as_str())) {
            Some(slot) => *slot = self.current.clone(),
            None => self.forms.push(self.current.clone()),
        }
        self.persist_forms()?;
        Ok(())
    }

    /// The request that stores the current form on the backend.
    pub fn prepare_backend_save(&self, actor: i64) -> Result<SaveFormRequest, WorkspaceError> {
        if self.current.id.is_none() {
            return Err(WorkspaceError::NoCurrentForm);
        }
        let request = mapper::to_backend_as(&self.current, actor);
        debug!(
            "Prepared backend save for form {:?} with {} fields",
            self.current.id,
            request.form_fields.len()
        );
        Ok(request)
    }

    /// Records the ids the backend assigned after a successful save.
    ///
    /// Local form and field ids stay as they are, so existing submissions
    /// still line up. A stored field is bound to the local field that already
    /// carries its `field_id`, otherwise to the local field whose position it
    /// records in `sort_order`.
    pub fn apply_backend_save(&mut self, response: BackendFormResponse) -> Result<(), WorkspaceError> {
        if self.current.id.is_none() {
            return Err(WorkspaceError::NoCurrentForm);
        }
        let form = &mut self.current;
        form.form_id = Some(response.form_id);
        form.is_active = Some(response.is_active);
        form.created_date = Some(response.created_date);
        form.created_by = Some(response.created_by);
        form.modified_date = Some(response.modified_date);
        form.modified_by = Some(response.modified_by);

        let mut stored = response.form_fields;
        let mut bound = vec![None; form.fields.len()];
        for (index, field) in form.fields.iter().enumerate() {
            if let Some(slot) = field
                .field_id
                .and_then(|id| stored.iter().position(|s| s.field_id == id))
            {
                bound[index] = Some(stored.swap_remove(slot));
            }
        }
        for (index, slot) in bound.iter_mut().enumerate() {
            if slot.is_none() {
                let position = index as i32 + 1;
                if let Some(found) = stored.iter().position(|s| s.sort_order == position) {
                    *slot = Some(stored.swap_remove(found));
                }
            }
        }

        for (field, stored) in form.fields.iter_mut().zip(bound) {
            match stored {
                Some(stored) => {
                    field.field_id = Some(stored.field_id);
                    field.form_id = Some(stored.form_id);
                    field.sort_order = Some(stored.sort_order);
                    field.is_active = Some(stored.is_active);
                }
                None => warn!("Backend returned no stored field for '{}'", field.label),
            }
        }
        self.save_form()
    }

    /// Deletes a form and its submissions. Returns whether it existed.
    pub fn delete_form(&mut self, form_id: &str) -> Result<bool, WorkspaceError> {
        let before = self.forms.len();
        self.forms.retain(|f| f.id.as_deref() != Some(form_id));
        if self.forms.len() == before {
            return Ok(false);
        }
        if self.current.id.as_deref() == Some(form_id) {
            self.current = Form::default();
        }
        self.persist_forms()?;
        self.submission_store().clear(form_id)?;
        Ok(true)
    }

    /// Copies a form under fresh ids, without backend ids, and edits the copy.
    pub fn duplicate_form(&mut self, form_id: &str) -> Result<&Form, WorkspaceError> {
        let original = self
            .find_form(form_id)
            .ok_or_else(|| WorkspaceError::FormNotFound(form_id.to_string()))?;

        let mut copy = original.clone();
        copy.id = Some(new_id());
        copy.form_id = None;
        copy.title = format!("{} (Copy)", original.title);
        for field in &mut copy.fields {
            field.id = new_id();
            field.field_id = None;
            field.form_id = None;
        }

        self.forms.push(copy.clone());
        self.current = copy;
        self.persist_forms()?;
        Ok(&self.current)
    }

    pub fn select_form(&mut self, form_id: &str) -> Result<&Form, WorkspaceError> {
        let form = self
            .find_form(form_id)
            .ok_or_else(|| WorkspaceError::FormNotFound(form_id.to_string()))?;
        self.current = form.clone();
        Ok(&self.current)
    }

    /// Appends a palette field to the current form.
    pub fn add_field(&mut self, field_type: FieldType) -> &Field {
        self.current.fields.push(Field::new(field_type));
        let index = self.current.fields.len() - 1;
        renumber(&mut self.current.fields);
        &self.current.fields[index]
    }

    /// Replaces a field's definition after checking it can be saved.
    pub fn update_field(&mut self, field_id: &str, mut field: Field) -> Result<(), WorkspaceError> {
        check_field(&field)?;
        let slot = self
            .current
            .fields
            .iter_mut()
            .find(|f| f.id == field_id)
            .ok_or_else(|| WorkspaceError::FieldNotFound(field_id.to_string()))?;
        field.id = field_id.to_string();
        *slot = field;
        Ok(())
    }

    pub fn delete_field(&mut self, field_id: &str) -> bool {
        let before = self.current.fields.len();
        self.current.fields.retain(|f| f.id != field_id);
        renumber(&mut self.current.fields);
        self.current.fields.len() != before
    }

    /// Appends a copy of a field, labelled `<label> (Copy)`.
    pub fn duplicate_field(&mut self, field_id: &str) -> Result<&Field, WorkspaceError> {
        let original = self
            .current
            .field(field_id)
            .ok_or_else(|| WorkspaceError::FieldNotFound(field_id.to_string()))?;

        let mut copy = original.clone();
        copy.id = new_id();
        copy.label = format!("{} (Copy)", original.label);
        copy.field_id = None;

        self.current.fields.push(copy);
        let index = self.current.fields.len() - 1;
        renumber(&mut self.current.fields);
        Ok(&self.current.fields[index])
    }

    /// Moves a field to `target_index`; indexes past the end move it last.
    pub fn move_field(&mut self, field_id: &str, target_index: usize) -> Result<(), WorkspaceError> {
        let from = self
            .current
            .fields
            .iter()
            .position(|f| f.id == field_id)
            .ok_or_else(|| WorkspaceError::FieldNotFound(field_id.to_string()))?;
        let field = self.current.fields.remove(from);
        let to = target_index.min(self.current.fields.len());
        self.current.fields.insert(to, field);
        renumber(&mut self.current.fields);
        Ok(())
    }

    /// Validates answers to the current form and, if they pass, records them.
    ///
    /// A form that has no id yet is only validated; nothing is stored.
    pub fn submit(&self, data: SubmissionData) -> Result<FormSubmission, SubmitError> {
        if self.current.fields.is_empty() {
            return Err(SubmitError::NoFields);
        }
        let errors = validate_all(&self.current, &data);
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        let submission = FormSubmission::new(data);
        if let Some(id) = &self.current.id {
            self.submission_store().append(id, submission.clone())?;
        }
        Ok(submission)
    }

    pub fn submissions(&self) -> Result<Vec<FormSubmission>, StoreError> {
        match &self.current.id {
            Some(id) => self.submission_store().list(id),
            None => Ok(Vec::new()),
        }
    }

    pub fn remove_submission(&self, submission_id: &str) -> Result<bool, StoreError> {
        match &self.current.id {
            Some(id) => self.submission_store().remove(id, submission_id),
            None => Ok(false),
        }
    }

    pub fn export_csv(&self) -> Result<Option<ExportFile>, WorkspaceError> {
        let submissions = self.submissions()?;
        Ok(export::to_csv(&self.current, &submissions)?)
    }

    pub fn export_json(&self) -> Result<ExportFile, WorkspaceError> {
        let submissions = self.submissions()?;
        Ok(export::to_json(&self.current, &submissions)?)
    }

    fn find_form(&self, form_id: &str) -> Option<&Form> {
        self.forms.iter().find(|f| f.id.as_deref() == Some(form_id))
    }

    fn repository(&self) -> FormRepository<&S> {
        FormRepository::new(&self.store)
    }

    fn submission_store(&self) -> SubmissionStore<&S> {
        SubmissionStore::new(&self.store)
    }

    fn persist_forms(&self) -> Result<(), StoreError> {
        self.repository().save(&self.forms)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Keeps every field's `sort_order` equal to its 1-based position.
fn renumber(fields: &mut [Field]) {
    for (index, field) in fields.iter_mut().enumerate() {
        field.sort_order = Some(index as i32 + 1);
    }
}
