use crate::model::submission::FormSubmission;
use crate::storage::{KeyValueStore, StoreError};
use log::debug;

/// Key holding the submission log of one form.
pub fn submissions_key(form_id: &str) -> String {
    format!("formSubmissions_{}", form_id)
}

/// Per-form, append-only submission logs.
pub struct SubmissionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SubmissionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Submissions of `form_id` in the order they were appended.
    pub fn list(&self, form_id: &str) -> Result<Vec<FormSubmission>, StoreError> {
        match self.store.get(&submissions_key(form_id))? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn append(&self, form_id: &str, submission: FormSubmission) -> Result<(), StoreError> {
        let mut submissions = self.list(form_id)?;
        submissions.push(submission);
        self.write(form_id, &submissions)
    }

    /// Drops the submission with `submission_id`. Returns whether one was found.
    pub fn remove(&self, form_id: &str, submission_id: &str) -> Result<bool, StoreError> {
        let mut submissions = self.list(form_id)?;
        let before = submissions.len();
        submissions.retain(|s| s.id != submission_id);
        if submissions.len() == before {
            return Ok(false);
        }
        self.write(form_id, &submissions)?;
        Ok(true)
    }

    /// Drops the whole log of `form_id`.
    pub fn clear(&self, form_id: &str) -> Result<(), StoreError> {
        self.store.remove(&submissions_key(form_id))
    }

    fn write(&self, form_id: &str, submissions: &[FormSubmission]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(submissions)?;
        self.store.set(&submissions_key(form_id), &raw)?;
        debug!("Stored {} submissions for form {}", submissions.len(), form_id);
        Ok(())
    }
}
