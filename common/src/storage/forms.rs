use crate::model::form::Form;
use crate::storage::{KeyValueStore, StoreError};
use log::debug;

/// Key holding the list of every locally saved form.
pub const FORMS_KEY: &str = "formBuilderForms";

/// The locally saved form list, stored as a single document.
pub struct FormRepository<S> {
    store: S,
}

impl<S: KeyValueStore> FormRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Vec<Form>, StoreError> {
        match self.store.get(FORMS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn save(&self, forms: &[Form]) -> Result<(), StoreError> {
        self.store.set(FORMS_KEY, &serde_json::to_string(forms)?)?;
        debug!("Saved {} forms locally", forms.len());
        Ok(())
    }
}
