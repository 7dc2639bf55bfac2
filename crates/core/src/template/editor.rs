//! Template editor.

use std::sync::Arc;

use dre_shared::types::TemplateId;
use tracing::{error, info};

use super::types::DreTemplate;
use crate::dialog::Dialog;
use crate::error::{DreError, Field, ValidationError};
use crate::store::{
    RecordStore, StoreError, Table, deactivate_record, from_record, save_record, to_record,
};

/// Creates and edits DRE templates.
pub struct TemplateEditor {
    store: Arc<dyn RecordStore>,
    dialog: Dialog<DreTemplate>,
    /// Name field.
    pub name: String,
    /// Description field; blank means no description.
    pub description: String,
}

impl TemplateEditor {
    /// Creates a closed editor writing to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            dialog: Dialog::Closed,
            name: String::new(),
            description: String::new(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn dialog(&self) -> &Dialog<DreTemplate> {
        &self.dialog
    }

    /// Opens the editor with an empty form.
    pub fn open_create(&mut self) {
        self.name.clear();
        self.description.clear();
        self.dialog.open_create();
    }

    /// Opens the editor on an existing template.
    pub fn open_edit(&mut self, template: DreTemplate) {
        self.name.clone_from(&template.name);
        self.description = template.description.clone().unwrap_or_default();
        self.dialog.open_edit(template);
    }

    /// Closes the editor without writing.
    pub fn cancel(&mut self) {
        self.dialog.close();
    }

    /// Checks the form.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required(Field::Name));
        }
        Ok(())
    }

    /// Validates and writes the template, then closes the editor.
    ///
    /// The template is written active. On failure the editor stays open
    /// and nothing is written.
    pub async fn save(&mut self) -> Result<DreTemplate, DreError> {
        if !self.dialog.is_open() {
            return Err(DreError::NotOpen);
        }
        self.validate()?;

        let existing = self.dialog.editing().map(|t| t.id);
        let template = DreTemplate {
            id: existing.unwrap_or_default(),
            name: self.name.clone(),
            description: Some(self.description.clone()).filter(|d| !d.trim().is_empty()),
            is_active: true,
        };

        let saved = match self.write(existing, &template).await {
            Ok(saved) => saved,
            Err(e) => {
                error!(error = %e, template_id = %template.id, "Failed to save DRE template");
                return Err(e.into());
            }
        };

        info!(template_id = %saved.id, updated = existing.is_some(), "DRE template saved");
        self.dialog.close();
        Ok(saved)
    }

    async fn write(
        &self,
        existing: Option<TemplateId>,
        template: &DreTemplate,
    ) -> Result<DreTemplate, StoreError> {
        let record = to_record(Table::DreTemplates, template)?;
        let saved = save_record(
            self.store.as_ref(),
            Table::DreTemplates,
            existing.map(TemplateId::into_inner),
            record,
        )
        .await?;
        from_record(Table::DreTemplates, saved)
    }

    /// Marks a template inactive.
    pub async fn deactivate(&self, id: TemplateId) -> Result<DreTemplate, DreError> {
        let saved = deactivate_record(self.store.as_ref(), Table::DreTemplates, id.into_inner())
            .await
            .inspect_err(|e| error!(error = %e, template_id = %id, "Failed to deactivate DRE template"))?;
        Ok(from_record(Table::DreTemplates, saved)?)
    }
}
