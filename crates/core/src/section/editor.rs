//! Section editor.

use std::sync::Arc;

use dre_shared::types::{CompanyId, SectionId, TemplateId};
use tracing::{error, info, warn};

use super::types::DreSection;
use crate::dialog::Dialog;
use crate::error::{DreError, Field, ValidationError};
use crate::store::{
    Query, RecordStore, StoreError, Table, deactivate_record, from_record, save_record, to_record,
};
use crate::template::DreTemplate;

/// Creates and edits DRE sections of one company.
pub struct SectionEditor {
    store: Arc<dyn RecordStore>,
    company_id: CompanyId,
    dialog: Dialog<DreSection>,
    templates: Vec<DreTemplate>,
    /// Name field.
    pub name: String,
    /// Code field.
    pub code: String,
    /// Selected template; `None` leaves the section unattached.
    pub template_id: Option<TemplateId>,
}

impl SectionEditor {
    /// Creates a closed editor for sections of `company_id`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, company_id: CompanyId) -> Self {
        Self {
            store,
            company_id,
            dialog: Dialog::Closed,
            templates: Vec::new(),
            name: String::new(),
            code: String::new(),
            template_id: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn dialog(&self) -> &Dialog<DreSection> {
        &self.dialog
    }

    /// Active templates offered by the template picker, ordered by name.
    #[must_use]
    pub fn templates(&self) -> &[DreTemplate] {
        &self.templates
    }

    /// Opens the editor with an empty form and loads the template picker.
    pub async fn open_create(&mut self) {
        self.name.clear();
        self.code.clear();
        self.template_id = None;
        self.dialog.open_create();
        self.load_templates().await;
    }

    /// Opens the editor on an existing section and loads the template picker.
    pub async fn open_edit(&mut self, section: DreSection) {
        self.name.clone_from(&section.name);
        self.code.clone_from(&section.code);
        self.template_id = section.template_id;
        self.dialog.open_edit(section);
        self.load_templates().await;
    }

    /// Closes the editor without writing.
    pub fn cancel(&mut self) {
        self.dialog.close();
    }

    // A failed fetch leaves the picker empty; the section can still be saved
    // without a template.
    async fn load_templates(&mut self) {
        let query = Query::new().eq("is_active", true).order_by("name");
        let loaded = self
            .store
            .query(Table::DreTemplates, &query)
            .await
            .and_then(|records| {
                records
                    .into_iter()
                    .map(|r| from_record::<DreTemplate>(Table::DreTemplates, r))
                    .collect::<Result<Vec<_>, _>>()
            });
        match loaded {
            Ok(templates) => self.templates = templates,
            Err(e) => {
                warn!(error = %e, "Failed to load DRE templates");
                self.templates.clear();
            }
        }
    }

    /// Checks the form.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required(Field::Name));
        }
        if self.code.trim().is_empty() {
            return Err(ValidationError::Required(Field::Code));
        }
        Ok(())
    }

    /// Validates and writes the section, then closes the editor.
    pub async fn save(&mut self) -> Result<DreSection, DreError> {
        if !self.dialog.is_open() {
            return Err(DreError::NotOpen);
        }
        self.validate()?;

        let existing = self.dialog.editing().map(|s| s.id);
        let section = DreSection {
            id: existing.unwrap_or_default(),
            name: self.name.clone(),
            code: self.code.clone(),
            company_id: self.company_id,
            template_id: self.template_id,
            is_active: true,
        };

        let saved = match self.write(existing, &section).await {
            Ok(saved) => saved,
            Err(e) => {
                error!(error = %e, section_id = %section.id, "Failed to save DRE section");
                return Err(e.into());
            }
        };

        info!(section_id = %saved.id, company_id = %saved.company_id, "DRE section saved");
        self.dialog.close();
        Ok(saved)
    }

    async fn write(
        &self,
        existing: Option<SectionId>,
        section: &DreSection,
    ) -> Result<DreSection, StoreError> {
        let record = to_record(Table::DreSections, section)?;
        let saved = save_record(
            self.store.as_ref(),
            Table::DreSections,
            existing.map(SectionId::into_inner),
            record,
        )
        .await?;
        from_record(Table::DreSections, saved)
    }

    /// Marks a section inactive.
    pub async fn deactivate(&self, id: SectionId) -> Result<DreSection, DreError> {
        let saved = deactivate_record(self.store.as_ref(), Table::DreSections, id.into_inner())
            .await
            .inspect_err(|e| error!(error = %e, section_id = %id, "Failed to deactivate DRE section"))?;
        Ok(from_record(Table::DreSections, saved)?)
    }
}
