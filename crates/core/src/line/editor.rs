//! Line editor.

use std::sync::Arc;

use dre_shared::types::{CategoryId, LineId, SectionId};
use tracing::{debug, error, info, warn};

use super::types::{DreLine, LineKind, LineRow, LineType};
use crate::catalog::{CatalogService, Category};
use crate::dialog::Dialog;
use crate::error::{DreError, Field, ValidationError};
use crate::hierarchy::ParentTree;
use crate::store::{
    Query, RecordStore, StoreError, Table, deactivate_record, from_record, save_record, to_record,
};

const DEFAULT_MAX_INDENT_LEVEL: i32 = 5;

/// Creates and edits the lines of one section, under an optional parent line.
///
/// The form keeps the category selection and formula while the type is
/// switched back and forth; only the payload of the type selected at save
/// time is written.
pub struct LineEditor {
    store: Arc<dyn RecordStore>,
    catalog: CatalogService,
    section_id: SectionId,
    parent_id: Option<LineId>,
    max_indent_level: i32,
    dialog: Dialog<DreLine>,
    categories: Vec<Category>,
    line_type: LineType,
    indent_level: i32,
    /// Name field.
    pub name: String,
    /// Code field.
    pub code: String,
    /// Selected categories, in selection order.
    pub category_ids: Vec<CategoryId>,
    /// Formula text, kept verbatim.
    pub formula: String,
    /// Percentage column flag.
    pub show_percentage: bool,
    /// Highlight color text; blank means none.
    pub highlight_color: String,
    /// Bold flag.
    pub is_bold: bool,
}

impl LineEditor {
    /// Creates a closed editor for lines of `section_id` under `parent_id`.
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        section_id: SectionId,
        parent_id: Option<LineId>,
    ) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            store,
            section_id,
            parent_id,
            max_indent_level: DEFAULT_MAX_INDENT_LEVEL,
            dialog: Dialog::Closed,
            categories: Vec::new(),
            line_type: LineType::Header,
            indent_level: 0,
            name: String::new(),
            code: String::new(),
            category_ids: Vec::new(),
            formula: String::new(),
            show_percentage: false,
            highlight_color: String::new(),
            is_bold: false,
        }
    }

    /// Sets the upper bound of the indent control.
    #[must_use]
    pub fn with_max_indent_level(mut self, max_indent_level: i32) -> Self {
        self.max_indent_level = max_indent_level.max(0);
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn dialog(&self) -> &Dialog<DreLine> {
        &self.dialog
    }

    /// Categories offered by the category picker, ordered by code.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Selected line type.
    #[must_use]
    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    /// Indent level as shown by the indent control.
    #[must_use]
    pub fn indent_level(&self) -> i32 {
        self.indent_level
    }

    /// Opens the editor with an empty header line.
    pub fn open_create(&mut self) {
        self.name.clear();
        self.code.clear();
        self.line_type = LineType::Header;
        self.category_ids.clear();
        self.formula.clear();
        self.indent_level = 0;
        self.show_percentage = false;
        self.highlight_color.clear();
        self.is_bold = false;
        self.dialog.open_create();
    }

    /// Opens the editor on an existing line.
    ///
    /// Category lines load the category picker right away.
    pub async fn open_edit(&mut self, line: DreLine) {
        self.name.clone_from(&line.name);
        self.code.clone_from(&line.code);
        self.line_type = LineType::Header;
        self.category_ids.clear();
        self.formula.clear();
        match &line.kind {
            LineKind::Category { category_ids } => self.category_ids.clone_from(category_ids),
            LineKind::Calculation { formula } => self.formula.clone_from(formula),
            _ => {}
        }
        self.indent_level = line.indent_level;
        self.show_percentage = line.show_percentage;
        self.highlight_color = line.highlight_color.clone().unwrap_or_default();
        self.is_bold = line.is_bold;
        let line_type = line.kind.line_type();
        self.dialog.open_edit(line);
        self.set_type(line_type).await;
    }

    /// Closes the editor without writing.
    pub fn cancel(&mut self) {
        self.dialog.close();
    }

    /// Switches the line type.
    ///
    /// Every switch into [`LineType::Category`] reloads the category list.
    pub async fn set_type(&mut self, line_type: LineType) {
        if line_type == LineType::Category && self.line_type != LineType::Category {
            self.load_categories().await;
        }
        self.line_type = line_type;
    }

    async fn load_categories(&mut self) {
        match self.catalog.categories().await {
            Ok(categories) => {
                debug!(count = categories.len(), "Loaded categories for line editor");
                self.categories = categories;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load categories");
                self.categories.clear();
            }
        }
    }

    /// Selects `id` if unselected, otherwise unselects it.
    pub fn toggle_category(&mut self, id: CategoryId) {
        if let Some(pos) = self.category_ids.iter().position(|c| *c == id) {
            self.category_ids.remove(pos);
        } else {
            self.category_ids.push(id);
        }
    }

    /// Sets the indent level, clamped to the control's range.
    pub fn set_indent_level(&mut self, level: i32) {
        self.indent_level = level.clamp(0, self.max_indent_level);
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

    /// Builds the line the form describes.
    pub fn build(&self) -> Result<DreLine, ValidationError> {
        self.validate()?;

        let kind = match self.line_type {
            LineType::Header => LineKind::Header,
            LineType::Category => LineKind::Category {
                category_ids: self.category_ids.clone(),
            },
            LineType::Calculation => LineKind::Calculation {
                formula: self.formula.clone(),
            },
            LineType::Indicator => LineKind::Indicator,
            LineType::Subtotal => LineKind::Subtotal,
            LineType::Total => LineKind::Total,
        };

        Ok(DreLine {
            id: self.dialog.editing().map(|l| l.id).unwrap_or_default(),
            name: self.name.clone(),
            code: self.code.clone(),
            kind,
            section_id: self.section_id,
            parent_id: self.parent_id,
            indent_level: self.indent_level,
            show_percentage: self.show_percentage,
            highlight_color: Some(self.highlight_color.clone()).filter(|c| !c.is_empty()),
            is_bold: self.is_bold,
            is_active: true,
        })
    }

    /// Validates and writes the line, then closes the editor.
    ///
    /// Editing a line re-checks its parent link against the other lines of
    /// the section; a link that would loop is rejected before any write.
    pub async fn save(&mut self) -> Result<DreLine, DreError> {
        if !self.dialog.is_open() {
            return Err(DreError::NotOpen);
        }
        let line = self.build()?;
        let existing = self.dialog.editing().map(|l| l.id);

        if existing.is_some() && line.parent_id.is_some() {
            let tree = self.section_tree().await.inspect_err(|e| {
                error!(error = %e, section_id = %self.section_id, "Failed to load section lines");
            })?;
            tree.ensure_acyclic(line.id, line.parent_id)?;
        }

        let saved = match self.write(existing, &line).await {
            Ok(saved) => saved,
            Err(e) => {
                error!(error = %e, line_id = %line.id, "Failed to save DRE line");
                return Err(e.into());
            }
        };

        info!(
            line_id = %saved.id,
            section_id = %saved.section_id,
            line_type = %saved.kind.line_type(),
            "DRE line saved"
        );
        self.dialog.close();
        Ok(saved)
    }

    async fn section_tree(&self) -> Result<ParentTree<LineId>, StoreError> {
        let query = Query::new().eq("section_id", self.section_id);
        let rows = self.store.query(Table::DreLines, &query).await?;
        let links = rows
            .into_iter()
            .map(|r| from_record::<LineRow>(Table::DreLines, r).map(|row| (row.id, row.parent_id)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ParentTree::from_links(links))
    }

    async fn write(&self, existing: Option<LineId>, line: &DreLine) -> Result<DreLine, StoreError> {
        let record = to_record(Table::DreLines, &LineRow::from(line))?;
        let saved = save_record(
            self.store.as_ref(),
            Table::DreLines,
            existing.map(LineId::into_inner),
            record,
        )
        .await?;
        Ok(from_record::<LineRow>(Table::DreLines, saved)?.into())
    }

    /// Marks a line inactive.
    pub async fn deactivate(&self, id: LineId) -> Result<DreLine, DreError> {
        let saved = deactivate_record(self.store.as_ref(), Table::DreLines, id.into_inner())
            .await
            .inspect_err(|e| error!(error = %e, line_id = %id, "Failed to deactivate DRE line"))?;
        Ok(from_record::<LineRow>(Table::DreLines, saved)?.into())
    }
}
