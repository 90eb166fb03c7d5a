//! The schema editor state machine.
//!
//! [`SchemaEditor`] holds two slots: the candidate [`FormState`] the user
//! edits and the previously normalized [`SchemaDraft`]. Every mutation runs
//! [`reconcile`] over both, stores the result as the new previous draft and
//! notifies the change listeners. A mutation that leaves the form equal to
//! its last reconciled snapshot is dropped without re-running anything.

use content_schema_core::{
    FieldType, ListFieldType, SchemaDraft, SchemaReference, SelectOption, ValidationError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::allow::EnumeratedValues;
use crate::effects::{EntityFeed, SchemaEffects, sorted_feed};
use crate::error::{EditorError, Result};
use crate::event::EditEvent;
use crate::form::{FieldAttribute, FieldRow, FormState};
use crate::listeners::{Listeners, Subscription};
use crate::reconcile::{Reconciliation, reconcile};

/// Tunables of a new editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Number of blank field rows a new schema starts with.
    pub initial_field_rows: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            initial_field_rows: 1,
        }
    }
}

/// Headless editor for one schema draft.
///
/// # Examples
///
/// ```
/// use content_schema_core::FieldType;
/// use content_schema_editor::SchemaEditor;
///
/// let mut editor = SchemaEditor::new();
/// editor.set_name("product");
/// editor.set_field_name(0, "color").unwrap();
/// editor.set_field_label(0, "Color").unwrap();
/// editor.set_field_type(0, Some(FieldType::String)).unwrap();
/// editor.set_allow_input(0, "red, ").unwrap();
///
/// assert!(editor.allow_values_contain(0, "red").unwrap());
/// assert_eq!(editor.draft().fields[0].allow, Some(vec!["red".to_string()]));
/// assert!(editor.has_named_fields());
///
/// editor.set_display_field("color");
/// editor.set_segment_field("color");
/// editor.set_url_fields(vec!["color".into()]);
/// assert!(editor.is_valid());
/// ```
#[derive(Debug)]
pub struct SchemaEditor {
    form: FormState,
    previous: SchemaDraft,
    display_fields: Vec<SelectOption>,
    settled: Option<FormState>,
    listeners: Listeners,
}

impl Default for SchemaEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaEditor {
    /// Creates an editor for a new schema with default settings.
    pub fn new() -> Self {
        Self::with_settings(&EditorSettings::default())
    }

    /// Creates an editor for a new schema.
    pub fn with_settings(settings: &EditorSettings) -> Self {
        Self::from_form(FormState::with_rows(settings.initial_field_rows), SchemaDraft::default())
    }

    /// Creates an editor holding an existing schema, for updates.
    ///
    /// The loaded draft is the previous state, so nothing is purged until
    /// the user actually changes a field type.
    pub fn for_draft(draft: &SchemaDraft) -> Self {
        Self::from_form(FormState::from_draft(draft), draft.clone())
    }

    fn from_form(form: FormState, previous: SchemaDraft) -> Self {
        let mut editor = Self {
            form,
            previous,
            display_fields: Vec::new(),
            settled: None,
            listeners: Listeners::default(),
        };
        editor.refresh();
        editor
    }

    /// Replaces the edited schema with `draft`.
    pub fn load_draft(&mut self, draft: &SchemaDraft) {
        self.form = FormState::from_draft(draft);
        self.previous = draft.clone();
        self.settled = None;
        self.refresh();
    }

    /// Requests the schema and microschema feeds from `effects`.
    pub fn init(&self, effects: &mut dyn SchemaEffects) {
        info!("requesting schema and microschema feeds");
        effects.load_schemas();
        effects.load_microschemas();
    }

    /// Releases every change listener. Outstanding subscriptions become
    /// inert.
    pub fn close(self) {
        debug!(listeners = self.listeners.len(), "closing schema editor");
        self.listeners.clear();
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// The normalized draft of the current form.
    pub fn draft(&self) -> &SchemaDraft {
        &self.previous
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Candidates for the display field selector.
    pub fn display_fields(&self) -> &[SelectOption] {
        &self.display_fields
    }

    /// `true` if at least one row has a name.
    pub fn has_named_fields(&self) -> bool {
        !self.display_fields.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.form.is_valid()
    }

    pub fn validation_errors(&self) -> Vec<ValidationError> {
        self.form.validation_errors()
    }

    /// Whether another row has the same name or label as row `index`,
    /// ignoring case.
    pub fn field_has_duplicate_value(&self, index: usize, attribute: FieldAttribute) -> bool {
        self.form.has_duplicate_value(index, attribute)
    }

    /// Known schemas sorted by name.
    pub fn all_schemas(&self, feed: &dyn EntityFeed) -> Vec<SchemaReference> {
        sorted_feed(feed.all_schemas(), "schemas")
    }

    /// Known microschemas sorted by name.
    pub fn all_microschemas(&self, feed: &dyn EntityFeed) -> Vec<SchemaReference> {
        sorted_feed(feed.all_microschemas(), "microschemas")
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Registers `callback` for every future reconciliation.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use content_schema_editor::SchemaEditor;
    ///
    /// let mut editor = SchemaEditor::new();
    /// let seen = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&seen);
    /// let subscription = editor.subscribe(move |_| counter.set(counter.get() + 1));
    ///
    /// editor.set_name("page");
    /// editor.set_name("page"); // unchanged, not reported
    /// assert_eq!(seen.get(), 1);
    ///
    /// drop(subscription);
    /// editor.set_name("post");
    /// assert_eq!(seen.get(), 1);
    /// ```
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&Reconciliation) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    // ------------------------------------------------------------------
    // Top-level inputs
    // ------------------------------------------------------------------

    pub fn set_name(&mut self, name: &str) {
        self.form.name = name.to_string();
        self.refresh();
    }

    pub fn set_container(&mut self, container: bool) {
        self.form.container = container;
        self.refresh();
    }

    pub fn set_description(&mut self, description: &str) {
        self.form.description = description.to_string();
        self.refresh();
    }

    pub fn set_display_field(&mut self, field: &str) {
        self.form.display_field = field.to_string();
        self.refresh();
    }

    pub fn set_segment_field(&mut self, field: &str) {
        self.form.segment_field = field.to_string();
        self.refresh();
    }

    pub fn set_url_fields(&mut self, fields: Vec<String>) {
        self.form.url_fields = fields;
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Field rows
    // ------------------------------------------------------------------

    /// Appends a blank field row.
    pub fn add_field(&mut self) {
        self.form.push_row();
        self.refresh();
    }

    /// Removes the field row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::RowOutOfRange`] if there is no such row.
    pub fn remove_field_at(&mut self, index: usize) -> Result<()> {
        self.form.remove_row(index)?;
        // keep the previous draft aligned with the rows that remain
        if index < self.previous.fields.len() {
            self.previous.fields.remove(index);
        }
        self.refresh();
        Ok(())
    }

    /// Removes the last field row. Returns `false` if there were none.
    pub fn remove_last_field(&mut self) -> bool {
        match self.form.row_count() {
            0 => false,
            len => self.remove_field_at(len - 1).is_ok(),
        }
    }

    pub fn set_field_name(&mut self, index: usize, name: &str) -> Result<()> {
        self.update_row(index, |row| row.input.name = name.to_string())
    }

    pub fn set_field_label(&mut self, index: usize, label: &str) -> Result<()> {
        self.update_row(index, |row| row.input.label = label.to_string())
    }

    pub fn set_field_type(&mut self, index: usize, field_type: Option<FieldType>) -> Result<()> {
        self.update_row(index, |row| row.input.field_type = field_type)
    }

    pub fn set_field_required(&mut self, index: usize, required: bool) -> Result<()> {
        self.update_row(index, |row| row.input.required = required)
    }

    pub fn set_field_list_type(
        &mut self,
        index: usize,
        list_type: Option<ListFieldType>,
    ) -> Result<()> {
        self.update_row(index, |row| row.input.list_type = list_type)
    }

    // ------------------------------------------------------------------
    // Allow values
    // ------------------------------------------------------------------

    /// Updates the chip input text of a row. Separated text becomes a chip
    /// during the reconciliation this triggers.
    pub fn set_allow_input(&mut self, index: usize, text: &str) -> Result<()> {
        self.update_row(index, |row| row.input.allow_input = text.to_string())
    }

    /// Makes the allow set of row `index` exactly `values`.
    pub fn replace_allow_values(&mut self, index: usize, values: Vec<String>) -> Result<()> {
        self.update_row(index, |row| {
            row.allow = EnumeratedValues::from_values(values);
        })
    }

    /// Adds a value; adding a present value changes nothing.
    pub fn add_allow_value(&mut self, index: usize, value: &str) -> Result<()> {
        self.update_row(index, |row| {
            row.allow.insert(value);
        })
    }

    /// Removes a value if present.
    pub fn remove_allow_value(&mut self, index: usize, value: &str) -> Result<()> {
        self.update_row(index, |row| {
            row.allow.remove(value);
        })
    }

    /// Adds (`add == true`) or removes a value.
    pub fn toggle_allow_value(&mut self, index: usize, value: &str, add: bool) -> Result<()> {
        if add {
            self.add_allow_value(index, value)
        } else {
            self.remove_allow_value(index, value)
        }
    }

    /// Removes the most recent chip unless chip text is being typed.
    pub fn remove_last_allow_value(&mut self, index: usize) -> Result<Option<String>> {
        let mut removed = None;
        self.update_row(index, |row| removed = row.remove_last_allow())?;
        Ok(removed)
    }

    /// Empties the allow set and chip text of a row.
    pub fn clear_allow_values(&mut self, index: usize) -> Result<()> {
        self.update_row(index, FieldRow::clear_allow)
    }

    pub fn allow_values_contain(&self, index: usize, value: &str) -> Result<bool> {
        Ok(self.form.row(index)?.allow.contains(value))
    }

    /// Commits separated chip text of a string-valued row. Rows of other
    /// types keep their text uncommitted.
    pub fn on_allow_input_change(&mut self, index: usize) -> Result<Option<String>> {
        let mut committed = None;
        self.update_row(index, |row| {
            if row.input.is_string_valued() {
                committed = row.commit_allow_input();
            }
        })?;
        Ok(committed)
    }

    // ------------------------------------------------------------------
    // Events and submission
    // ------------------------------------------------------------------

    /// Applies one input event.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::RowOutOfRange`] for events naming a missing
    /// row.
    pub fn apply(&mut self, event: EditEvent) -> Result<()> {
        match event {
            EditEvent::SetName { value } => self.set_name(&value),
            EditEvent::SetContainer { value } => self.set_container(value),
            EditEvent::SetDescription { value } => self.set_description(&value),
            EditEvent::SetDisplayField { value } => self.set_display_field(&value),
            EditEvent::SetSegmentField { value } => self.set_segment_field(&value),
            EditEvent::SetUrlFields { values } => self.set_url_fields(values),
            EditEvent::AddField => self.add_field(),
            EditEvent::RemoveField { index } => self.remove_field_at(index)?,
            EditEvent::RemoveLastField => {
                self.remove_last_field();
            }
            EditEvent::SetFieldName { index, value } => self.set_field_name(index, &value)?,
            EditEvent::SetFieldLabel { index, value } => self.set_field_label(index, &value)?,
            EditEvent::SetFieldType { index, value } => self.set_field_type(index, value)?,
            EditEvent::SetFieldRequired { index, value } => {
                self.set_field_required(index, value)?
            }
            EditEvent::SetFieldListType { index, value } => {
                self.set_field_list_type(index, value)?
            }
            EditEvent::SetAllowInput { index, value } => self.set_allow_input(index, &value)?,
            EditEvent::ReplaceAllowValues { index, values } => {
                self.replace_allow_values(index, values)?
            }
            EditEvent::AddAllowValue { index, value } => self.add_allow_value(index, &value)?,
            EditEvent::RemoveAllowValue { index, value } => {
                self.remove_allow_value(index, &value)?
            }
            EditEvent::RemoveLastAllowValue { index } => {
                self.remove_last_allow_value(index)?;
            }
            EditEvent::ClearAllowValues { index } => self.clear_allow_values(index)?,
        }
        Ok(())
    }

    /// Hands the draft to `effects` for creation.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidDraft`] with every validation problem
    /// if the form is not valid; nothing is submitted then.
    pub fn create(&self, effects: &mut dyn SchemaEffects) -> Result<()> {
        let errors = self.validation_errors();
        if !errors.is_empty() {
            debug!(errors = errors.len(), "refusing to create invalid schema");
            return Err(EditorError::InvalidDraft(errors));
        }
        info!(schema = %self.previous.name, "creating schema");
        effects.create_schema(&self.previous);
        Ok(())
    }

    /// Requests deletion of the edited schema.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MissingSchemaName`] if the draft has no name.
    pub fn delete(&self, effects: &mut dyn SchemaEffects) -> Result<()> {
        let name = self.previous.name.trim();
        if name.is_empty() {
            return Err(EditorError::MissingSchemaName);
        }
        info!(schema = %name, "deleting schema");
        effects.delete_schema(name);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn update_row(&mut self, index: usize, update: impl FnOnce(&mut FieldRow)) -> Result<()> {
        update(self.form.row_mut(index)?);
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        if self.settled.as_ref() == Some(&self.form) {
            debug!("form unchanged, skipping reconciliation");
            return;
        }
        let result = reconcile(Some(&self.previous), &mut self.form);
        self.previous = result.draft.clone();
        self.display_fields = result.display_fields.clone();
        self.settled = Some(self.form.clone());
        self.listeners.notify(&result);
    }
}
