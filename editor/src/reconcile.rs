//! Reconciliation of raw form state into a normalized schema draft.
//!
//! [`reconcile`] runs after every form change. It compares the candidate
//! form against the previously normalized draft, repairs the raw rows so
//! they respect the field invariants, and derives the draft together with
//! the display field candidates. Rows are processed in position order:
//!
//! 1. a row whose type or list type changed loses its allow values and
//!    pending chip text;
//! 2. a row that is not a list loses its list type;
//! 3. a string-valued row commits separated chip text;
//! 4. the normalized field carries `allow` only for string-valued rows with
//!    values;
//! 5. every named row becomes a display field candidate.

use content_schema_core::{FieldType, SchemaDraft, SelectOption};
use tracing::debug;

use crate::form::FormState;

/// Output of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub draft: SchemaDraft,
    pub display_fields: Vec<SelectOption>,
}

/// Normalizes `candidate` against `previous` and derives the new draft.
///
/// `previous` is the draft produced by the last pass, or `None` for the
/// first one. The candidate is modified in place: stale allow values, chip
/// text and list types are purged, and committed chips move from the text
/// buffer into the row's allow set.
///
/// # Examples
///
/// ```
/// use content_schema_core::FieldType;
/// use content_schema_editor::{FormState, reconcile};
///
/// let mut form = FormState::with_rows(1);
/// {
///     let row = form.row_mut(0).unwrap();
///     row.input.name = "color".into();
///     row.input.field_type = Some(FieldType::String);
///     row.input.allow_input = "red, ".into();
/// }
///
/// let first = reconcile(None, &mut form);
/// assert_eq!(first.draft.fields[0].allow, Some(vec!["red".to_string()]));
/// assert_eq!(first.display_fields[0].value, "color");
///
/// form.row_mut(0).unwrap().input.field_type = Some(FieldType::Html);
/// let second = reconcile(Some(&first.draft), &mut form);
/// assert_eq!(second.draft.fields[0].allow, None);
/// assert!(form.rows()[0].allow.is_empty());
/// ```
pub fn reconcile(previous: Option<&SchemaDraft>, candidate: &mut FormState) -> Reconciliation {
    let mut fields = Vec::with_capacity(candidate.row_count());
    let mut display_fields = Vec::new();

    for (index, row) in candidate.rows_mut().iter_mut().enumerate() {
        let prior = previous.and_then(|draft| draft.fields.get(index));
        if let Some(prior) = prior {
            if prior.field_type != row.input.field_type || prior.list_type != row.input.list_type {
                debug!(index, "field type changed, clearing allow values");
                row.clear_allow();
            }
        }

        if row.input.field_type != Some(FieldType::List) && row.input.list_type.take().is_some() {
            debug!(index, "purged list type from non-list field");
        }

        if row.input.is_string_valued() {
            row.commit_allow_input();
        }

        let field = row.to_field();
        if !field.name.is_empty() {
            display_fields.push(SelectOption::new(&field.name, &field.name));
        }
        fields.push(field);
    }

    let draft = SchemaDraft {
        name: candidate.name.clone(),
        container: candidate.container,
        description: candidate.description.clone(),
        display_field: candidate.display_field.clone(),
        segment_field: candidate.segment_field.clone(),
        url_fields: candidate.url_fields.clone(),
        fields,
    };

    Reconciliation {
        draft,
        display_fields,
    }
}
