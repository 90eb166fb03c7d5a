//! Enumerated "allow" values of string fields.
//!
//! Each field row owns an [`EnumeratedValues`] set. Users enter values as
//! chips: text typed into the row's allow input is committed once a word is
//! followed by a separator, see [`extract_chip`].

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;
use tracing::debug;

use crate::form::FieldRow;

static SEPARATED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+\W").expect("static regex must compile"));
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("static regex must compile"));

/// Insertion-ordered set of allowed string values.
///
/// # Examples
///
/// ```
/// use content_schema_editor::EnumeratedValues;
///
/// let mut values = EnumeratedValues::from_values(["red", "green", "red"]);
/// assert_eq!(values.to_vec(), vec!["red", "green"]);
///
/// assert!(!values.insert("green"));
/// assert_eq!(values.pop_last().as_deref(), Some("green"));
/// assert!(values.contains("red"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnumeratedValues {
    values: IndexSet<String>,
}

impl EnumeratedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `values`, collapsing duplicates.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Inserts a value. Returns `false` if it was already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        self.values.insert(value.into())
    }

    /// Removes a value, keeping the order of the others.
    pub fn remove(&mut self, value: &str) -> bool {
        self.values.shift_remove(value)
    }

    /// Removes and returns the most recently inserted value.
    pub fn pop_last(&mut self) -> Option<String> {
        self.values.pop()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.values.iter().cloned().collect()
    }
}

// Order matters: the last inserted value is the one removed by backspace.
impl PartialEq for EnumeratedValues {
    fn eq(&self, other: &Self) -> bool {
        self.values.iter().eq(other.values.iter())
    }
}

impl Eq for EnumeratedValues {}

/// Extracts the chip token from typed chip input.
///
/// Returns `None` while no word is followed by a separator (any non-word
/// character, typically a space or comma). Once one is, the whole buffer is
/// returned as a single token with every non-word character stripped. An
/// empty token is never produced.
///
/// # Examples
///
/// ```
/// use content_schema_editor::extract_chip;
///
/// assert_eq!(extract_chip("red, ").as_deref(), Some("red"));
/// assert_eq!(extract_chip("big-deal ").as_deref(), Some("bigdeal"));
/// assert_eq!(extract_chip("red"), None);
/// assert_eq!(extract_chip(", "), None);
/// ```
pub fn extract_chip(buffer: &str) -> Option<String> {
    if !SEPARATED_WORD.is_match(buffer) {
        return None;
    }
    let token: String = WORD.find_iter(buffer).map(|m| m.as_str()).collect();
    (!token.is_empty()).then_some(token)
}

impl FieldRow {
    /// Empties the allow set and the chip input buffer.
    pub fn clear_allow(&mut self) {
        self.allow.clear();
        if !self.input.allow_input.is_empty() {
            self.input.allow_input.clear();
        }
    }

    /// Removes the last chip unless the user is still typing one.
    pub fn remove_last_allow(&mut self) -> Option<String> {
        if !self.input.allow_input.is_empty() {
            return None;
        }
        self.allow.pop_last()
    }

    /// Commits the chip input buffer if it holds a separated token.
    ///
    /// Returns the committed token; the buffer is cleared when one was
    /// committed and left untouched otherwise.
    pub fn commit_allow_input(&mut self) -> Option<String> {
        let token = extract_chip(&self.input.allow_input)?;
        self.allow.insert(token.as_str());
        debug!(token = %token, "committed allow value");
        self.input.allow_input.clear();
        Some(token)
    }
}
