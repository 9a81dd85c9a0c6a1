//! Form field value lists.
//!
//! Entries look like the output of a client-side form serializer
//! (`[{name, value}, ...]`); unchecked checkboxes are absent, as with a browser
//! submit. Lists are often built from shared form definitions, so edits replace
//! the entry with a modified copy and never touch the shared original.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitValue {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubmitValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }
}

/// Value of the first entry named `name`.
pub fn read_submit_value<'a>(values: &'a [Arc<SubmitValue>], name: &str) -> Option<&'a str> {
    values
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.value.as_str())
}

/// Replace the first entry named `name` with a copy holding `value`. No-op if absent.
pub fn update_submit_value(values: &mut [Arc<SubmitValue>], name: &str, value: &str) {
    if let Some(slot) = values.iter_mut().find(|entry| entry.name == name) {
        let mut copy = SubmitValue::clone(slot);
        copy.value = value.to_string();
        *slot = Arc::new(copy);
    }
}

/// Replace the first entry whose value is `value` with a selected copy.
/// Returns false if no entry matches.
pub fn select_value(values: &mut [Arc<SubmitValue>], value: &str) -> bool {
    match values.iter_mut().find(|entry| entry.value == value) {
        Some(slot) => {
            let mut copy = SubmitValue::clone(slot);
            copy.selected = true;
            *slot = Arc::new(copy);
            true
        }
        None => false,
    }
}
