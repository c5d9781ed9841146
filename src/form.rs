use crate::catalog::Question;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current answer of one structured field.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    Set(Vec<String>),
}

impl FormValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            FormValue::Set(_) => None,
        }
    }

    pub fn contains(&self, option: &str) -> bool {
        match self {
            FormValue::Text(s) => s == option,
            FormValue::Set(items) => items.iter().any(|i| i == option),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FormState {
    values: BTreeMap<String, FormValue>,
}

impl FormState {
    /// Empty answers for every question: sets for checkbox fields, strings otherwise.
    pub fn from_questions(questions: &[Question]) -> Self {
        let values = questions
            .iter()
            .map(|q| {
                let empty = if q.kind.is_multi() {
                    FormValue::Set(Vec::new())
                } else {
                    FormValue::Text(String::new())
                };
                (q.id.to_string(), empty)
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, field_id: &str) -> Option<&FormValue> {
        self.values.get(field_id)
    }

    pub fn text(&self, field_id: &str) -> &str {
        self.get(field_id).and_then(FormValue::as_text).unwrap_or("")
    }

    pub fn set(&mut self, field_id: &str, value: impl Into<String>) {
        self.values
            .insert(field_id.to_string(), FormValue::Text(value.into()));
    }

    /// Adds or removes one option of a multi-select field. A field that
    /// currently holds a plain string is replaced by a set.
    pub fn toggle_in_set(&mut self, field_id: &str, option: &str, present: bool) {
        let entry = self
            .values
            .entry(field_id.to_string())
            .or_insert_with(|| FormValue::Set(Vec::new()));
        if let FormValue::Text(_) = entry {
            *entry = FormValue::Set(Vec::new());
        }
        let FormValue::Set(items) = entry else {
            return;
        };
        if present {
            if !items.iter().any(|i| i == option) {
                items.push(option.to_string());
            }
        } else {
            items.retain(|i| i != option);
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, FormValue> {
        self.values.clone()
    }
}
