//! Participant roster and name extraction from JSON.

use crate::error::{Result, WheelError};
use serde_json::{Map, Value};

/// Keys whose string value is taken as a participant name, in priority order.
const NAME_KEYS: &[&str] = &[
    "name",
    "fullName",
    "full_name",
    "displayName",
    "display_name",
    "username",
    "userName",
    "login",
    "title",
];

const FIRST_NAME_KEYS: &[&str] = &["firstName", "first_name", "first", "givenName", "given_name"];
const LAST_NAME_KEYS: &[&str] = &["lastName", "last_name", "last", "familyName", "family_name", "surname"];

/// Sample names shown before the user edits the list.
pub const DEFAULT_NAMES: [&str; 50] = [
    "Oliver Smith", "Sophia Johnson", "Liam Williams", "Emma Brown", "Noah Jones",
    "Isabella Garcia", "James Miller", "Ava Martinez", "Lucas Davis", "Mia Rodriguez",
    "Mason Hernandez", "Amelia Lopez", "Elijah Wilson", "Harper Lee", "Logan White",
    "Evelyn Clark", "Aiden Walker", "Abigail Harris", "Jackson Young", "Emily King",
    "Ethan Wright", "Scarlett Scott", "Sebastian Green", "Victoria Adams", "Alexander Baker",
    "Ella Carter", "Jacob Gonzalez", "Penelope Mitchell", "Daniel Perez", "Luna Turner",
    "Matthew Phillips", "Chloe Roberts", "Henry Campbell", "Grace Parker", "Owen Evans",
    "Riley Edwards", "Samuel Collins", "Nora Stewart", "Benjamin Sanchez", "Zoey Morris",
    "William Morgan", "Hannah Bell", "Michael Rivera", "Lily Cooper", "Jack Richardson",
    "Layla Torres", "Luke Howard", "Aria Peterson", "David Bailey", "Zoe Murphy",
];

/// Ordered participant labels.
///
/// Order is significant: index `i` is segment `i` on the wheel. Every
/// mutation bumps [`revision`](Self::revision) so derived geometry can tell
/// it is stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    labels: Vec<String>,
    revision: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_names() -> Self {
        Self {
            labels: DEFAULT_NAMES.iter().map(|s| s.to_string()).collect(),
            revision: 0,
        }
    }

    /// Build a roster, rejecting blank labels.
    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels = labels
            .into_iter()
            .map(|l| normalize_label(l.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            labels,
            revision: 0,
        })
    }

    /// Build a roster from an arbitrary JSON document (see [`extract_names`]).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_labels(extract_names(&value))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn push(&mut self, label: &str) -> Result<()> {
        self.labels.push(normalize_label(label)?);
        self.touch();
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index >= self.labels.len() {
            return None;
        }
        let removed = self.labels.remove(index);
        self.touch();
        Some(removed)
    }

    /// Remove every entry equal to `label`; returns how many were removed.
    pub fn remove_label(&mut self, label: &str) -> usize {
        let before = self.labels.len();
        self.labels.retain(|l| l != label);
        let removed = before - self.labels.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    /// Replace the whole list (e.g. after an edit or a fetch).
    pub fn replace_all<I, S>(&mut self, labels: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fresh = Self::from_labels(labels)?;
        self.labels = fresh.labels;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn normalize_label(label: &str) -> Result<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(WheelError::EmptyLabel);
    }
    Ok(trimmed.to_string())
}

/// Heuristically pull name-like values out of arbitrary nested JSON.
///
/// - arrays of strings yield each non-blank string
/// - objects yield their first name-like key, or a first/last name pair
/// - nested arrays and objects are searched recursively (objects in key order)
pub fn extract_names(value: &Value) -> Vec<String> {
    let mut names = Vec::new();
    collect_names(value, &mut names);
    names
}

fn collect_names(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if !s.is_empty() {
                out.push(s.to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_names(item, out);
            }
        }
        Value::Object(map) => {
            if let Some(name) = name_from_object(map) {
                out.push(name);
                return;
            }
            for nested in map.values() {
                if nested.is_array() || nested.is_object() {
                    collect_names(nested, out);
                }
            }
        }
        _ => {}
    }
}

/// First non-blank string value among `keys`.
fn first_text<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| map.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn name_from_object(map: &Map<String, Value>) -> Option<String> {
    let first = first_text(map, FIRST_NAME_KEYS);
    let last = first_text(map, LAST_NAME_KEYS);
    if let (Some(first), Some(last)) = (first, last) {
        return Some(format!("{first} {last}"));
    }
    if let Some(name) = first_text(map, NAME_KEYS) {
        return Some(name.to_string());
    }
    // `name` may itself be an object such as {"first": .., "last": ..}.
    map.get("name")
        .and_then(Value::as_object)
        .and_then(name_from_object)
}
