//! Translation bundles.
//!
//! A bundle is a JSON tree whose leaves are string templates. Keys are
//! dotted paths into the tree, e.g. `contact.form.name`.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

/// Immutable set of translated strings for one locale.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Bundle(Value);

impl Bundle {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self)
    }

    pub fn empty() -> Self {
        Self(Value::Object(Default::default()))
    }

    /// Walk the dotted path. Returns `None` if a segment is missing
    /// or the value at the end is not a string.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut current = &self.0;
        for part in key.split('.') {
            match current.get(part) {
                Some(v) => current = v,
                None => return None,
            }
        }
        current.as_str()
    }

    /// Every dotted key that resolves to a string, sorted.
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaves(&self.0, String::new(), &mut keys);
        keys.sort();
        keys
    }
}

fn collect_leaves(value: &Value, prefix: String, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let path = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", prefix, k)
                };
                collect_leaves(v, path, out);
            }
        }
        Value::String(_) => out.push(prefix),
        _ => {}
    }
}

/// Look up `key`, returning the key itself when missing.
///
/// Templates are returned as-is; use [`translate_with`] to fill `{var}`
/// placeholders.
pub fn translate(bundle: &Bundle, key: &str) -> String {
    match bundle.lookup(key) {
        Some(text) => text.to_string(),
        None => key.to_string(),
    }
}

/// Look up `key` and replace every `{name}` with the matching variable.
/// Placeholders without a variable become empty.
pub fn translate_with(bundle: &Bundle, key: &str, vars: &[(&str, &dyn Display)]) -> String {
    match bundle.lookup(key) {
        Some(template) => interpolate(template, vars),
        None => key.to_string(),
    }
}

fn interpolate(template: &str, vars: &[(&str, &dyn Display)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        // Placeholder names never span lines.
        match after.find(['}', '\n']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let name = &after[..close];
                if let Some((_, value)) = vars.iter().find(|(k, _)| *k == name) {
                    result.push_str(&value.to_string());
                }
                rest = &after[close + 1..];
            }
            _ => {
                result.push('{');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}
