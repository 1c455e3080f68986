//! Common-properties view shaping for the artifact detail pane

use crate::manifest::MODEL_ANNOTATION_PREFIX;
use chrono::DateTime;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Model annotation keys that stay visible among the common properties
pub const VISIBLE_MODEL_KEYS: [&str; 4] = [
    "org.cnai.model.title",
    "org.cnai.model.url",
    "org.cnai.model.created",
    "org.cnai.model.revision",
];

/// Short date-time form used by the console for the `created` property
const CREATED_FORMAT: &str = "%-m/%-d/%y, %-I:%M %p";

/// Flatten artifact attributes and annotations into display properties
///
/// Annotations override extra attributes on key collision. Object and
/// array values become compact JSON text, null becomes the empty string,
/// and scalars keep their natural text. The `created` property is
/// reformatted to the console's short date-time form when it parses as
/// RFC 3339. Model annotations outside [`VISIBLE_MODEL_KEYS`] are hidden.
/// The result is ordered by key.
pub fn common_properties(
    extra_attrs: &HashMap<String, Value>,
    annotations: &HashMap<String, String>,
) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();

    for (name, value) in extra_attrs {
        properties.insert(name.clone(), stringify(value));
    }
    for (name, value) in annotations {
        properties.insert(name.clone(), value.clone());
    }

    if let Some(created) = properties.get_mut("created") {
        *created = format_created(created);
    }

    properties.retain(|name, _| {
        !name.starts_with(MODEL_ANNOTATION_PREFIX) || VISIBLE_MODEL_KEYS.contains(&name.as_str())
    });

    properties
}

/// True when the merged property map has anything to show
pub fn has_properties(properties: &BTreeMap<String, String>) -> bool {
    !properties.is_empty()
}

/// Reformat an RFC 3339 timestamp to the short console form
///
/// Values that do not parse are passed through unchanged.
pub fn format_created(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => timestamp.format(CREATED_FORMAT).to_string(),
        Err(_) => value.to_string(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        // Objects and arrays render as compact JSON
        other => other.to_string(),
    }
}
