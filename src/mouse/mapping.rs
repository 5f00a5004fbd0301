//! Button-mapping string codec.
//!
//! The device protocol serializes button bindings as
//! `buttons(button1=action1; button2=action2; ...; layout=qwerty)`.
//! Writing translates generic modifier names to the protocol's left-hand
//! key convention; reading translates back and suppresses default bindings.

use std::collections::BTreeMap;

use crate::error::{DeskError, Result};

/// Generic UI name -> protocol key name, applied when serializing.
const WRITE_ALIASES: &[(&str, &str)] = &[
    ("Shift", "LeftShift"),
    ("Ctrl", "LeftCtrl"),
    ("Alt", "LeftAlt"),
];

/// Protocol key name -> generic UI name, applied when parsing.
/// RightAlt stays distinguishable and has no alias.
const READ_ALIASES: &[(&str, &str)] = &[
    ("LeftShift", "Shift"),
    ("RightShift", "Shift"),
    ("LeftCtrl", "Ctrl"),
    ("RightCtrl", "Ctrl"),
    ("LeftAlt", "Alt"),
];

fn write_alias(action: &str) -> &str {
    WRITE_ALIASES
        .iter()
        .find(|(from, _)| *from == action)
        .map_or(action, |(_, to)| *to)
}

fn read_alias(action: &str) -> &str {
    READ_ALIASES
        .iter()
        .find(|(from, _)| *from == action)
        .map_or(action, |(_, to)| *to)
}

/// The factory binding for a button identifier (lowercase `buttonN`).
///
/// Most buttons default to their own numeric action; `button6` is the DPI
/// toggle and `button7`..`button9` ship disabled.
pub fn default_action(button: &str) -> &str {
    match button {
        "button6" => "dpi",
        "button7" | "button8" | "button9" => "disabled",
        other => other,
    }
}

/// Serialize a mapping of `ButtonN` -> action into the protocol string.
///
/// Rejects actions containing `+`: the format carries single keys only,
/// not combinations.
pub fn serialize_mapping(mappings: &BTreeMap<String, String>) -> Result<String> {
    for action in mappings.values() {
        if action.contains('+') {
            return Err(DeskError::KeyCombination { action: action.clone() });
        }
    }

    let mut parts: Vec<String> = mappings
        .iter()
        .map(|(button, action)| format!("{}={}", button.to_lowercase(), write_alias(action)))
        .collect();
    parts.push("layout=qwerty".to_string());

    Ok(format!("buttons({})", parts.join("; ")))
}

/// Split a mapping string into lowercased-button/raw-action pairs.
///
/// `layout` and `scroll*` entries are dropped, as is anything that is not
/// a `buttonN` key. No default suppression happens here; the device encoder
/// needs every pair.
pub fn raw_pairs(mapping_str: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    let Some(rest) = mapping_str.strip_prefix("buttons(") else {
        return pairs;
    };
    let content = rest.strip_suffix(')').unwrap_or(rest);

    for part in content.split(';') {
        let part = part.trim();
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();

        if key == "layout" || key.starts_with("scroll") {
            continue;
        }
        if key.starts_with("button") {
            pairs.push((key, value.to_string()));
        }
    }

    pairs
}

/// Parse a mapping string into `ButtonN` -> display action, keeping only
/// non-default bindings.
pub fn parse_mapping(mapping_str: &str) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();

    for (key, value) in raw_pairs(mapping_str) {
        if value.to_lowercase() == default_action(&key) {
            continue;
        }

        let number = key.trim_start_matches("button");
        let normalized = format!("Button{number}");
        result.insert(normalized, read_alias(&value).to_string());
    }

    result
}
