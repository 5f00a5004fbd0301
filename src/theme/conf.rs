//! Sectioned key-value theme configuration.
//!
//! Parses the INI-style `.conf` files SDDM themes use, supports
//! section/key upserts, and serializes back in a canonical form:
//! `key = value` lines, one blank line after each section, comments
//! dropped. Re-rendering a document parsed from this writer's output is
//! byte-identical, which keeps repeat applies idempotent.

use std::fmt;

use crate::error::{DeskError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

/// An ordered, sectioned configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfDocument {
    sections: Vec<Section>,
}

impl ConfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from INI text. Keys are lowercased; `#` and `;` lines are
    /// comments; keys outside any section and duplicate sections or keys
    /// are errors.
    pub fn parse(text: &str) -> Result<Self> {
        let mut doc = Self::new();
        let mut current: Option<usize> = None;

        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim();
                if doc.sections.iter().any(|s| s.name == name) {
                    return Err(DeskError::ThemeConfig(format!(
                        "duplicate section [{name}] at line {}",
                        lineno + 1
                    )));
                }
                doc.sections.push(Section { name: name.to_string(), entries: Vec::new() });
                current = Some(doc.sections.len() - 1);
                continue;
            }

            let Some((key, value)) = line.split_once('=').or_else(|| line.split_once(':')) else {
                return Err(DeskError::ThemeConfig(format!(
                    "line {} is not a section header or key-value pair: {line:?}",
                    lineno + 1
                )));
            };
            let Some(idx) = current else {
                return Err(DeskError::ThemeConfig(format!(
                    "key before any section header at line {}",
                    lineno + 1
                )));
            };

            let key = key.trim().to_lowercase();
            let value = value.trim().to_string();
            let section = &mut doc.sections[idx];
            if section.entries.iter().any(|(k, _)| *k == key) {
                return Err(DeskError::ThemeConfig(format!(
                    "duplicate key '{key}' in section [{}] at line {}",
                    section.name,
                    lineno + 1
                )));
            }
            section.entries.push((key, value));
        }

        Ok(doc)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Upsert one value. Existing keys are overwritten in place; new keys
    /// append to their section; missing sections append to the document.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let key = key.to_lowercase();
        let value = value.into();

        let idx = match self.sections.iter().position(|s| s.name == section) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section { name: section.to_string(), entries: Vec::new() });
                self.sections.len() - 1
            }
        };

        let entries = &mut self.sections[idx].entries;
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => entries.push((key, value)),
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }
}

impl fmt::Display for ConfDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "{key} = {value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
