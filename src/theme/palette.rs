//! Generated color palette document.
//!
//! A flat JSON mapping of named palette roles to color strings, produced by
//! the shell's material-color generator. Loaded once, read-only.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DeskError, Result};

/// Palette roles referenced by the theme color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Surface,
    PrimaryContainer,
    Outline,
    SurfaceContainer,
    SurfaceContainerHigh,
    Error,
}

/// The generated palette. Every field except `text` is required; unknown
/// roles in the document are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Palette {
    pub surface: String,
    pub on_surface: String,
    pub primary_container: String,
    #[allow(dead_code)] // required in the document, unused by the table
    pub secondary_container: String,
    pub text: Option<String>,
    pub outline: String,
    pub surface_container: String,
    pub surface_container_high: String,
    pub error: String,
}

impl Palette {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(DeskError::PaletteNotFound { path: path.display().to_string() });
        }
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DeskError::PaletteParse(e.to_string()))
    }

    /// The foreground text color, falling back to `on_surface` when the
    /// generator emitted no dedicated `text` role.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.on_surface)
    }

    pub fn role(&self, role: Role) -> &str {
        match role {
            Role::Surface => &self.surface,
            Role::PrimaryContainer => &self.primary_container,
            Role::Outline => &self.outline,
            Role::SurfaceContainer => &self.surface_container,
            Role::SurfaceContainerHigh => &self.surface_container_high,
            Role::Error => &self.error,
        }
    }
}
