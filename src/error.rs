//! Error types for deskctl operations.

use thiserror::Error;

/// Primary error type for deskctl operations.
#[derive(Error, Debug)]
pub enum DeskError {
    // Mouse errors
    #[error("No SteelSeries mouse detected.\nMake sure your mouse is connected and udev rules are installed.")]
    NoMouseFound,

    #[error("HID backend unavailable: {0}")]
    HidUnavailable(String),

    #[error("Failed to open device '{name}': {reason}")]
    DeviceOpenFailed { name: String, reason: String },

    #[error("Device communication error: {0}")]
    DeviceCommunication(String),

    #[error("Device does not support {operation}")]
    Unsupported { operation: &'static str },

    #[error("Key combinations like '{action}' are not supported. Only single keys are allowed.")]
    KeyCombination { action: String },

    // Theme errors
    #[error("Palette file not found: {path}")]
    PaletteNotFound { path: String },

    #[error("Palette parse error: {0}")]
    PaletteParse(String),

    #[error("Theme configuration error: {0}")]
    ThemeConfig(String),

    // Input errors
    #[error("Invalid DPI list '{input}': expected comma-separated integers (e.g., 800,1600,3200)")]
    InvalidDpiList { input: String },

    #[error("Invalid button mapping '{input}': expected a JSON object of button to action")]
    InvalidButtonMapping { input: String },

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl DeskError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoMouseFound
                | Self::Unsupported { .. }
                | Self::KeyCombination { .. }
                | Self::PaletteNotFound { .. }
                | Self::InvalidDpiList { .. }
                | Self::InvalidButtonMapping { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NoMouseFound => Some("Check the USB connection and udev rules"),
            Self::HidUnavailable(_) => {
                Some("Ensure hidraw is available and permissions allow access")
            }
            Self::InvalidDpiList { .. } => Some("Use comma-separated integers, e.g. 800,1600,3200"),
            Self::InvalidButtonMapping { .. } => {
                Some("Pass a JSON object, e.g. '{\"Button1\":\"Shift\"}'")
            }
            _ => None,
        }
    }

}

/// Convenience type alias for Results using DeskError.
pub type Result<T> = std::result::Result<T, DeskError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| DeskError::Other(format!("{}: {e}", f().into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_mouse_error_is_user_recoverable_with_hint() {
        assert!(DeskError::NoMouseFound.is_user_recoverable());
        assert!(DeskError::NoMouseFound.suggestion().is_some());
        assert!(!DeskError::DeviceCommunication("timeout".into()).is_user_recoverable());
    }

    #[test]
    fn suggestions_cover_user_recoverable_input_errors() {
        let err = DeskError::InvalidDpiList { input: "abc".into() };
        assert!(err.is_user_recoverable());
        assert!(err.suggestion().is_some());
    }
}
