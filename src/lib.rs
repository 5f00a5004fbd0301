//! deskctl - desktop companion utilities.
//!
//! Two single-shot CLI tools sharing one library:
//!
//! - `mousectl`: JSON-in/JSON-out configuration of SteelSeries mice over
//!   HID (detection, battery, DPI, polling rate, button remapping).
//! - `sddm-theme`: applies a generated color palette and wallpaper to an
//!   SDDM login theme's INI configuration.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod mouse;
pub mod theme;

pub use error::{DeskError, Result};
