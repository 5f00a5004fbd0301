//! CLI argument definitions for both binaries.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mouse configuration CLI.
///
/// Every command prints one indented JSON object to stdout and exits 0;
/// failures are reported in the object's `error` field, not the exit code.
#[derive(Parser, Debug)]
#[command(name = "mousectl", version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct MousectlCli {
    /// Verbose logging to stderr (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: MouseCommand,
}

/// Available mouse commands.
#[derive(Subcommand, Debug)]
pub enum MouseCommand {
    /// Detect the connected SteelSeries mouse
    Detect,

    /// Get battery status
    Battery,

    /// Set sensitivity/DPI presets
    Sensitivity {
        /// Comma-separated DPI values (e.g., 800,1600,3200)
        presets: String,
    },

    /// Set polling rate
    PollingRate {
        /// Polling rate in Hz
        rate: u16,
    },

    /// Set button mappings
    Buttons {
        /// JSON object of button mappings (e.g., '{"Button1":"Shift"}')
        mappings: String,
    },

    /// Reset to factory defaults
    Reset,

    /// Get current settings
    Settings,

    /// Generate shell completions (plain text, not JSON)
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Theme applicator CLI.
#[derive(Parser, Debug)]
#[command(name = "sddm-theme", version)]
#[command(about = "Apply the generated color scheme to the SDDM login theme")]
pub struct ThemeCli {
    /// Wallpaper image to install as the login background
    pub wallpaper: PathBuf,

    /// Optional animated-background placeholder image
    pub placeholder: Option<PathBuf>,
}
