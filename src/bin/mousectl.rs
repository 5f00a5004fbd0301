//! mousectl - SteelSeries mouse configuration with JSON output.

use std::io;

use clap::{CommandFactory, Parser};
use serde::Serialize;

use deskctl::cli::{MouseCommand, MousectlCli};
use deskctl::commands::{self, ApplyResult, SettingsResult};
use deskctl::logging::init_logging;
use deskctl::mouse::open_first_mouse;
use deskctl::mouse::settings::SettingsStore;

fn main() {
    let cli = MousectlCli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        MouseCommand::Detect => output_json(&commands::cmd_detect(open_first_mouse())),
        MouseCommand::Battery => output_json(&commands::cmd_battery(open_first_mouse())),
        MouseCommand::Sensitivity { presets } => match SettingsStore::default_location() {
            Ok(store) => {
                output_json(&commands::cmd_set_sensitivity(open_first_mouse(), &store, &presets));
            }
            Err(e) => output_json(&ApplyResult { success: false, error: e.to_string() }),
        },
        MouseCommand::PollingRate { rate } => match SettingsStore::default_location() {
            Ok(store) => {
                output_json(&commands::cmd_set_polling_rate(open_first_mouse(), &store, rate));
            }
            Err(e) => output_json(&ApplyResult { success: false, error: e.to_string() }),
        },
        MouseCommand::Buttons { mappings } => match SettingsStore::default_location() {
            Ok(store) => {
                output_json(&commands::cmd_set_buttons(open_first_mouse(), &store, &mappings));
            }
            Err(e) => output_json(&ApplyResult { success: false, error: e.to_string() }),
        },
        MouseCommand::Reset => match SettingsStore::default_location() {
            Ok(store) => output_json(&commands::cmd_reset(open_first_mouse(), &store)),
            Err(e) => output_json(&ApplyResult { success: false, error: e.to_string() }),
        },
        MouseCommand::Settings => match SettingsStore::default_location() {
            Ok(store) => output_json(&commands::cmd_get_settings(open_first_mouse(), &store)),
            Err(e) => output_json(&SettingsResult {
                success: false,
                error: e.to_string(),
                ..SettingsResult::default()
            }),
        },
        MouseCommand::Completions { shell } => {
            clap_complete::generate(shell, &mut MousectlCli::command(), "mousectl", &mut io::stdout());
        }
    }
}

/// The one JSON document this process prints.
fn output_json<T: Serialize>(result: &T) {
    println!("{}", serde_json::to_string_pretty(result).unwrap());
}
