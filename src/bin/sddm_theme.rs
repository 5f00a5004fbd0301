//! sddm-theme - apply the generated color scheme to the SDDM login theme.

use std::process::exit;

use clap::Parser;
use tracing::error;

use deskctl::cli::ThemeCli;
use deskctl::logging::init_logging;
use deskctl::theme::{self, ApplyRequest, Gate, ThemePaths};

fn main() {
    let cli = match ThemeCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Bad usage exits 1, matching the missing-file exit code.
            let _ = e.print();
            exit(1);
        }
    };
    init_logging(0, false);

    // Under sudo, a caller outside the admin groups gets a clean exit with
    // no action and no message.
    if theme::sudo_gate() == Gate::SilentDeny {
        return;
    }

    let Ok(paths) = ThemePaths::system() else {
        exit(1);
    };
    let request =
        ApplyRequest { wallpaper: &cli.wallpaper, placeholder: cli.placeholder.as_deref() };

    if let Err(e) = theme::validate(&paths, &request) {
        error!(target: "deskctl", error = %e, "validation failed");
        exit(1);
    }
    if let Err(e) = theme::apply(&paths, &request) {
        error!(target: "deskctl", error = %e, "theme apply failed");
        exit(1);
    }
}
