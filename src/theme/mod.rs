//! Login-theme applicator.
//!
//! Copies the wallpaper (and optional animated-background placeholder) into
//! the theme, points the theme metadata at the managed configuration
//! profile, and merges palette-derived colors into it. Runs once and exits;
//! callers racing on the same files are out of scope.

pub mod conf;
pub mod palette;
pub mod table;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::error::{DeskError, Result};
use conf::ConfDocument;
use palette::Palette;
use table::{apply_table, RenderContext};

/// Installed location of the themed SDDM theme.
pub const THEME_DIR: &str = "/usr/share/sddm/themes/silent";

/// Managed configuration profile, relative to the theme directory.
const MANAGED_CONF: &str = "configs/illogical-impulse.conf";
/// Shipped template the managed profile is initialized from.
const DEFAULT_CONF: &str = "configs/silvia.conf";
/// Metadata line rewritten to activate the managed profile.
const METADATA_FROM: &str = "ConfigFile=configs/default.conf";
const METADATA_TO: &str = "ConfigFile=configs/illogical-impulse.conf";

/// Palette document location, relative to the state directory.
const PALETTE_REL: &str = "quickshell/user/generated/colors.json";

/// Groups whose members may rewrite the system theme under sudo.
const ADMIN_GROUPS: &[&str] = &["wheel", "sudo"];

/// Concrete file locations for one apply run.
#[derive(Debug, Clone)]
pub struct ThemePaths {
    pub theme_dir: PathBuf,
    pub backgrounds_dir: PathBuf,
    pub theme_conf: PathBuf,
    pub default_conf: PathBuf,
    pub metadata: PathBuf,
    pub palette: PathBuf,
}

impl ThemePaths {
    /// Paths rooted at an arbitrary theme directory (tests use a tempdir).
    pub fn rooted_at(theme_dir: impl Into<PathBuf>, palette: PathBuf) -> Self {
        let theme_dir = theme_dir.into();
        Self {
            backgrounds_dir: theme_dir.join("backgrounds"),
            theme_conf: theme_dir.join(MANAGED_CONF),
            default_conf: theme_dir.join(DEFAULT_CONF),
            metadata: theme_dir.join("metadata.desktop"),
            palette,
            theme_dir,
        }
    }

    /// The installed system theme plus the caller's palette location.
    pub fn system() -> Result<Self> {
        Ok(Self::rooted_at(THEME_DIR, default_palette_path()?))
    }
}

/// One apply invocation's inputs.
#[derive(Debug, Clone)]
pub struct ApplyRequest<'a> {
    pub wallpaper: &'a Path,
    pub placeholder: Option<&'a Path>,
}

/// Outcome of the sudo permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Allowed,
    /// Exit 0 with no action and no message; the gate does not reveal
    /// whether permission was the reason.
    SilentDeny,
}

/// When invoked under sudo, the invoking user must be a member of an admin
/// group. Any failure while checking denies silently.
pub fn sudo_gate() -> Gate {
    let Ok(user) = env::var("SUDO_USER") else {
        return Gate::Allowed;
    };
    match fs::read_to_string("/etc/group") {
        Ok(contents) if user_in_admin_group(&contents, &user) => Gate::Allowed,
        _ => Gate::SilentDeny,
    }
}

/// Membership check against `/etc/group` contents. Only explicit member
/// lists count; primary group membership does not.
pub fn user_in_admin_group(group_contents: &str, user: &str) -> bool {
    ADMIN_GROUPS
        .iter()
        .any(|group| members_of(group_contents, group).iter().any(|m| m.as_str() == user))
}

/// Member list of one group from `/etc/group` contents
/// (`name:pass:gid:member1,member2` records).
pub fn members_of(group_contents: &str, group: &str) -> Vec<String> {
    for line in group_contents.lines() {
        let mut fields = line.splitn(4, ':');
        if fields.next() != Some(group) {
            continue;
        }
        let members = fields.nth(2).unwrap_or("");
        return members
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(ToString::to_string)
            .collect();
    }
    Vec::new()
}

/// Home directory of a user per `/etc/passwd` contents.
pub fn home_from_passwd(passwd_contents: &str, user: &str) -> Option<PathBuf> {
    for line in passwd_contents.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        if fields.first() == Some(&user) {
            return fields.get(5).filter(|h| !h.is_empty()).map(PathBuf::from);
        }
    }
    None
}

fn resolve_home() -> Result<PathBuf> {
    if let Ok(user) = env::var("SUDO_USER") {
        let passwd = fs::read_to_string("/etc/passwd")?;
        return home_from_passwd(&passwd, &user)
            .ok_or_else(|| DeskError::Other(format!("no passwd entry for '{user}'")));
    }
    dirs::home_dir().ok_or_else(|| DeskError::Other("cannot resolve home directory".to_string()))
}

/// `$XDG_STATE_HOME` or `<home>/.local/state`, honoring `SUDO_USER`.
pub fn state_dir() -> Result<PathBuf> {
    match env::var("XDG_STATE_HOME") {
        Ok(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => Ok(resolve_home()?.join(".local/state")),
    }
}

/// Location of the generated palette document.
pub fn default_palette_path() -> Result<PathBuf> {
    Ok(state_dir()?.join(PALETTE_REL))
}

/// Precondition checks. Failures exit 1 from the binary with no mutation.
pub fn validate(paths: &ThemePaths, request: &ApplyRequest<'_>) -> Result<()> {
    if !request.wallpaper.is_file() {
        return Err(DeskError::ThemeConfig(format!(
            "wallpaper is not a file: {}",
            request.wallpaper.display()
        )));
    }
    if !paths.theme_dir.is_dir() {
        return Err(DeskError::ThemeConfig(format!(
            "theme directory missing: {}",
            paths.theme_dir.display()
        )));
    }
    if !paths.palette.is_file() {
        return Err(DeskError::PaletteNotFound { path: paths.palette.display().to_string() });
    }
    Ok(())
}

/// Wallpaper destination name, preserving the source extension.
fn background_file_name(wallpaper: &Path) -> String {
    wallpaper.extension().map_or_else(
        || "wallpaper".to_string(),
        |ext| format!("wallpaper.{}", ext.to_string_lossy()),
    )
}

/// Perform the apply. Assumes [`validate`] passed.
pub fn apply(paths: &ThemePaths, request: &ApplyRequest<'_>) -> anyhow::Result<()> {
    let background_file = background_file_name(request.wallpaper);

    fs::create_dir_all(&paths.backgrounds_dir).with_context(|| {
        format!("creating backgrounds directory {}", paths.backgrounds_dir.display())
    })?;
    fs::copy(request.wallpaper, paths.backgrounds_dir.join(&background_file))
        .with_context(|| format!("copying wallpaper {}", request.wallpaper.display()))?;
    debug!(file = %background_file, "wallpaper installed");

    let placeholder_file = match request.placeholder {
        Some(placeholder) if placeholder.is_file() => {
            let name = placeholder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .context("placeholder path has no file name")?;
            fs::copy(placeholder, paths.backgrounds_dir.join(&name))
                .with_context(|| format!("copying placeholder {}", placeholder.display()))?;
            debug!(file = %name, "placeholder installed");
            Some(name)
        }
        _ => None,
    };

    if !paths.theme_conf.is_file() {
        fs::copy(&paths.default_conf, &paths.theme_conf).with_context(|| {
            format!("initializing config from template {}", paths.default_conf.display())
        })?;
    }

    let metadata = fs::read_to_string(&paths.metadata)
        .with_context(|| format!("reading metadata {}", paths.metadata.display()))?;
    fs::write(&paths.metadata, metadata.replace(METADATA_FROM, METADATA_TO))
        .with_context(|| format!("updating metadata {}", paths.metadata.display()))?;

    let palette = Palette::load(&paths.palette)?;
    let conf_text = fs::read_to_string(&paths.theme_conf)
        .with_context(|| format!("reading theme config {}", paths.theme_conf.display()))?;
    let mut doc = ConfDocument::parse(&conf_text)?;

    let ctx = RenderContext {
        palette: &palette,
        background_file: &background_file,
        placeholder_file: placeholder_file.as_deref(),
    };
    apply_table(&mut doc, &ctx);

    fs::write(&paths.theme_conf, doc.to_string())
        .with_context(|| format!("writing theme config {}", paths.theme_conf.display()))?;
    debug!(path = %paths.theme_conf.display(), "theme config updated");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUP: &str = "\
root:x:0:
wheel:x:998:alice,bob
sudo:x:27:carol
users:x:100:
";

    const PASSWD: &str = "\
root:x:0:0::/root:/bin/bash
alice:x:1000:1000:Alice:/home/alice:/bin/zsh
nohome:x:1001:1001:::/bin/false
";

    #[test]
    fn members_of_splits_member_lists() {
        assert_eq!(members_of(GROUP, "wheel"), vec!["alice", "bob"]);
        assert_eq!(members_of(GROUP, "sudo"), vec!["carol"]);
        assert!(members_of(GROUP, "users").is_empty());
        assert!(members_of(GROUP, "missing").is_empty());
    }

    #[test]
    fn admin_group_check_ignores_primary_membership() {
        assert!(user_in_admin_group(GROUP, "alice"));
        assert!(user_in_admin_group(GROUP, "carol"));
        // root's primary group is root, not a member list entry
        assert!(!user_in_admin_group(GROUP, "root"));
        assert!(!user_in_admin_group(GROUP, "mallory"));
    }

    #[test]
    fn home_lookup_from_passwd() {
        assert_eq!(home_from_passwd(PASSWD, "alice"), Some(PathBuf::from("/home/alice")));
        assert_eq!(home_from_passwd(PASSWD, "nohome"), None);
        assert_eq!(home_from_passwd(PASSWD, "ghost"), None);
    }

    #[test]
    fn background_name_keeps_extension() {
        assert_eq!(background_file_name(Path::new("/tmp/pic.png")), "wallpaper.png");
        assert_eq!(background_file_name(Path::new("/tmp/pic.JPG")), "wallpaper.JPG");
        assert_eq!(background_file_name(Path::new("/tmp/noext")), "wallpaper");
    }
}
