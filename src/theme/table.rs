//! Declarative section/key color table for the login theme.
//!
//! Visual fidelity depends on binding the same palette roles to the same
//! UI elements the upstream theme expects, so the whole mapping lives here
//! as data and is applied mechanically.

use super::conf::ConfDocument;
use super::palette::{Palette, Role};

/// How one config value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSpec {
    /// Written verbatim.
    Literal(&'static str),
    /// A palette role, quoted.
    Role(Role),
    /// The text color (with `on_surface` fallback), quoted.
    Text,
    /// The copied wallpaper file name, quoted.
    Background,
    /// The placeholder file name unquoted, or `""` when absent.
    Placeholder,
}

#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub section: &'static str,
    pub key: &'static str,
    pub value: ValueSpec,
}

const fn entry(section: &'static str, key: &'static str, value: ValueSpec) -> Entry {
    Entry { section, key, value }
}

use Role::{Error, Outline, PrimaryContainer, Surface, SurfaceContainer, SurfaceContainerHigh};
use ValueSpec::{Background, Literal, Placeholder, Role as R, Text};

/// The full mapping: 19 sections, applied in order.
pub static COLOR_TABLE: &[Entry] = &[
    entry("General", "animated-background-placeholder", Placeholder),
    entry("LockScreen", "background", Background),
    entry("LockScreen", "background-color", R(Surface)),
    entry("LockScreen", "saturation", Literal("0.2")),
    entry("LockScreen.Clock", "color", Text),
    entry("LockScreen.Date", "color", Text),
    entry("LockScreen.Message", "color", Text),
    entry("LoginScreen", "background", Background),
    entry("LoginScreen", "background-color", R(Surface)),
    entry("LoginScreen.LoginArea.Avatar", "active-border-color", R(PrimaryContainer)),
    entry("LoginScreen.LoginArea.Avatar", "inactive-border-color", R(Outline)),
    entry("LoginScreen.LoginArea.Username", "color", Text),
    entry("LoginScreen.LoginArea.PasswordInput", "content-color", Text),
    entry("LoginScreen.LoginArea.PasswordInput", "background-color", R(SurfaceContainer)),
    entry("LoginScreen.LoginArea.PasswordInput", "border-color", R(Outline)),
    entry("LoginScreen.LoginArea.LoginButton", "background-color", R(Surface)),
    entry("LoginScreen.LoginArea.LoginButton", "active-background-color", R(PrimaryContainer)),
    entry("LoginScreen.LoginArea.LoginButton", "content-color", Text),
    entry("LoginScreen.LoginArea.LoginButton", "active-content-color", Text),
    entry("LoginScreen.LoginArea.LoginButton", "border-color", R(Outline)),
    entry("LoginScreen.LoginArea.Spinner", "color", Text),
    entry("LoginScreen.LoginArea.WarningMessage", "normal-color", Text),
    entry("LoginScreen.LoginArea.WarningMessage", "warning-color", R(PrimaryContainer)),
    entry("LoginScreen.LoginArea.WarningMessage", "error-color", R(Error)),
    entry("LoginScreen.MenuArea.Popups", "background-color", R(SurfaceContainerHigh)),
    entry("LoginScreen.MenuArea.Popups", "active-option-background-color", R(PrimaryContainer)),
    entry("LoginScreen.MenuArea.Popups", "content-color", Text),
    entry("LoginScreen.MenuArea.Popups", "active-content-color", Text),
    entry("LoginScreen.MenuArea.Popups", "border-color", R(Outline)),
    entry("LoginScreen.MenuArea.Session", "background-color", R(Surface)),
    entry("LoginScreen.MenuArea.Session", "content-color", Text),
    entry("LoginScreen.MenuArea.Session", "active-content-color", Text),
    entry("LoginScreen.MenuArea.Layout", "background-color", R(Surface)),
    entry("LoginScreen.MenuArea.Layout", "content-color", Text),
    entry("LoginScreen.MenuArea.Layout", "active-content-color", Text),
    entry("LoginScreen.MenuArea.Keyboard", "background-color", R(Surface)),
    entry("LoginScreen.MenuArea.Keyboard", "content-color", Text),
    entry("LoginScreen.MenuArea.Keyboard", "active-content-color", Text),
    entry("LoginScreen.MenuArea.Power", "background-color", R(Surface)),
    entry("LoginScreen.MenuArea.Power", "content-color", Text),
    entry("LoginScreen.MenuArea.Power", "active-content-color", Text),
    entry("LoginScreen.VirtualKeyboard", "background-color", R(Surface)),
    entry("LoginScreen.VirtualKeyboard", "key-content-color", Text),
    entry("LoginScreen.VirtualKeyboard", "key-color", R(SurfaceContainer)),
    entry("LoginScreen.VirtualKeyboard", "key-active-background-color", R(PrimaryContainer)),
    entry("LoginScreen.VirtualKeyboard", "selection-background-color", R(PrimaryContainer)),
    entry("LoginScreen.VirtualKeyboard", "selection-content-color", Text),
    entry("LoginScreen.VirtualKeyboard", "primary-color", R(PrimaryContainer)),
    entry("LoginScreen.VirtualKeyboard", "border-color", R(Outline)),
    entry("Tooltips", "enable", Literal("false")),
];

/// Inputs needed to turn a [`ValueSpec`] into a concrete value.
pub struct RenderContext<'a> {
    pub palette: &'a Palette,
    /// File name of the copied wallpaper, e.g. `wallpaper.png`.
    pub background_file: &'a str,
    /// File name of the copied placeholder, when one was supplied.
    pub placeholder_file: Option<&'a str>,
}

/// Resolve one spec against the render context.
pub fn resolve(spec: ValueSpec, ctx: &RenderContext<'_>) -> String {
    match spec {
        ValueSpec::Literal(v) => v.to_string(),
        ValueSpec::Role(role) => format!("\"{}\"", ctx.palette.role(role)),
        ValueSpec::Text => format!("\"{}\"", ctx.palette.text()),
        ValueSpec::Background => format!("\"{}\"", ctx.background_file),
        ValueSpec::Placeholder => {
            ctx.placeholder_file.map_or_else(|| "\"\"".to_string(), ToString::to_string)
        }
    }
}

/// Upsert every table entry into the document.
pub fn apply_table(doc: &mut ConfDocument, ctx: &RenderContext<'_>) {
    for e in COLOR_TABLE {
        doc.set(e.section, e.key, resolve(e.value, ctx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette::from_json(
            r##"{
            "surface": "#141318",
            "on_surface": "#e6e1e9",
            "primary_container": "#4f378a",
            "secondary_container": "#4a4458",
            "outline": "#948f99",
            "surface_container": "#211f26",
            "surface_container_high": "#2b292f",
            "error": "#ffb4ab"
        }"##,
        )
        .unwrap()
    }

    #[test]
    fn table_covers_all_nineteen_sections() {
        let mut sections: Vec<&str> = COLOR_TABLE.iter().map(|e| e.section).collect();
        sections.dedup();
        sections.sort_unstable();
        sections.dedup();
        assert_eq!(sections.len(), 19);
    }

    #[test]
    fn table_has_no_duplicate_section_key_pairs() {
        for (i, a) in COLOR_TABLE.iter().enumerate() {
            for b in &COLOR_TABLE[i + 1..] {
                assert!(
                    !(a.section == b.section && a.key == b.key),
                    "duplicate {}/{}",
                    a.section,
                    a.key
                );
            }
        }
    }

    #[test]
    fn resolve_quotes_palette_roles_and_background() {
        let p = palette();
        let ctx = RenderContext {
            palette: &p,
            background_file: "wallpaper.png",
            placeholder_file: None,
        };
        assert_eq!(resolve(ValueSpec::Role(Role::Surface), &ctx), "\"#141318\"");
        assert_eq!(resolve(ValueSpec::Text, &ctx), "\"#e6e1e9\"");
        assert_eq!(resolve(ValueSpec::Background, &ctx), "\"wallpaper.png\"");
        assert_eq!(resolve(ValueSpec::Literal("0.2"), &ctx), "0.2");
    }

    #[test]
    fn placeholder_resolves_to_name_or_empty_quotes() {
        let p = palette();
        let with = RenderContext {
            palette: &p,
            background_file: "wallpaper.png",
            placeholder_file: Some("placeholder.gif"),
        };
        let without =
            RenderContext { palette: &p, background_file: "wallpaper.png", placeholder_file: None };
        assert_eq!(resolve(ValueSpec::Placeholder, &with), "placeholder.gif");
        assert_eq!(resolve(ValueSpec::Placeholder, &without), "\"\"");
    }

    #[test]
    fn apply_table_fills_a_fresh_document() {
        let p = palette();
        let ctx =
            RenderContext { palette: &p, background_file: "wallpaper.jpg", placeholder_file: None };
        let mut doc = ConfDocument::new();
        apply_table(&mut doc, &ctx);

        assert_eq!(doc.get("LockScreen", "background"), Some("\"wallpaper.jpg\""));
        assert_eq!(doc.get("LockScreen", "saturation"), Some("0.2"));
        assert_eq!(doc.get("LoginScreen.MenuArea.Power", "background-color"), Some("\"#141318\""));
        assert_eq!(doc.get("Tooltips", "enable"), Some("false"));
    }
}
