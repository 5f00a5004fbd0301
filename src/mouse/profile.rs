//! Static capability descriptors for supported SteelSeries mice.
//!
//! Each [`Profile`] enumerates what a model supports and the HID command
//! bytes used to drive it. Handlers branch on this data instead of probing
//! the device at runtime.

use serde::Serialize;

/// SteelSeries USB vendor ID.
pub const STEELSERIES_VENDOR_ID: u16 = 0x1038;

/// Value bounds for a sensitivity setting.
#[derive(Debug, Clone, Copy)]
pub enum Bounds {
    /// Continuous range in DPI.
    Range { min: u16, max: u16 },
    /// Discrete DPI choices, sorted ascending.
    Choices(&'static [u16]),
}

impl Bounds {
    pub fn min(&self) -> u16 {
        match self {
            Self::Range { min, .. } => *min,
            Self::Choices(c) => c.first().copied().unwrap_or(0),
        }
    }

    pub fn max(&self) -> u16 {
        match self {
            Self::Range { max, .. } => *max,
            Self::Choices(c) => c.last().copied().unwrap_or(0),
        }
    }
}

/// How a model exposes DPI presets.
#[derive(Debug, Clone, Copy)]
pub enum SensitivitySpec {
    /// One combined setter taking the whole preset list (newer mice).
    Combined { bounds: Bounds, max_presets: u8 },
    /// One setter per preset slot (`sensitivity1`, `sensitivity2`, ...).
    PerSlot { slots: u8, bounds: Bounds },
}

impl SensitivitySpec {
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Combined { bounds, .. } | Self::PerSlot { bounds, .. } => *bounds,
        }
    }
}

/// HID command identifiers for one model.
///
/// A `None` entry means the operation is absent from the device protocol;
/// the matching capability field on [`Profile`] is the authoritative flag.
#[derive(Debug, Clone, Copy)]
pub struct CommandSet {
    pub sensitivity: Option<u8>,
    pub polling_rate: Option<u8>,
    pub buttons: Option<u8>,
    pub save: u8,
    pub reset: u8,
    pub battery: Option<u8>,
}

/// Battery connection classification reported by `detect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Wireless,
    Bluetooth,
    Wired,
    Unknown,
}

impl ConnectionType {
    /// Classify from the raw product string. The wireless marker usually
    /// lives inside a parenthetical ("... (2.4 GHz)"), so classification
    /// runs on the unstripped name.
    pub fn classify(raw_name: &str) -> Self {
        let lower = raw_name.to_lowercase();
        if lower.contains("wireless") || lower.contains("2.4") {
            Self::Wireless
        } else if lower.contains("bluetooth") {
            Self::Bluetooth
        } else {
            Self::Wired
        }
    }
}

/// Capability descriptor for one supported mouse model.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub product_id: u16,
    pub name: &'static str,
    pub sensitivity: Option<SensitivitySpec>,
    /// Supported polling rates in Hz; empty when the model has none.
    pub polling_rates: &'static [u16],
    /// Remappable button identifiers; empty when remapping is unsupported.
    pub buttons: &'static [&'static str],
    pub has_battery: bool,
    pub commands: CommandSet,
}

impl Profile {
    pub const fn has_sensitivity(&self) -> bool {
        self.sensitivity.is_some()
    }

    pub const fn has_polling_rate(&self) -> bool {
        !self.polling_rates.is_empty()
    }

    pub const fn has_buttons(&self) -> bool {
        !self.buttons.is_empty()
    }
}

/// Look up the profile for a product ID, if the model is supported.
pub fn find_profile(product_id: u16) -> Option<&'static Profile> {
    PROFILES.iter().find(|p| p.product_id == product_id)
}

/// Supported models.
///
/// Command identifiers follow the vendor scheme of one-byte opcodes on the
/// control interface; `save` commits the active settings to onboard memory.
pub static PROFILES: &[Profile] = &[
    // Rival 3: combined sensitivity setter, wired only.
    Profile {
        product_id: 0x1824,
        name: "SteelSeries Rival 3",
        sensitivity: Some(SensitivitySpec::Combined {
            bounds: Bounds::Range { min: 100, max: 8500 },
            max_presets: 5,
        }),
        polling_rates: &[125, 250, 500, 1000],
        buttons: &["button1", "button2", "button3", "button4", "button5", "button6"],
        has_battery: false,
        commands: CommandSet {
            sensitivity: Some(0x0b),
            polling_rate: Some(0x04),
            buttons: Some(0x31),
            save: 0x09,
            reset: 0x08,
            battery: None,
        },
    },
    // Rival 110: older per-slot protocol with discrete DPI steps.
    Profile {
        product_id: 0x1729,
        name: "SteelSeries Rival 110",
        sensitivity: Some(SensitivitySpec::PerSlot {
            slots: 2,
            bounds: Bounds::Choices(&[200, 400, 800, 1200, 1600, 2400, 3200, 7200]),
        }),
        polling_rates: &[125, 250, 500, 1000],
        buttons: &["button1", "button2", "button3", "button4", "button5", "button6"],
        has_battery: false,
        commands: CommandSet {
            sensitivity: Some(0x03),
            polling_rate: Some(0x04),
            buttons: Some(0x31),
            save: 0x09,
            reset: 0x08,
            battery: None,
        },
    },
    // Aerox 3 Wireless in 2.4 GHz mode: combined setter, battery telemetry.
    Profile {
        product_id: 0x1838,
        name: "SteelSeries Aerox 3 Wireless (2.4 GHz)",
        sensitivity: Some(SensitivitySpec::Combined {
            bounds: Bounds::Range { min: 100, max: 18000 },
            max_presets: 5,
        }),
        polling_rates: &[125, 250, 500, 1000],
        buttons: &[
            "button1", "button2", "button3", "button4", "button5", "button6", "button7",
            "button8", "button9",
        ],
        has_battery: true,
        commands: CommandSet {
            sensitivity: Some(0x2d),
            polling_rate: Some(0x2b),
            buttons: Some(0x31),
            save: 0x11,
            reset: 0x08,
            battery: Some(0x92),
        },
    },
];
