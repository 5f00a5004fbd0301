//! Mock mouse implementation for testing without hardware.
//!
//! Records every operation for later assertion and supports error
//! injection to exercise handler failure paths.

use super::profile::{self, CommandSet, Profile, STEELSERIES_VENDOR_ID};
use super::{BatteryStatus, MouseOperations};
use crate::error::{DeskError, Result};

/// Recorded operation for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    SetSensitivity { presets: Vec<u16> },
    SetSensitivitySlot { slot: u8, dpi: u16 },
    SetPollingRate { hz: u16 },
    SetButtonsMapping { mapping: String },
    Reset,
    Save,
}

/// A model with no configurable settings, for unsupported-path tests.
pub static BARE_PROFILE: Profile = Profile {
    product_id: 0x0000,
    name: "SteelSeries Test Bare",
    sensitivity: None,
    polling_rates: &[],
    buttons: &[],
    has_battery: false,
    commands: CommandSet {
        sensitivity: None,
        polling_rate: None,
        buttons: None,
        save: 0x09,
        reset: 0x08,
        battery: None,
    },
};

/// Mock device recording operations instead of talking to hardware.
pub struct MockMouse {
    profile: &'static Profile,
    raw_name: String,
    battery: BatteryStatus,
    fail_message: Option<String>,
    operations: Vec<Operation>,
}

impl MockMouse {
    pub fn new(profile: &'static Profile) -> Self {
        Self {
            profile,
            raw_name: profile.name.to_string(),
            battery: BatteryStatus { level: 100, is_charging: false },
            fail_message: None,
            operations: Vec::new(),
        }
    }

    /// Wired model with a combined sensitivity setter (Rival 3).
    pub fn combined() -> Self {
        Self::new(profile::find_profile(0x1824).expect("Rival 3 profile"))
    }

    /// Older model with per-slot sensitivity setters (Rival 110).
    pub fn per_slot() -> Self {
        Self::new(profile::find_profile(0x1729).expect("Rival 110 profile"))
    }

    /// Wireless model with battery telemetry (Aerox 3 Wireless).
    pub fn wireless() -> Self {
        Self::new(profile::find_profile(0x1838).expect("Aerox 3 Wireless profile"))
    }

    /// Model with no configurable settings.
    pub fn bare() -> Self {
        Self::new(&BARE_PROFILE)
    }

    pub fn with_raw_name(mut self, name: impl Into<String>) -> Self {
        self.raw_name = name.into();
        self
    }

    pub fn with_battery(mut self, level: u8, is_charging: bool) -> Self {
        self.battery = BatteryStatus { level, is_charging };
        self
    }

    /// Make every mutating operation fail with the given message.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_message = Some(message.into());
        self
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn save_count(&self) -> usize {
        self.operations.iter().filter(|op| **op == Operation::Save).count()
    }

    fn record(&mut self, op: Operation) -> Result<()> {
        if let Some(message) = &self.fail_message {
            return Err(DeskError::DeviceCommunication(message.clone()));
        }
        self.operations.push(op);
        Ok(())
    }
}

impl MouseOperations for MockMouse {
    fn profile(&self) -> &'static Profile {
        self.profile
    }

    fn raw_name(&self) -> &str {
        &self.raw_name
    }

    fn vendor_id(&self) -> u16 {
        STEELSERIES_VENDOR_ID
    }

    fn product_id(&self) -> u16 {
        self.profile.product_id
    }

    fn battery(&mut self) -> Result<Option<BatteryStatus>> {
        if self.profile.has_battery {
            Ok(Some(self.battery))
        } else {
            Ok(None)
        }
    }

    fn set_sensitivity(&mut self, presets: &[u16]) -> Result<()> {
        if self.profile.sensitivity.is_none() {
            return Err(DeskError::Unsupported { operation: "sensitivity adjustment" });
        }
        self.record(Operation::SetSensitivity { presets: presets.to_vec() })
    }

    fn set_sensitivity_slot(&mut self, slot: u8, dpi: u16) -> Result<()> {
        if self.profile.sensitivity.is_none() {
            return Err(DeskError::Unsupported { operation: "sensitivity adjustment" });
        }
        self.record(Operation::SetSensitivitySlot { slot, dpi })
    }

    fn set_polling_rate(&mut self, hz: u16) -> Result<()> {
        if !self.profile.has_polling_rate() {
            return Err(DeskError::Unsupported { operation: "polling rate adjustment" });
        }
        self.record(Operation::SetPollingRate { hz })
    }

    fn set_buttons_mapping(&mut self, mapping: &str) -> Result<()> {
        if !self.profile.has_buttons() {
            return Err(DeskError::Unsupported { operation: "button mapping" });
        }
        self.record(Operation::SetButtonsMapping { mapping: mapping.to_string() })
    }

    fn reset_settings(&mut self) -> Result<()> {
        self.record(Operation::Reset)
    }

    fn save(&mut self) -> Result<()> {
        self.record(Operation::Save)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_records_operations_in_order() {
        let mut mock = MockMouse::combined();
        mock.set_sensitivity(&[800, 1600]).unwrap();
        mock.save().unwrap();

        assert_eq!(
            mock.operations(),
            &[
                Operation::SetSensitivity { presets: vec![800, 1600] },
                Operation::Save,
            ]
        );
        assert_eq!(mock.save_count(), 1);
    }

    #[test]
    fn failing_mock_records_nothing() {
        let mut mock = MockMouse::combined().failing("boom");
        assert!(mock.set_polling_rate(500).is_err());
        assert!(mock.operations().is_empty());
    }

    #[test]
    fn bare_mock_rejects_everything() {
        let mut mock = MockMouse::bare();
        assert!(mock.set_sensitivity(&[800]).is_err());
        assert!(mock.set_polling_rate(500).is_err());
        assert!(mock.set_buttons_mapping("buttons(layout=qwerty)").is_err());
    }
}
