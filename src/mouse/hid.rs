//! Real mouse backend over hidapi.
//!
//! Commands are one-byte opcodes taken from the model's
//! [`Profile`](super::profile::Profile), written as output reports on the
//! control interface. The handle closes on drop, which covers every exit
//! path of a handler.

use hidapi::{HidApi, HidDevice};
use tracing::{debug, trace};

use super::mapping;
use super::profile::{self, Bounds, Profile, SensitivitySpec, STEELSERIES_VENDOR_ID};
use super::{BatteryStatus, MouseOperations};
use crate::error::{DeskError, Result};

/// Report length expected by the control interface, excluding the report ID.
const REPORT_LEN: usize = 64;

/// Milliseconds to wait for a battery telemetry response.
const BATTERY_READ_TIMEOUT_MS: i32 = 500;

/// Open the first connected supported mouse.
pub fn open_first_mouse() -> Result<HidMouse> {
    let api = HidApi::new().map_err(|e| DeskError::HidUnavailable(e.to_string()))?;

    let (candidate, prof) = api
        .device_list()
        .find_map(|d| {
            if d.vendor_id() != STEELSERIES_VENDOR_ID {
                return None;
            }
            profile::find_profile(d.product_id()).map(|p| (d, p))
        })
        .ok_or(DeskError::NoMouseFound)?;

    let raw_name = candidate
        .product_string()
        .map_or_else(|| prof.name.to_string(), ToString::to_string);

    debug!(name = %raw_name, product_id = %format!("{:04x}", prof.product_id), "opening mouse");

    let device = api
        .open_path(candidate.path())
        .map_err(|e| DeskError::DeviceOpenFailed {
            name: raw_name.clone(),
            reason: e.to_string(),
        })?;

    Ok(HidMouse {
        device,
        profile: prof,
        raw_name,
    })
}

/// An open handle to a supported mouse.
pub struct HidMouse {
    device: HidDevice,
    profile: &'static Profile,
    raw_name: String,
}

impl HidMouse {
    /// Write one command report: `[report_id, opcode, payload...]`, zero
    /// padded to the interface report length.
    fn write_command(&self, opcode: u8, payload: &[u8]) -> Result<()> {
        let mut report = Vec::with_capacity(REPORT_LEN + 1);
        report.push(0x00);
        report.push(opcode);
        report.extend_from_slice(payload);
        report.resize(REPORT_LEN + 1, 0x00);

        trace!(opcode = %format!("{opcode:#04x}"), len = payload.len(), "write command");
        self.device
            .write(&report)
            .map_err(|e| DeskError::DeviceCommunication(e.to_string()))?;
        Ok(())
    }

    fn check_bounds(&self, dpi: u16, bounds: Bounds) -> Result<()> {
        let ok = match bounds {
            Bounds::Range { min, max } => (min..=max).contains(&dpi),
            Bounds::Choices(choices) => choices.contains(&dpi),
        };
        if ok {
            Ok(())
        } else {
            Err(DeskError::DeviceCommunication(format!(
                "DPI {dpi} out of range for {} ({}-{})",
                self.profile.name,
                bounds.min(),
                bounds.max()
            )))
        }
    }

    /// Resolve an action name to its on-wire code.
    ///
    /// Numeric buttons map to themselves, `dpi`/`disabled` to their control
    /// codes, and single keys to USB HID usage IDs (left-hand modifier
    /// naming, as produced by [`mapping::serialize_mapping`]).
    fn action_code(action: &str) -> Result<u8> {
        let lower = action.to_lowercase();

        if let Some(n) = lower.strip_prefix("button").and_then(|n| n.parse::<u8>().ok()) {
            return Ok(n);
        }
        match lower.as_str() {
            "disabled" => return Ok(0x00),
            "dpi" => return Ok(0x30),
            "leftctrl" => return Ok(0xe0),
            "leftshift" => return Ok(0xe1),
            "leftalt" => return Ok(0xe2),
            "rightctrl" => return Ok(0xe4),
            "rightshift" => return Ok(0xe5),
            "rightalt" => return Ok(0xe6),
            _ => {}
        }

        let mut chars = lower.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ 'a'..='z'), None) => Ok(0x04 + (c as u8 - b'a')),
            (Some(c @ '1'..='9'), None) => Ok(0x1e + (c as u8 - b'1')),
            (Some('0'), None) => Ok(0x27),
            _ => Err(DeskError::DeviceCommunication(format!(
                "unknown button action '{action}'"
            ))),
        }
    }
}

impl MouseOperations for HidMouse {
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
        let Some(opcode) = self.profile.commands.battery else {
            return Ok(None);
        };

        self.write_command(opcode, &[])?;

        let mut buf = [0u8; REPORT_LEN];
        let read = self
            .device
            .read_timeout(&mut buf, BATTERY_READ_TIMEOUT_MS)
            .map_err(|e| DeskError::DeviceCommunication(e.to_string()))?;

        // An empty or out-of-range response means "unknown"; report full.
        if read < 2 || buf[0] > 100 {
            return Ok(Some(BatteryStatus { level: 100, is_charging: false }));
        }
        Ok(Some(BatteryStatus {
            level: buf[0],
            is_charging: buf[1] & 0x01 != 0,
        }))
    }

    fn set_sensitivity(&mut self, presets: &[u16]) -> Result<()> {
        let Some(opcode) = self.profile.commands.sensitivity else {
            return Err(DeskError::Unsupported { operation: "sensitivity adjustment" });
        };
        let Some(SensitivitySpec::Combined { bounds, max_presets }) = self.profile.sensitivity
        else {
            return Err(DeskError::Unsupported { operation: "combined sensitivity" });
        };

        if presets.is_empty() || presets.len() > usize::from(max_presets) {
            return Err(DeskError::DeviceCommunication(format!(
                "expected 1-{max_presets} DPI presets, got {}",
                presets.len()
            )));
        }
        for &dpi in presets {
            self.check_bounds(dpi, bounds)?;
        }

        #[allow(clippy::cast_possible_truncation)] // bounded by max_presets above
        let mut payload = vec![presets.len() as u8];
        for &dpi in presets {
            payload.extend_from_slice(&dpi.to_le_bytes());
        }
        self.write_command(opcode, &payload)
    }

    fn set_sensitivity_slot(&mut self, slot: u8, dpi: u16) -> Result<()> {
        let Some(opcode) = self.profile.commands.sensitivity else {
            return Err(DeskError::Unsupported { operation: "sensitivity adjustment" });
        };
        let Some(SensitivitySpec::PerSlot { slots, bounds }) = self.profile.sensitivity else {
            return Err(DeskError::Unsupported { operation: "per-slot sensitivity" });
        };

        if slot == 0 || slot > slots {
            return Err(DeskError::DeviceCommunication(format!(
                "sensitivity slot {slot} out of range (1-{slots})"
            )));
        }
        self.check_bounds(dpi, bounds)?;

        let mut payload = vec![slot];
        payload.extend_from_slice(&dpi.to_le_bytes());
        self.write_command(opcode, &payload)
    }

    fn set_polling_rate(&mut self, hz: u16) -> Result<()> {
        let Some(opcode) = self.profile.commands.polling_rate else {
            return Err(DeskError::Unsupported { operation: "polling rate adjustment" });
        };
        if !self.profile.polling_rates.contains(&hz) {
            return Err(DeskError::DeviceCommunication(format!(
                "unsupported polling rate {hz} Hz (supported: {:?})",
                self.profile.polling_rates
            )));
        }

        // The wire value is the 1000 Hz divisor: 1000 -> 1, 500 -> 2, ...
        #[allow(clippy::cast_possible_truncation)] // rates divide 1000
        let divisor = (1000 / hz) as u8;
        self.write_command(opcode, &[divisor])
    }

    fn set_buttons_mapping(&mut self, mapping_str: &str) -> Result<()> {
        let Some(opcode) = self.profile.commands.buttons else {
            return Err(DeskError::Unsupported { operation: "button mapping" });
        };

        // Start from factory defaults, overlay the supplied bindings, then
        // emit one action code per profile button in order.
        let overrides = mapping::raw_pairs(mapping_str);
        let mut payload = Vec::with_capacity(self.profile.buttons.len());
        for &button in self.profile.buttons {
            let action = overrides
                .iter()
                .find(|(k, _)| k == button)
                .map_or_else(|| mapping::default_action(button).to_string(), |(_, v)| v.clone());
            payload.push(Self::action_code(&action)?);
        }

        self.write_command(opcode, &payload)
    }

    fn reset_settings(&mut self) -> Result<()> {
        self.write_command(self.profile.commands.reset, &[])
    }

    fn save(&mut self) -> Result<()> {
        self.write_command(self.profile.commands.save, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_codes_for_buttons_and_controls() {
        assert_eq!(HidMouse::action_code("button1").unwrap(), 1);
        assert_eq!(HidMouse::action_code("Button9").unwrap(), 9);
        assert_eq!(HidMouse::action_code("disabled").unwrap(), 0x00);
        assert_eq!(HidMouse::action_code("dpi").unwrap(), 0x30);
    }

    #[test]
    fn action_codes_for_keys() {
        assert_eq!(HidMouse::action_code("LeftShift").unwrap(), 0xe1);
        assert_eq!(HidMouse::action_code("a").unwrap(), 0x04);
        assert_eq!(HidMouse::action_code("z").unwrap(), 0x1d);
        assert_eq!(HidMouse::action_code("1").unwrap(), 0x1e);
        assert_eq!(HidMouse::action_code("0").unwrap(), 0x27);
    }

    #[test]
    fn unknown_actions_are_rejected() {
        assert!(HidMouse::action_code("MediaPlay").is_err());
        assert!(HidMouse::action_code("").is_err());
    }
}
