//! Handler tests against the mock mouse.
//!
//! Verify the JSON result shapes, capability branching, and that
//! persistence runs exactly once per mutating command.

use deskctl::commands::{
    cmd_battery, cmd_detect, cmd_get_settings, cmd_reset, cmd_set_buttons, cmd_set_polling_rate,
    cmd_set_sensitivity,
};
use deskctl::error::DeskError;
use deskctl::mouse::mock::{MockMouse, Operation};
use deskctl::mouse::settings::SettingsStore;
use tempfile::TempDir;

fn temp_store() -> (TempDir, SettingsStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = SettingsStore::new(dir.path());
    (dir, store)
}

// === detect ===

#[test]
fn detect_without_device_reports_udev_hint() {
    let result = cmd_detect::<MockMouse>(Err(DeskError::NoMouseFound));
    assert!(!result.available);
    assert!(result.needs_udev_install);
    assert!(!result.error.is_empty());
}

#[test]
fn detect_with_unavailable_backend_has_no_udev_hint() {
    let result = cmd_detect::<MockMouse>(Err(DeskError::HidUnavailable("no hidraw".into())));
    assert!(!result.available);
    assert!(!result.needs_udev_install);
    assert!(result.error.contains("no hidraw"));
}

#[test]
fn detect_reports_identity_and_capabilities() {
    let result = cmd_detect(Ok(MockMouse::wireless().with_battery(73, true)));

    assert!(result.available);
    assert_eq!(result.error, "");
    // annotations stripped for display, used for classification
    assert_eq!(result.device.name, "SteelSeries Aerox 3 Wireless");
    assert_eq!(result.device.vendor_id, "1038");
    assert_eq!(result.device.product_id, "1838");
    assert_eq!(result.device.pid, "1038_1838");
    assert_eq!(
        serde_json::to_value(&result.device).unwrap()["connection_type"],
        "wireless"
    );

    assert!(result.battery.supported);
    assert_eq!(result.battery.level, 73);
    assert!(result.battery.is_charging);

    assert!(result.capabilities.has_sensitivity);
    assert!(result.capabilities.has_polling_rate);
    assert!(result.capabilities.has_buttons);
    assert_eq!(result.capabilities.sensitivity_range.min, 100);
    assert_eq!(result.capabilities.sensitivity_range.max, 18000);
    assert_eq!(result.capabilities.polling_rates, vec![125, 250, 500, 1000]);
    assert_eq!(result.capabilities.buttons.len(), 9);
}

#[test]
fn detect_classifies_bluetooth_from_raw_name() {
    let mock = MockMouse::wireless().with_raw_name("SteelSeries Aerox 3 (Bluetooth)");
    let result = cmd_detect(Ok(mock));
    assert_eq!(result.device.name, "SteelSeries Aerox 3");
    assert_eq!(
        serde_json::to_value(&result.device).unwrap()["connection_type"],
        "bluetooth"
    );
}

#[test]
fn detect_wired_device_without_battery() {
    let result = cmd_detect(Ok(MockMouse::combined()));
    assert!(result.available);
    assert!(!result.battery.supported);
    assert_eq!(result.battery.level, 100);
    assert_eq!(
        serde_json::to_value(&result.device).unwrap()["connection_type"],
        "wired"
    );
    // per-slot choices report their sorted extremes
    let per_slot = cmd_detect(Ok(MockMouse::per_slot()));
    assert_eq!(per_slot.capabilities.sensitivity_range.min, 200);
    assert_eq!(per_slot.capabilities.sensitivity_range.max, 7200);
}

// === battery ===

#[test]
fn battery_on_wireless_device() {
    let result = cmd_battery(Ok(MockMouse::wireless().with_battery(42, false)));
    assert!(result.supported);
    assert_eq!(result.level, 42);
    assert!(!result.is_charging);
    assert_eq!(result.error, "");
}

#[test]
fn battery_on_wired_device_is_unsupported_but_not_an_error() {
    let result = cmd_battery(Ok(MockMouse::combined()));
    assert!(!result.supported);
    assert_eq!(result.level, 100);
    assert_eq!(result.error, "");
}

#[test]
fn battery_without_device_reports_error() {
    let result = cmd_battery::<MockMouse>(Err(DeskError::NoMouseFound));
    assert!(!result.supported);
    assert!(!result.error.is_empty());
}

// === sensitivity ===

#[test]
fn sensitivity_combined_applies_then_saves_once() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::combined();

    let result = cmd_set_sensitivity(Ok(&mut mock), &store, "800,1600,3200");
    assert!(result.success, "{}", result.error);

    assert_eq!(
        mock.operations(),
        &[
            Operation::SetSensitivity { presets: vec![800, 1600, 3200] },
            Operation::Save,
        ]
    );
    assert_eq!(mock.save_count(), 1);

    let doc = store.load(0x1038, 0x1824);
    assert_eq!(doc.sensitivity(), vec![800, 1600, 3200]);
}

#[test]
fn sensitivity_per_slot_applies_each_preset_in_order() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::per_slot();

    let result = cmd_set_sensitivity(Ok(&mut mock), &store, "400,800");
    assert!(result.success, "{}", result.error);

    assert_eq!(
        mock.operations(),
        &[
            Operation::SetSensitivitySlot { slot: 1, dpi: 400 },
            Operation::SetSensitivitySlot { slot: 2, dpi: 800 },
            Operation::Save,
        ]
    );

    let doc = store.load(0x1038, 0x1729);
    assert_eq!(doc.sensitivity(), vec![400, 800]);
}

#[test]
fn sensitivity_per_slot_ignores_presets_beyond_slots() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::per_slot();

    let result = cmd_set_sensitivity(Ok(&mut mock), &store, "400,800,1200,1600");
    assert!(result.success);
    // two slots, two applies, one save
    assert_eq!(mock.operations().len(), 3);
    assert_eq!(mock.save_count(), 1);
}

#[test]
fn sensitivity_unsupported_fails_without_persisting() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::bare();

    let result = cmd_set_sensitivity(Ok(&mut mock), &store, "800,1600,3200");
    assert!(!result.success);
    assert!(result.error.contains("does not support sensitivity"));
    assert_eq!(mock.save_count(), 0);
    assert!(mock.operations().is_empty());
    assert!(!store.path_for(0x1038, 0x0000).exists());
}

#[test]
fn sensitivity_invalid_input_fails_before_touching_device() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::combined();

    let result = cmd_set_sensitivity(Ok(&mut mock), &store, "fast,faster");
    assert!(!result.success);
    assert!(result.error.contains("Invalid DPI list"));
    assert!(mock.operations().is_empty());
}

#[test]
fn sensitivity_without_device_reports_error() {
    let (_dir, store) = temp_store();
    let result = cmd_set_sensitivity::<MockMouse>(Err(DeskError::NoMouseFound), &store, "800");
    assert!(!result.success);
    assert!(!result.error.is_empty());
}

// === polling rate ===

#[test]
fn polling_rate_applies_and_saves() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::combined();

    let result = cmd_set_polling_rate(Ok(&mut mock), &store, 500);
    assert!(result.success, "{}", result.error);
    assert_eq!(
        mock.operations(),
        &[Operation::SetPollingRate { hz: 500 }, Operation::Save]
    );
    assert_eq!(store.load(0x1038, 0x1824).polling_rate(), Some(500));
}

#[test]
fn polling_rate_unsupported_fails_without_persisting() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::bare();

    let result = cmd_set_polling_rate(Ok(&mut mock), &store, 500);
    assert!(!result.success);
    assert!(result.error.contains("does not support polling rate"));
    assert_eq!(mock.save_count(), 0);
}

// === buttons ===

#[test]
fn buttons_serializes_mapping_and_saves() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::wireless();

    let result = cmd_set_buttons(Ok(&mut mock), &store, r#"{"Button1":"Shift"}"#);
    assert!(result.success, "{}", result.error);

    let Some(Operation::SetButtonsMapping { mapping }) = mock.operations().first() else {
        panic!("expected a buttons mapping operation");
    };
    assert!(mapping.to_lowercase().contains("button1=leftshift"), "{mapping}");
    assert!(mapping.contains("layout=qwerty"), "{mapping}");
    assert_eq!(mock.save_count(), 1);

    let doc = store.load(0x1038, 0x1838);
    assert_eq!(doc.buttons_mapping(), Some(mapping.as_str()));
}

#[test]
fn buttons_rejects_key_combinations_before_mutating() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::wireless();

    let result = cmd_set_buttons(Ok(&mut mock), &store, r#"{"Button2":"Ctrl+C"}"#);
    assert!(!result.success);
    assert!(result.error.contains("Ctrl+C"));
    assert!(mock.operations().is_empty());
}

#[test]
fn buttons_rejects_invalid_json() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::wireless();

    let result = cmd_set_buttons(Ok(&mut mock), &store, "not json");
    assert!(!result.success);
    assert!(result.error.contains("Invalid button mapping"));
    assert!(mock.operations().is_empty());
}

#[test]
fn buttons_unsupported_fails() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::bare();

    let result = cmd_set_buttons(Ok(&mut mock), &store, r#"{"Button1":"Shift"}"#);
    assert!(!result.success);
    assert!(result.error.contains("does not support button mapping"));
}

// === reset ===

#[test]
fn reset_restores_defaults_and_clears_store() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::combined();

    // seed a saved document
    assert!(cmd_set_polling_rate(Ok(&mut mock), &store, 500).success);
    assert!(store.path_for(0x1038, 0x1824).exists());

    let result = cmd_reset(Ok(&mut mock), &store);
    assert!(result.success, "{}", result.error);
    assert!(mock.operations().contains(&Operation::Reset));
    assert!(!store.path_for(0x1038, 0x1824).exists());
}

#[test]
fn reset_device_failure_is_reported_in_json() {
    let (_dir, store) = temp_store();
    let result = cmd_reset(Ok(MockMouse::combined().failing("usb detached")), &store);
    assert!(!result.success);
    assert!(result.error.contains("usb detached"));
}

// === settings ===

#[test]
fn settings_defaults_when_nothing_saved() {
    let (_dir, store) = temp_store();
    let result = cmd_get_settings(Ok(MockMouse::combined()), &store);
    assert!(result.success);
    assert!(result.settings.sensitivity.is_empty());
    assert_eq!(result.settings.polling_rate, 1000);
    assert!(result.settings.buttons.is_empty());
}

#[test]
fn settings_reads_back_applied_values() {
    let (_dir, store) = temp_store();
    let mut mock = MockMouse::wireless();

    assert!(cmd_set_sensitivity(Ok(&mut mock), &store, "800,1600").success);
    assert!(cmd_set_polling_rate(Ok(&mut mock), &store, 250).success);
    assert!(cmd_set_buttons(Ok(&mut mock), &store, r#"{"Button1":"Shift"}"#).success);

    let result = cmd_get_settings(Ok(&mut mock), &store);
    assert!(result.success);
    assert_eq!(result.settings.sensitivity, vec![800, 1600]);
    assert_eq!(result.settings.polling_rate, 250);
    assert_eq!(result.settings.buttons.get("Button1").map(String::as_str), Some("Shift"));
}

#[test]
fn settings_parses_stored_mapping_with_default_suppression() {
    let (_dir, store) = temp_store();
    let mut doc = deskctl::mouse::settings::SettingsDoc::default();
    doc.set_buttons_mapping(
        "buttons(button1=button1; button6=dpi; button7=disabled; button9=LeftShift; layout=qwerty)",
    );
    store.save(0x1038, 0x1824, &doc).unwrap();

    let result = cmd_get_settings(Ok(MockMouse::combined()), &store);
    assert!(result.success);
    assert_eq!(result.settings.buttons.len(), 1);
    assert_eq!(result.settings.buttons.get("Button9").map(String::as_str), Some("Shift"));
}

#[test]
fn settings_without_device_reports_error() {
    let (_dir, store) = temp_store();
    let result = cmd_get_settings::<MockMouse>(Err(DeskError::NoMouseFound), &store);
    assert!(!result.success);
    assert!(!result.error.is_empty());
}
