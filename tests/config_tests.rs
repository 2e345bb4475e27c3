// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use photobooth::Config;
use photobooth::compose::Template;

#[test]
fn test_config_default() {
    // Test that default config can be created
    let config = Config::default();

    // Check sensible defaults
    assert!(
        !config.mute_shutter,
        "Shutter sound should be on by default"
    );
    assert!(!config.confetti, "Confetti should be off by default");
    assert!(!config.vignette, "Vignette should be off by default");
    assert_eq!(config.default_template, Template::Classic);
}

#[test]
fn test_config_survives_serialization() {
    let mut config = Config::default();
    config.mute_shutter = true;
    config.default_template = Template::Grid;

    let json = serde_json::to_string(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn test_unknown_fields_are_tolerated() {
    // A config written by a newer version must still load the fields we
    // know about instead of panicking.
    let json = r#"{"mute_shutter": true, "future_option": 42}"#;
    let restored: Result<Config, _> = serde_json::from_str(json);
    // serde defaults tolerate unknown fields
    assert!(restored.is_ok());
    assert!(restored.unwrap().mute_shutter);
}
