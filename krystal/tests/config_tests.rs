// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use krystal::Config;
use krystal_core::{Action, Effect, Target};
use krystal_modifier::ModifierTable;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn scratch_file(name: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("krystal-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn test_missing_file_yields_defaults() -> anyhow::Result<()> {
    // Act
    let config = Config::load(Path::new("/nonexistent/krystal.toml"))?;

    // Assert
    assert_eq!(config, Config::default());
    assert_eq!(config.serial.baud_rate, 115_200);
    assert_eq!(config.serial.patterns, vec!["ttyACM*", "ttyUSB*"]);
    assert_eq!(config.scan_interval(), Duration::from_secs(5));
    assert_eq!(config.tick_interval(), Duration::from_millis(100));
    assert_eq!(config.api_url(), "http://localhost:8000");
    assert_eq!(config.unreal_url(), "http://localhost:30010");
    assert_eq!(config.controller.rfid_device, "rfid");
    assert_eq!(config.controller.number_device, "number");

    Ok(())
}

#[test]
fn test_partial_file_overrides_only_given_keys() -> anyhow::Result<()> {
    // Arrange
    let path = scratch_file(
        "partial.toml",
        r#"
[serial]
baud_rate = 9600
patterns = ["ttyS*"]

[controller]
idle_timeout_secs = 30

[unreal]
host = "render-pc"
"#,
    )?;

    // Act
    let config = Config::load(&path)?;

    // Assert
    assert_eq!(config.device_manager().baud_rate, 9600);
    assert_eq!(config.device_manager().patterns, vec!["ttyS*"]);
    assert_eq!(config.session().idle_timeout, Duration::from_secs(30));
    assert_eq!(config.session().lock_timeout, Duration::from_secs(5));
    assert_eq!(config.unreal_url(), "http://render-pc:30010");
    assert_eq!(config.api, Config::default().api);

    Ok(())
}

#[test]
fn test_unknown_keys_are_rejected() -> anyhow::Result<()> {
    // Arrange
    let path = scratch_file("typo.toml", "[serial]\nbaudrate = 9600\n")?;

    // Act
    let result = Config::load(&path);

    // Assert
    assert!(result.is_err());

    Ok(())
}

#[test]
fn test_effects_file_overlays_builtin_table() -> anyhow::Result<()> {
    // Arrange
    let effects = scratch_file(
        "effects.toml",
        r#"
[[modifier]]
action = "Increasing"
target = "Energy"
parameter = "base_spawn_rate"
operation = "set_unscaled"
value = 20.0
"#,
    )?;
    let config = Config::from_toml_str(&format!(
        "[controller]\neffects_file = {:?}\n",
        effects.display().to_string()
    ))?;
    let builtin = ModifierTable::builtin();
    let untouched = Effect::new(Action::Destroying, Target::Krystal);

    // Act
    let table = config.modifier_table()?;

    // Assert
    let overridden = table
        .lookup(Effect::new(Action::Increasing, Target::Energy))
        .ok_or_else(|| anyhow::anyhow!("cell missing"))?;
    assert_eq!(overridden.len(), 1);
    assert_eq!(table.lookup(untouched), builtin.lookup(untouched));

    Ok(())
}

#[test]
fn test_missing_effects_file_is_an_error() -> anyhow::Result<()> {
    // Arrange
    let config =
        Config::from_toml_str("[controller]\neffects_file = \"/nonexistent/effects.toml\"\n")?;

    // Act
    let result = config.modifier_table();

    // Assert
    assert!(result.is_err());

    Ok(())
}
