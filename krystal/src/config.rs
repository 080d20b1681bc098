// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Startup configuration, read once from a TOML file.
//!
//! Every key is optional. A missing file is the same as an empty one.

use anyhow::Context;
use krystal_device::DeviceManagerConfig;
use krystal_modifier::ModifierTable;
use krystal_remote::UnrealTargets;
use krystal_session::SessionConfig;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Default location of the configuration file
pub const DEFAULT_PATH: &str = "krystal.toml";

/// Fastest controller loop accepted; keeps the tick interval above zero
pub const MAX_TICK_HZ: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub serial: SerialConfig,
    pub controller: ControllerConfig,
    pub api: ApiConfig,
    pub unreal: UnrealConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerialConfig {
    pub baud_rate: u32,
    /// Directory the patterns are matched in
    pub device_root: PathBuf,
    pub patterns: Vec<String>,
    pub scan_interval_secs: u64,
    pub identify_interval_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        let manager = DeviceManagerConfig::default();
        Self {
            baud_rate: manager.baud_rate,
            device_root: PathBuf::from("/dev"),
            patterns: manager.patterns,
            scan_interval_secs: 5,
            identify_interval_ms: 1000,
            read_timeout_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    pub tick_hz: u32,
    pub idle_timeout_secs: u64,
    pub lock_timeout_secs: u64,
    /// Name reported by the RFID reader
    pub rfid_device: String,
    /// Name reported by the keypad
    pub number_device: String,
    /// Modifier table replacing cells of the built-in one
    pub effects_file: Option<PathBuf>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_hz: 10,
            idle_timeout_secs: 10,
            lock_timeout_secs: 5,
            rfid_device: "rfid".to_string(),
            number_device: "number".to_string(),
            effects_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnrealConfig {
    pub host: String,
    pub port: u16,
    pub system_object_path: String,
    pub controller_object_path: String,
}

impl Default for UnrealConfig {
    fn default() -> Self {
        let targets = UnrealTargets::default();
        Self {
            host: "localhost".to_string(),
            port: 30010,
            system_object_path: targets.system_object_path,
            controller_object_path: targets.controller_object_path,
        }
    }
}

impl Config {
    /// Read the configuration at `path`, falling back to defaults if it does not exist.
    ///
    /// # Errors
    /// Fails if the file exists but cannot be read or is not valid configuration.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(source) => Self::from_toml_str(&source)
                .with_context(|| format!("invalid configuration in {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    /// # Errors
    /// Fails on malformed TOML, unknown keys and invalid values.
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(source)?;
        anyhow::ensure!(config.controller.tick_hz > 0, "controller.tick_hz must be positive");
        anyhow::ensure!(
            config.controller.tick_hz <= MAX_TICK_HZ,
            "controller.tick_hz must not exceed {MAX_TICK_HZ}"
        );
        anyhow::ensure!(
            config.serial.scan_interval_secs > 0,
            "serial.scan_interval_secs must be positive"
        );
        Ok(config)
    }

    #[must_use]
    pub fn device_manager(&self) -> DeviceManagerConfig {
        DeviceManagerConfig {
            baud_rate: self.serial.baud_rate,
            patterns: self.serial.patterns.clone(),
            identify_interval: Duration::from_millis(self.serial.identify_interval_ms),
        }
    }

    #[must_use]
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            idle_timeout: Duration::from_secs(self.controller.idle_timeout_secs),
            lock_timeout: Duration::from_secs(self.controller.lock_timeout_secs),
        }
    }

    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.serial.read_timeout_ms)
    }

    #[must_use]
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.serial.scan_interval_secs)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.controller.tick_hz
    }

    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}:{}", self.api.host, self.api.port)
    }

    #[must_use]
    pub fn unreal_url(&self) -> String {
        format!("http://{}:{}", self.unreal.host, self.unreal.port)
    }

    #[must_use]
    pub fn unreal_targets(&self) -> UnrealTargets {
        UnrealTargets {
            system_object_path: self.unreal.system_object_path.clone(),
            controller_object_path: self.unreal.controller_object_path.clone(),
        }
    }

    /// The built-in modifier table, overlaid with `effects_file` if one is set.
    ///
    /// # Errors
    /// Fails if the effects file cannot be read or parsed.
    pub fn modifier_table(&self) -> anyhow::Result<ModifierTable> {
        let mut table = ModifierTable::builtin();
        let Some(path) = &self.controller.effects_file else {
            return Ok(table);
        };

        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read effects file {}", path.display()))?;
        let overrides = ModifierTable::from_toml_str(&source)
            .with_context(|| format!("invalid effects file {}", path.display()))?;
        table.overlay(overrides);
        Ok(table)
    }
}
