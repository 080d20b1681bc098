// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! The Krystal exhibit controller.
//!
//! Visitors either type a five digit code on a keypad or place a blood sample and a
//! refined krystal on an RFID reader. The controller turns either input into a set
//! of particle system parameters and pushes them to the visualization engine.

pub mod config;
pub mod controller;
pub mod seteffect;
pub mod shutdown;

pub use self::config::Config;
pub use self::controller::{Controller, DeviceNames};
pub use self::shutdown::Shutdown;
