// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test doubles and fixtures for the Krystal exhibit controller.
//!
//! This crate is for development and testing only. It provides in-memory stand-ins
//! for every outside dependency of the controller:
//!
//! - [`FakeConnector`] and [`FakePort`]: scripted serial ports that can answer the name
//!   request, replay lines and fail on demand
//! - [`FakeDiscovery`]: a mutable set of device paths matched against glob patterns
//! - [`RecordingVisualization`]: records every visualization command in order
//! - [`StaticLookup`]: enlisted records held in memory
//!
//! # Example
//!
//! ```rust
//! use krystal_test_utils::{FakeConnector, FakeDiscovery};
//!
//! let connector = FakeConnector::new();
//! let discovery = FakeDiscovery::new();
//!
//! let port = connector.add_port("/dev/ttyACM0").answering_name("rfid");
//! discovery.insert("/dev/ttyACM0");
//! port.push_line("tag found: T1 raw");
//! ```

pub mod fake_serial;
pub mod fixtures;
pub mod helpers;
pub mod lookup;
pub mod visualization;

pub use self::fake_serial::{FakeConnector, FakeDiscovery, FakePort};
pub use self::helpers::{wait_until, SETTLE};
pub use self::lookup::StaticLookup;
pub use self::visualization::{RecordingVisualization, VisualizationCall};
