// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Registry of hot-pluggable, line-oriented serial devices.
//!
//! The [`DeviceManager`] periodically expands a set of glob patterns, opens every new
//! path it finds and hands it to a dedicated reader thread. The reader asks the device
//! for its name, then forwards every line to the single [`LineConsumer`] registered on
//! the [`Device`]. Readers that fail report their device as lost and the manager reaps
//! it on its next scan.
//!
//! The hardware is reached only through the [`Connector`] and [`Discovery`] traits so
//! the whole lifecycle can run against in-memory fakes.
//!
//! # Example
//!
//! ```no_run
//! use krystal_device::{DeviceManager, DeviceManagerConfig, GlobDiscovery, SerialConnector};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let mut manager = DeviceManager::new(
//!     DeviceManagerConfig::default(),
//!     Arc::new(SerialConnector::new(Duration::from_secs(1))),
//!     Box::new(GlobDiscovery::new("/dev")),
//! );
//!
//! manager.scan();
//! for device in manager.devices_by_name("rfid") {
//!     println!("rfid reader at {}", device.path().display());
//! }
//! ```

pub mod device;
pub mod discovery;
pub mod manager;
mod reader;
pub mod serial;
pub mod source;

pub use self::device::{Device, LineConsumer};
pub use self::discovery::GlobDiscovery;
pub use self::manager::{DeviceManager, DeviceManagerConfig, DeviceNotification};
pub use self::serial::SerialConnector;
pub use self::source::{Connector, Discovery, LineSource};

/// Line sent to a device to ask for its name
pub const IDENTIFY_REQUEST: &str = "NAME";

/// Prefix of the line a device answers [`IDENTIFY_REQUEST`] with
pub const NAME_MARKER: &str = "name:";
