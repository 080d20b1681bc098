// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Stateful decoders for the exhibit's input devices.
//!
//! [`RfidDecoder`] tracks the blood and refined samples whose tags are on the reader.
//! [`NumericDecoder`] accumulates the digits typed on the keypad. Both are
//! [`LineConsumer`](krystal_device::LineConsumer)s: attach them to an identified device
//! and the device's reader thread feeds them.
//!
//! Decoders only replace whole values behind a lock, so the controller can poll them
//! from another thread at any time.

mod attachment;
pub mod numeric;
pub mod rfid;

pub use self::numeric::NumericDecoder;
pub use self::rfid::{parse_line, RfidDecoder, RfidLine, TagSample};
