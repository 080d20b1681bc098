// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::attachment::Attachment;
use krystal_device::{Device, LineConsumer};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Default)]
struct NumericState {
    digits: Vec<u8>,
    last_input: Option<Instant>,
}

/// Collects the digits typed on the numeric input device.
///
/// Every line is parsed as a base-10 integer and kept only when it lies in `0..=9`.
/// The decoder enforces no length bound; the session trims the buffer to what its
/// current mode accepts.
#[derive(Default)]
pub struct NumericDecoder {
    state: Mutex<NumericState>,
    attachment: Attachment,
}

impl NumericDecoder {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register as the consumer of `device`, detaching from the previous one.
    pub fn attach(self: &Arc<Self>, device: &Arc<Device>) {
        self.attachment.attach(device, self.clone());
    }

    /// Device currently feeding this decoder, if it is still registered
    #[must_use]
    pub fn device(&self) -> Option<Arc<Device>> {
        self.attachment.device()
    }

    /// Digits accepted since the last [`clear`](Self::clear), oldest first
    #[must_use]
    pub fn digits(&self) -> Vec<u8> {
        self.state.lock().digits.clone()
    }

    /// When the last digit was accepted
    #[must_use]
    pub fn last_input(&self) -> Option<Instant> {
        self.state.lock().last_input
    }

    pub fn clear(&self) {
        self.state.lock().digits.clear();
    }

    /// Remove and return the oldest `count` digits, if that many have been typed.
    ///
    /// Digits after them stay buffered, so input arriving while the caller acts
    /// on a code is kept for the next one.
    #[must_use]
    pub fn take(&self, count: usize) -> Option<Vec<u8>> {
        let mut state = self.state.lock();
        if state.digits.len() < count {
            return None;
        }
        Some(state.digits.drain(..count).collect())
    }

    /// Accept one line as if it came from the device.
    pub fn push_line(&self, line: &str) {
        let digit = match line.trim().parse::<i64>() {
            Ok(value @ 0..=9) => value as u8,
            Ok(value) => {
                debug!("Ignoring out of range input {}", value);
                return;
            }
            Err(_) => {
                debug!("Ignoring non numeric input '{}'", line);
                return;
            }
        };

        let mut state = self.state.lock();
        state.digits.push(digit);
        state.last_input = Some(Instant::now());
    }
}

impl LineConsumer for NumericDecoder {
    fn on_line(&self, line: &str) {
        self.push_line(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_digits_only() {
        let decoder = NumericDecoder::new();

        for line in ["1", "x", "10", "-1", "9", " 0 ", ""] {
            decoder.push_line(line);
        }

        assert_eq!(decoder.digits(), vec![1, 9, 0]);
    }

    #[test]
    fn take_leaves_later_digits_buffered() {
        let decoder = NumericDecoder::new();
        for line in ["2", "4", "6"] {
            decoder.push_line(line);
        }

        assert_eq!(decoder.take(4), None);
        assert_eq!(decoder.take(2), Some(vec![2, 4]));
        assert_eq!(decoder.digits(), vec![6]);
        assert_eq!(decoder.take(1), Some(vec![6]));
        assert!(decoder.digits().is_empty());
    }

    #[test]
    fn clear_keeps_last_input() {
        let decoder = NumericDecoder::new();
        assert!(decoder.last_input().is_none());

        decoder.push_line("4");
        decoder.clear();

        assert!(decoder.digits().is_empty());
        assert!(decoder.last_input().is_some());
    }
}
