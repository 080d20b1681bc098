// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Receives every line a device forwards after identification.
///
/// Called synchronously from the device's reader thread, so implementations must
/// return quickly and must not block on the controller loop.
pub trait LineConsumer: Send + Sync {
    fn on_line(&self, line: &str);
}

/// A registered device.
///
/// The connection itself lives on the reader thread; a `Device` only carries the
/// identity, the name reported by the handshake and the consumer slot.
pub struct Device {
    path: PathBuf,
    baud_rate: u32,
    name: RwLock<Option<String>>,
    consumer: Mutex<Option<Arc<dyn LineConsumer>>>,
}

impl Device {
    pub(crate) fn new(path: PathBuf, baud_rate: u32) -> Self {
        Self {
            path,
            baud_rate,
            name: RwLock::new(None),
            consumer: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Name reported by the device, `None` until the handshake completed
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.name.read().clone()
    }

    #[must_use]
    pub fn is_identified(&self) -> bool {
        self.name.read().is_some()
    }

    /// Replace the consumer, returning the one that was registered before.
    pub fn set_consumer(
        &self,
        consumer: Option<Arc<dyn LineConsumer>>,
    ) -> Option<Arc<dyn LineConsumer>> {
        std::mem::replace(&mut *self.consumer.lock(), consumer)
    }

    #[must_use]
    pub fn has_consumer(&self) -> bool {
        self.consumer.lock().is_some()
    }

    pub(crate) fn set_name(&self, name: String) {
        *self.name.write() = Some(name);
    }

    /// Hand a line to the current consumer, if any.
    pub(crate) fn forward(&self, line: &str) {
        // Clone out so the consumer may swap itself without deadlocking
        let consumer = self.consumer.lock().clone();
        if let Some(consumer) = consumer {
            consumer.on_line(line);
        }
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("path", &self.path)
            .field("baud_rate", &self.baud_rate)
            .field("name", &*self.name.read())
            .field("has_consumer", &self.has_consumer())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl LineConsumer for Counter {
        fn on_line(&self, _line: &str) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn replacing_consumer_detaches_previous() {
        let device = Device::new(PathBuf::from("/dev/ttyACM0"), 115_200);
        let first = Arc::new(Counter::default());
        let second = Arc::new(Counter::default());

        assert!(device.set_consumer(Some(first.clone())).is_none());
        device.forward("1");
        let previous = device.set_consumer(Some(second.clone()));
        device.forward("2");

        assert!(previous.is_some());
        assert_eq!(first.0.load(Ordering::SeqCst), 1);
        assert_eq!(second.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn lines_without_consumer_are_dropped() {
        let device = Device::new(PathBuf::from("/dev/ttyACM0"), 115_200);
        device.forward("ignored");
        assert!(!device.has_consumer());
        assert!(!device.is_identified());
    }
}
