// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use krystal_device::{Device, LineConsumer};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::info;

/// Weak link from a decoder to the device feeding it
#[derive(Default)]
pub(crate) struct Attachment {
    device: Mutex<Weak<Device>>,
}

impl Attachment {
    pub(crate) fn attach(&self, device: &Arc<Device>, consumer: Arc<dyn LineConsumer>) {
        let mut current = self.device.lock();

        if let Some(previous) = current.upgrade() {
            if !Arc::ptr_eq(&previous, device) {
                previous.set_consumer(None);
            }
        }

        device.set_consumer(Some(consumer));
        *current = Arc::downgrade(device);
        info!("Using device {}", device.path().display());
    }

    pub(crate) fn device(&self) -> Option<Arc<Device>> {
        self.device.lock().upgrade()
    }
}
