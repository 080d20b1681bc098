// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use krystal_decode::{NumericDecoder, RfidDecoder};
use krystal_device::{Device, DeviceManager, DeviceNotification};
use krystal_session::Session;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Device names the decoders are attached to
#[derive(Debug, Clone)]
pub struct DeviceNames {
    pub rfid: String,
    pub number: String,
}

/// Fixed-rate loop driving device lifecycle and the session.
///
/// Every tick dispatches reader events, attaches the decoders to newly
/// identified devices and advances the session. A full scan runs every
/// `scan_interval`.
pub struct Controller {
    manager: DeviceManager,
    session: Session,
    rfid: Arc<RfidDecoder>,
    numbers: Arc<NumericDecoder>,
    names: DeviceNames,
    scan_interval: Duration,
    last_scan: Option<Instant>,
}

impl Controller {
    pub fn new(
        manager: DeviceManager,
        session: Session,
        rfid: Arc<RfidDecoder>,
        numbers: Arc<NumericDecoder>,
        names: DeviceNames,
        scan_interval: Duration,
    ) -> Self {
        Self {
            manager,
            session,
            rfid,
            numbers,
            names,
            scan_interval,
            last_scan: None,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn manager(&self) -> &DeviceManager {
        &self.manager
    }

    /// One step of the loop
    pub async fn tick(&mut self) {
        let mut notifications = self.manager.dispatch_events();

        let now = Instant::now();
        if self
            .last_scan
            .is_none_or(|last| now.duration_since(last) >= self.scan_interval)
        {
            self.last_scan = Some(now);
            notifications.extend(self.manager.scan());
        }

        for notification in &notifications {
            self.on_notification(notification);
        }

        self.session.tick().await;
    }

    fn on_notification(&self, notification: &DeviceNotification) {
        match notification {
            DeviceNotification::Identified(device) => self.attach(device),
            DeviceNotification::Removed(device) => {
                warn!("Device {} disconnected", device.path().display());
            }
        }
    }

    fn attach(&self, device: &Arc<Device>) {
        let Some(name) = device.name() else {
            return;
        };

        if name == self.names.rfid {
            info!("Using {} as RFID reader", device.path().display());
            self.rfid.attach(device);
        } else if name == self.names.number {
            info!("Using {} as number pad", device.path().display());
            self.numbers.attach(device);
        } else {
            info!(
                "Ignoring device '{}' at {}",
                name,
                device.path().display()
            );
        }
    }

    /// Tick every `period` until `shutdown` completes, then stop every reader.
    pub async fn run(&mut self, period: Duration, shutdown: impl Future<Output = ()>) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutting down");
                    break;
                }
                _ = ticker.tick() => self.tick().await,
            }
        }

        self.manager.shutdown();
    }
}
