// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::device::{Device, LineConsumer};
use crate::reader::{ReaderEvent, ReaderHandle};
use crate::source::{Connector, Discovery};
use async_channel::{Receiver, Sender};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Settings shared by every device the manager opens
#[derive(Debug, Clone)]
pub struct DeviceManagerConfig {
    pub baud_rate: u32,
    /// Glob patterns, relative to the discovery root
    pub patterns: Vec<String>,
    /// How often an unnamed device is asked for its name again
    pub identify_interval: Duration,
}

impl Default for DeviceManagerConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            patterns: vec!["ttyACM*".to_string(), "ttyUSB*".to_string()],
            identify_interval: Duration::from_secs(1),
        }
    }
}

/// Lifecycle changes reported by [`DeviceManager::scan`] and
/// [`DeviceManager::dispatch_events`]
#[derive(Debug, Clone)]
pub enum DeviceNotification {
    /// The device answered the name request
    Identified(Arc<Device>),
    /// The device was reaped after its reader failed
    Removed(Arc<Device>),
}

struct Entry {
    device: Arc<Device>,
    reader: ReaderHandle,
}

/// Owns every registered device and its reader thread.
///
/// The registry is keyed by connection path, so a path maps to at most one live
/// device. Lookups only see devices that completed the name handshake.
pub struct DeviceManager {
    config: DeviceManagerConfig,
    connector: Arc<dyn Connector>,
    discovery: Box<dyn Discovery>,
    devices: BTreeMap<PathBuf, Entry>,
    pending_removal: Vec<Arc<Device>>,
    events_tx: Sender<ReaderEvent>,
    events_rx: Receiver<ReaderEvent>,
}

impl DeviceManager {
    pub fn new(
        config: DeviceManagerConfig,
        connector: Arc<dyn Connector>,
        discovery: Box<dyn Discovery>,
    ) -> Self {
        let (events_tx, events_rx) = async_channel::unbounded();
        Self {
            config,
            connector,
            discovery,
            devices: BTreeMap::new(),
            pending_removal: Vec::new(),
            events_tx,
            events_rx,
        }
    }

    /// Drain reader events.
    ///
    /// Returns an [`DeviceNotification::Identified`] for every device that finished its
    /// handshake since the last call. Lost devices are queued and reaped by the next
    /// [`scan`](Self::scan).
    pub fn dispatch_events(&mut self) -> Vec<DeviceNotification> {
        let mut notifications = Vec::new();

        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                ReaderEvent::Identified(device) => {
                    if self.is_current(&device) {
                        notifications.push(DeviceNotification::Identified(device));
                    }
                }
                ReaderEvent::Lost(device) => {
                    if self.is_current(&device)
                        && !self
                            .pending_removal
                            .iter()
                            .any(|queued| Arc::ptr_eq(queued, &device))
                    {
                        debug!("Queued {} for removal", device.path().display());
                        self.pending_removal.push(device);
                    }
                }
            }
        }

        notifications
    }

    /// Reap lost devices and register newly discovered ones.
    ///
    /// Rescanning an unchanged set of paths registers nothing.
    pub fn scan(&mut self) -> Vec<DeviceNotification> {
        let mut notifications = self.dispatch_events();

        for device in std::mem::take(&mut self.pending_removal) {
            if let Some(mut entry) = self.devices.remove(device.path()) {
                entry.reader.join();
                entry.device.set_consumer(None);
                info!("Removed {}", entry.device.path().display());
                notifications.push(DeviceNotification::Removed(entry.device));
            }
        }

        let discovered: Vec<PathBuf> = self
            .config
            .patterns
            .iter()
            .flat_map(|pattern| self.discovery.discover(pattern))
            .collect();

        for path in discovered {
            if !self.devices.contains_key(&path) {
                self.register(path);
            }
        }

        notifications
    }

    fn register(&mut self, path: PathBuf) {
        info!("Registering {}", path.display());
        let device = Arc::new(Device::new(path.clone(), self.config.baud_rate));
        let reader = ReaderHandle::spawn(
            device.clone(),
            self.connector.clone(),
            self.config.identify_interval,
            self.events_tx.clone(),
        );
        self.devices.insert(path, Entry { device, reader });
    }

    fn is_current(&self, device: &Arc<Device>) -> bool {
        self.devices
            .get(device.path())
            .is_some_and(|entry| Arc::ptr_eq(&entry.device, device))
    }

    /// Identified devices that reported `name`
    #[must_use]
    pub fn devices_by_name(&self, name: &str) -> Vec<Arc<Device>> {
        self.devices
            .values()
            .filter(|entry| entry.device.name().as_deref() == Some(name))
            .map(|entry| entry.device.clone())
            .collect()
    }

    #[must_use]
    pub fn device(&self, path: &Path) -> Option<Arc<Device>> {
        self.devices.get(path).map(|entry| entry.device.clone())
    }

    /// Number of registered devices, identified or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Replace the line sink of `device`, returning the previous one.
    pub fn set_consumer(
        &self,
        device: &Device,
        consumer: Option<Arc<dyn LineConsumer>>,
    ) -> Option<Arc<dyn LineConsumer>> {
        device.set_consumer(consumer)
    }

    /// Stop and join every reader. The registry is empty afterwards.
    pub fn shutdown(&mut self) {
        if self.devices.is_empty() {
            return;
        }

        info!("Stopping {} device reader(s)", self.devices.len());
        for entry in self.devices.values() {
            entry.reader.signal_stop();
        }
        for (_, mut entry) in std::mem::take(&mut self.devices) {
            entry.reader.join();
            entry.device.set_consumer(None);
        }
        self.pending_removal.clear();
    }
}

impl Drop for DeviceManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
