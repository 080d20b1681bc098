// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One reader thread per device.

use crate::device::Device;
use crate::source::{Connector, LineSource};
use crate::{IDENTIFY_REQUEST, NAME_MARKER};
use async_channel::Sender;
use krystal_error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What a reader reports back to the manager
#[derive(Debug)]
pub(crate) enum ReaderEvent {
    Identified(Arc<Device>),
    Lost(Arc<Device>),
}

pub(crate) struct ReaderHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl ReaderHandle {
    pub(crate) fn spawn(
        device: Arc<Device>,
        connector: Arc<dyn Connector>,
        identify_interval: Duration,
        events: Sender<ReaderEvent>,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let reader = Reader {
            device,
            identify_interval,
            stop: stop.clone(),
            events,
        };

        let thread = thread::Builder::new()
            .name(format!("reader {}", reader.device.path().display()))
            .spawn(move || reader.run(connector.as_ref()));

        let thread = match thread {
            Ok(thread) => Some(thread),
            Err(e) => {
                warn!("Failed to spawn reader thread: {}", e);
                None
            }
        };

        Self { stop, thread }
    }

    /// Ask the reader to stop; it notices within one read timeout.
    pub(crate) fn signal_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub(crate) fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Reader thread panicked");
            }
        }
    }
}

impl Drop for ReaderHandle {
    fn drop(&mut self) {
        self.signal_stop();
        self.join();
    }
}

struct Reader {
    device: Arc<Device>,
    identify_interval: Duration,
    stop: Arc<AtomicBool>,
    events: Sender<ReaderEvent>,
}

impl Reader {
    fn run(self, connector: &dyn Connector) {
        let mut source = match connector.open(self.device.path(), self.device.baud_rate()) {
            Ok(source) => source,
            Err(e) => {
                warn!("{}", e);
                self.report(ReaderEvent::Lost(self.device.clone()));
                return;
            }
        };

        info!("Opened {}", self.device.path().display());

        match self.pump(source.as_mut()) {
            Ok(()) => debug!("Reader for {} stopped", self.device.path().display()),
            Err(e) => {
                if e.is_connection_lost() {
                    info!("{} disconnected: {}", self.device.path().display(), e);
                } else {
                    warn!("Lost {}: {}", self.device.path().display(), e);
                }
                self.report(ReaderEvent::Lost(self.device.clone()));
            }
        }
    }

    fn pump(&self, source: &mut dyn LineSource) -> Result<()> {
        let mut last_request: Option<Instant> = None;

        while !self.stop.load(Ordering::Acquire) {
            if !self.device.is_identified()
                && last_request.map_or(true, |at| at.elapsed() >= self.identify_interval)
            {
                source.write_line(IDENTIFY_REQUEST)?;
                last_request = Some(Instant::now());
            }

            match source.read_line() {
                Ok(Some(line)) => self.handle_line(line.trim()),
                Ok(None) => {}
                Err(e) if e.is_connection_lost() => return Err(e),
                Err(e) => warn!("Skipping input from {}: {}", self.device.path().display(), e),
            }
        }

        Ok(())
    }

    fn handle_line(&self, line: &str) {
        if line.is_empty() {
            return;
        }

        if let Some(name) = strip_name_marker(line) {
            if self.device.is_identified() {
                debug!("{} repeated its name", self.device.path().display());
            } else {
                let name = name.trim().to_lowercase();
                info!("{} identified as '{}'", self.device.path().display(), name);
                self.device.set_name(name);
                self.report(ReaderEvent::Identified(self.device.clone()));
            }
            return;
        }

        if self.device.is_identified() {
            debug!("{} -> {}", self.device.path().display(), line);
            self.device.forward(line);
        }
    }

    fn report(&self, event: ReaderEvent) {
        // The receiver only goes away when the manager is dropped
        let _ = self.events.try_send(event);
    }
}

fn strip_name_marker(line: &str) -> Option<&str> {
    let prefix = line.get(..NAME_MARKER.len())?;
    prefix
        .eq_ignore_ascii_case(NAME_MARKER)
        .then(|| &line[NAME_MARKER.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_marker_is_case_insensitive() {
        assert_eq!(strip_name_marker("name: rfid"), Some(" rfid"));
        assert_eq!(strip_name_marker("NAME:Number"), Some("Number"));
        assert_eq!(strip_name_marker("tag found: 1"), None);
        assert_eq!(strip_name_marker("nam"), None);
    }
}
