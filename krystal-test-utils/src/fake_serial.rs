// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! In-memory serial ports.

use krystal_device::{Connector, Discovery, LineSource, IDENTIFY_REQUEST};
use krystal_error::{KrystalError, Result};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How long an empty fake port blocks before reporting a read timeout
const READ_TIMEOUT: Duration = Duration::from_millis(2);

#[derive(Debug, Default)]
struct PortState {
    incoming: VecDeque<String>,
    written: Vec<String>,
    name: Option<String>,
    failed: bool,
    garbled: usize,
    refuse_open: bool,
    opens: usize,
}

/// Test-side handle of a fake serial port.
///
/// Clones share the same port.
#[derive(Debug, Clone, Default)]
pub struct FakePort {
    state: Arc<Mutex<PortState>>,
}

impl FakePort {
    /// Answer every name request with `name: <name>`
    #[must_use]
    pub fn answering_name(self, name: &str) -> Self {
        self.state.lock().name = Some(name.to_string());
        self
    }

    /// Queue a line for the reader
    pub fn push_line(&self, line: &str) {
        self.state.lock().incoming.push_back(line.to_string());
    }

    /// Make every following read and write fail, as if the device was unplugged
    pub fn fail(&self) {
        self.state.lock().failed = true;
    }

    /// Make the next read return an error that spoils one line but keeps the connection
    pub fn garble_next_read(&self) {
        self.state.lock().garbled += 1;
    }

    /// Make the next opens fail
    pub fn refuse_open(&self) {
        self.state.lock().refuse_open = true;
    }

    /// Lines the reader wrote, oldest first
    #[must_use]
    pub fn written(&self) -> Vec<String> {
        self.state.lock().written.clone()
    }

    /// How many times the port was opened
    #[must_use]
    pub fn opens(&self) -> usize {
        self.state.lock().opens
    }

    /// Lines queued but not yet read
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.lock().incoming.len()
    }
}

struct FakeLine {
    state: Arc<Mutex<PortState>>,
}

fn unplugged() -> KrystalError {
    KrystalError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"))
}

impl LineSource for FakeLine {
    fn read_line(&mut self) -> Result<Option<String>> {
        {
            let mut state = self.state.lock();
            if state.failed {
                return Err(unplugged());
            }
            if state.garbled > 0 {
                state.garbled -= 1;
                return Err(KrystalError::decode("\u{fffd}", "line noise"));
            }
            if let Some(line) = state.incoming.pop_front() {
                return Ok(Some(line));
            }
        }

        thread::sleep(READ_TIMEOUT);
        Ok(None)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.failed {
            return Err(unplugged());
        }

        state.written.push(line.to_string());
        if line == IDENTIFY_REQUEST {
            if let Some(name) = state.name.clone() {
                state.incoming.push_back(format!("name: {name}"));
            }
        }
        Ok(())
    }
}

/// Opens [`FakePort`]s registered by path
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    ports: Arc<Mutex<HashMap<PathBuf, FakePort>>>,
}

impl FakeConnector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a port at `path`, replacing any previous one
    pub fn add_port(&self, path: impl Into<PathBuf>) -> FakePort {
        let port = FakePort::default();
        self.ports.lock().insert(path.into(), port.clone());
        port
    }

    #[must_use]
    pub fn port(&self, path: impl AsRef<Path>) -> Option<FakePort> {
        self.ports.lock().get(path.as_ref()).cloned()
    }
}

impl Connector for FakeConnector {
    fn open(&self, path: &Path, _baud_rate: u32) -> Result<Box<dyn LineSource>> {
        let port = self
            .port(path)
            .ok_or_else(|| KrystalError::device_open(path, "no such device"))?;

        let mut state = port.state.lock();
        if state.refuse_open {
            return Err(KrystalError::device_open(path, "permission denied"));
        }
        state.opens += 1;
        drop(state);

        Ok(Box::new(FakeLine { state: port.state }))
    }
}

/// A mutable set of device paths
#[derive(Debug, Clone, Default)]
pub struct FakeDiscovery {
    paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeDiscovery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut paths = self.paths.lock();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        self.paths.lock().retain(|p| p != path.as_ref());
    }
}

impl Discovery for FakeDiscovery {
    fn discover(&self, pattern: &str) -> Vec<PathBuf> {
        let Ok(pattern) = glob::Pattern::new(pattern) else {
            return Vec::new();
        };

        self.paths
            .lock()
            .iter()
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
            })
            .cloned()
            .collect()
    }
}
