// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Capabilities the device manager needs from the outside world.

use krystal_error::Result;
use std::path::{Path, PathBuf};

/// One open, line-oriented connection.
///
/// Owned exclusively by the reader thread of its device. Dropping the source closes
/// the connection.
pub trait LineSource: Send {
    /// Read the next complete line, trailing whitespace removed.
    ///
    /// Returns `Ok(None)` when nothing complete arrived within the source's read
    /// timeout, so the caller gets a chance to check for shutdown.
    ///
    /// # Errors
    /// Returns an error for which [`KrystalError::is_connection_lost`] holds when
    /// the connection is gone. Any other error only spoils the current line.
    ///
    /// [`KrystalError::is_connection_lost`]: krystal_error::KrystalError::is_connection_lost
    fn read_line(&mut self) -> Result<Option<String>>;

    /// Write one line, appending the line terminator.
    ///
    /// # Errors
    /// Returns an error when the connection is gone.
    fn write_line(&mut self, line: &str) -> Result<()>;
}

/// Opens line sources
pub trait Connector: Send + Sync {
    /// # Errors
    /// Returns an error if the device cannot be opened.
    fn open(&self, path: &Path, baud_rate: u32) -> Result<Box<dyn LineSource>>;
}

/// Lists device paths matching a glob pattern
pub trait Discovery: Send + Sync {
    fn discover(&self, pattern: &str) -> Vec<PathBuf>;
}
