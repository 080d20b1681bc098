// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Krystal exhibit controller
//!
//! This crate provides the error type shared by every Krystal crate. It defines a root
//! [`KrystalError`] with specific variants for the different failure modes of the exhibit:
//! device I/O, line decoding, configuration and remote calls.
//!
//! Most of these errors are recoverable at the call site: a reader thread that hits
//! [`KrystalError::Io`] stops and reports its device as lost, a decoder that hits
//! [`KrystalError::Decode`] discards the line, and the session logs a failed
//! [`KrystalError::Remote`] call and moves on.
//!
//! # Examples
//!
//! ```
//! use krystal_error::{KrystalError, Result};
//!
//! fn parse_purity(word: &str) -> Result<u8> {
//!     Err(KrystalError::unknown_purity(word))
//! }
//!
//! assert!(parse_purity("SHINY").unwrap_err().is_decode_failure());
//! ```

use std::path::PathBuf;

/// Root error type for all Krystal operations
#[derive(Debug, thiserror::Error)]
pub enum KrystalError {
    /// Reading from or writing to a device connection failed
    ///
    /// Raised by line sources when the underlying handle is closed or unplugged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A device connection could not be opened
    #[error("Failed to open device {path}: {reason}")]
    DeviceOpen {
        /// Path of the device that failed to open
        path: PathBuf,
        /// Backend specific reason
        reason: String,
    },

    /// A device line did not have the expected shape
    #[error("Failed to decode line '{line}': {reason}")]
    Decode {
        /// The offending line
        line: String,
        /// What was wrong with it
        reason: String,
    },

    /// A purity word is not part of the purity vocabulary
    #[error("Unknown purity word: {0}")]
    UnknownPurity(String),

    /// An action, target, parameter or operation word is not part of its vocabulary
    #[error("Unknown {kind}: {word}")]
    UnknownWord {
        /// Which vocabulary was searched
        kind: &'static str,
        /// The word that was not found
        word: String,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {context}")]
    Config {
        /// Description of the configuration problem
        context: String,
    },

    /// A remote call returned a failure or could not be performed
    #[error("Remote call {operation} failed: {reason}")]
    Remote {
        /// The remote operation that failed
        operation: String,
        /// Status or transport failure description
        reason: String,
    },

    /// A remote client was used before a connection was established
    #[error("Not connected to {service}")]
    NotConnected {
        /// Name of the remote service
        service: String,
    },
}

impl KrystalError {
    /// Create a device open error
    pub fn device_open(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DeviceOpen {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a decode error for the given line
    pub fn decode(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown purity error
    pub fn unknown_purity(word: impl Into<String>) -> Self {
        Self::UnknownPurity(word.into())
    }

    /// Create an unknown vocabulary word error
    pub fn unknown_word(kind: &'static str, word: impl Into<String>) -> Self {
        Self::UnknownWord {
            kind,
            word: word.into(),
        }
    }

    /// Create a configuration error with the given context
    pub fn config(context: impl Into<String>) -> Self {
        Self::Config {
            context: context.into(),
        }
    }

    /// Create a remote call error
    pub fn remote(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Remote {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-connected error
    pub fn not_connected(service: impl Into<String>) -> Self {
        Self::NotConnected {
            service: service.into(),
        }
    }

    /// Check if this error came from decoding untrusted device input
    ///
    /// Decode failures discard the offending line and never change decoder state.
    #[must_use]
    pub const fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::UnknownPurity(_) | Self::UnknownWord { .. }
        )
    }

    /// Check if this error means the device connection is gone
    #[must_use]
    pub const fn is_connection_lost(&self) -> bool {
        matches!(self, Self::Io(_) | Self::DeviceOpen { .. })
    }
}

/// Specialized Result type for Krystal operations
///
/// # Examples
///
/// ```
/// use krystal_error::Result;
///
/// fn process() -> Result<String> {
///     Ok("processed".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, KrystalError>;

/// Helper trait for adding context to `Result`s
///
/// Converts foreign errors into [`KrystalError::Config`] carrying the given context,
/// which is how configuration and table loading report parse failures.
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(KrystalError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(KrystalError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| KrystalError::config(format!("{}: {e}", context.into())))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| KrystalError::config(format!("{}: {e}", f())))
    }
}
