// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Process shutdown on SIGINT or SIGTERM.
//!
//! The handlers are registered by [`Shutdown::install`], so a signal that arrives
//! after installation is never lost, even before anyone waits on it.

use std::io;
use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Installed shutdown signal handlers
#[cfg(unix)]
#[derive(Debug)]
pub struct Shutdown {
    interrupt: Signal,
    terminate: Signal,
}

#[cfg(unix)]
impl Shutdown {
    /// Register for SIGINT and SIGTERM. Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// Fails if a signal handler cannot be registered.
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Complete once either signal has been received
    pub async fn wait(mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => info!("Received SIGINT"),
            _ = self.terminate.recv() => info!("Received SIGTERM"),
        }
    }
}

/// Installed shutdown signal handlers
#[cfg(not(unix))]
#[derive(Debug)]
pub struct Shutdown;

#[cfg(not(unix))]
impl Shutdown {
    /// # Errors
    /// Never fails on this platform; Ctrl+C is registered in [`wait`](Self::wait).
    pub fn install() -> io::Result<Self> {
        Ok(Self)
    }

    /// Complete once Ctrl+C has been received
    pub async fn wait(self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C"),
            Err(e) => {
                tracing::warn!("Could not listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}
