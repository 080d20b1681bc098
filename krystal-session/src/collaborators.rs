// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use krystal_core::{Enlisted, SystemParameters};
use krystal_error::Result;

/// Write-only command surface of the remote visualization engine.
///
/// Every command may fail independently; callers log and carry on.
#[async_trait]
pub trait Visualization: Send + Sync {
    /// Push every system parameter
    async fn update_parameters(&self, parameters: &SystemParameters) -> Result<()>;

    /// Return the display to its idle look
    async fn reset(&self) -> Result<()>;

    /// Restart the particle system so pushed parameters take effect
    async fn reinitialize(&self) -> Result<()>;

    async fn set_active(&self, active: bool) -> Result<()>;

    /// Show a prompt or status line
    async fn message(&self, message: &str) -> Result<()>;

    /// Echo the digits typed so far
    async fn set_numbers(&self, numbers: &[u8]) -> Result<()>;

    async fn clear_numbers(&self) -> Result<()>;

    /// Signal an accepted input
    async fn valid(&self) -> Result<()>;

    /// Signal a rejected input
    async fn invalid(&self) -> Result<()>;
}

/// Resolves enlisted codes to personnel records
#[async_trait]
pub trait EnlistedLookup: Send + Sync {
    /// `None` when the number is unknown or the lookup failed
    async fn enlisted_by_number(&self, number: &str) -> Option<Enlisted>;
}
