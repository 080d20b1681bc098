// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::collaborators::{EnlistedLookup, Visualization};
use crate::state::SessionState;
use krystal_core::SystemParameters;
use krystal_decode::{NumericDecoder, RfidDecoder};
use krystal_error::Result;
use krystal_modifier::{compose_enlisted, compose_samples, ModifierTable};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Prompt shown while waiting for a code
pub const ENTER_CODE: &str = "Enter Code:";

/// Message shown when a code is unknown
pub const INVALID_INPUT: &str = "Invalid Input!";

/// Code that switches code entry to sample presentation
pub const SAMPLE_CODE: [u8; 5] = [0; 5];

/// Code that returns any sample state to code entry
pub const RESET_CODE: [u8; 3] = [0; 3];

/// Timeouts of the session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Partial code is discarded after this long without a new digit
    pub idle_timeout: Duration,
    /// How long input stays locked after an unknown code
    pub lock_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(10),
            lock_timeout: Duration::from_secs(5),
        }
    }
}

/// Interaction state machine.
///
/// Only [`tick`](Self::tick) mutates the session. Returning to code entry
/// reinitializes the existing session in place.
pub struct Session {
    config: SessionConfig,
    table: ModifierTable,
    numbers: Arc<NumericDecoder>,
    rfid: Arc<RfidDecoder>,
    visualization: Arc<dyn Visualization>,
    lookup: Arc<dyn EnlistedLookup>,
    state: SessionState,
    digits: Vec<u8>,
    deadline: Option<Instant>,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        table: ModifierTable,
        numbers: Arc<NumericDecoder>,
        rfid: Arc<RfidDecoder>,
        visualization: Arc<dyn Visualization>,
        lookup: Arc<dyn EnlistedLookup>,
    ) -> Self {
        Self {
            config,
            table,
            numbers,
            rfid,
            visualization,
            lookup,
            state: SessionState::Input,
            digits: Vec::new(),
            deadline: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Digits accepted in the current state
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Advance the session by one step.
    pub async fn tick(&mut self) {
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            self.deadline = None;
            self.on_deadline().await;
        }

        match self.state {
            SessionState::Input => self.tick_input().await,
            SessionState::InputLocked => self.numbers.clear(),
            SessionState::SampleLookup => self.tick_sample_lookup().await,
            SessionState::SampleActive | SessionState::Enlisted => {
                self.take_reset_code().await;
            }
        }
    }

    async fn on_deadline(&mut self) {
        match self.state {
            SessionState::Input => {
                info!("Code entry timed out");
                self.clear_input();
                report("clear numbers", self.visualization.clear_numbers().await);
                report("message", self.visualization.message(ENTER_CODE).await);
            }
            SessionState::InputLocked => {
                info!("Input unlocked");
                self.clear_input();
                report("clear numbers", self.visualization.clear_numbers().await);
                report("message", self.visualization.message(ENTER_CODE).await);
                self.transition(SessionState::Input);
            }
            state => debug!("Ignoring deadline in state {}", state),
        }
    }

    async fn tick_input(&mut self) {
        let pending = self.numbers.digits();
        if pending.len() == self.digits.len() {
            return;
        }

        let max = self.state.max_digits();
        self.digits = pending.into_iter().take(max).collect();
        self.deadline = (!self.digits.is_empty()).then(|| Instant::now() + self.config.idle_timeout);
        report("set numbers", self.visualization.set_numbers(&self.digits).await);

        if self.digits.len() == max {
            self.submit_code().await;
        }
    }

    async fn submit_code(&mut self) {
        self.digits.clear();
        self.deadline = None;
        let Some(code) = self.numbers.take(self.state.max_digits()) else {
            return;
        };

        if code == SAMPLE_CODE {
            report("clear numbers", self.visualization.clear_numbers().await);
            self.transition(SessionState::SampleLookup);
            return;
        }

        let number: String = code.iter().map(|d| char::from(b'0' + d)).collect();
        match self.lookup.enlisted_by_number(&number).await {
            Some(enlisted) => {
                info!("Code {} belongs to {}", number, enlisted.name);
                let parameters = compose_enlisted(&self.table, &enlisted);
                self.present(&parameters).await;
                self.transition(SessionState::Enlisted);
            }
            None => {
                info!("Code {} is unknown", number);
                report("message", self.visualization.message(INVALID_INPUT).await);
                report("invalid", self.visualization.invalid().await);
                self.deadline = Some(Instant::now() + self.config.lock_timeout);
                self.transition(SessionState::InputLocked);
            }
        }
    }

    async fn tick_sample_lookup(&mut self) {
        if self.take_reset_code().await {
            return;
        }

        let (Some(blood), Some(refined)) = (self.rfid.blood(), self.rfid.refined()) else {
            return;
        };

        info!(
            "Presenting blood sample {} with refined sample {}",
            blood.tag_id, refined.tag_id
        );
        let parameters = compose_samples(&self.table, &blood, &refined);
        self.present(&parameters).await;
        self.transition(SessionState::SampleActive);
    }

    /// Returns `true` if the reset code was entered and handled.
    async fn take_reset_code(&mut self) -> bool {
        let Some(code) = self.numbers.take(self.state.max_digits()) else {
            return false;
        };

        if code != RESET_CODE {
            debug!("Discarding {:?}", code);
            return false;
        }

        info!("Reset requested");
        self.digits.clear();
        self.deadline = None;
        self.transition(SessionState::Input);
        report("reset", self.visualization.reset().await);
        report("set active", self.visualization.set_active(false).await);
        report("message", self.visualization.message(ENTER_CODE).await);
        true
    }

    async fn present(&self, parameters: &SystemParameters) {
        report("update parameters", self.visualization.update_parameters(parameters).await);
        report("reinitialize", self.visualization.reinitialize().await);
        report("valid", self.visualization.valid().await);
        report("set active", self.visualization.set_active(true).await);
    }

    fn clear_input(&mut self) {
        self.numbers.clear();
        self.digits.clear();
        self.deadline = None;
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            info!("Session {} -> {}", self.state, next);
            self.state = next;
        }
    }
}

fn report(command: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!("Visualization {} failed: {}", command, e);
    }
}
