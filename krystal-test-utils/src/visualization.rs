// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use krystal_core::SystemParameters;
use krystal_error::{KrystalError, Result};
use krystal_session::Visualization;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One command received by a [`RecordingVisualization`]
#[derive(Debug, Clone, PartialEq)]
pub enum VisualizationCall {
    UpdateParameters(Box<SystemParameters>),
    Reset,
    Reinitialize,
    SetActive(bool),
    Message(String),
    SetNumbers(Vec<u8>),
    ClearNumbers,
    Valid,
    Invalid,
}

/// Records every command in arrival order.
///
/// With [`fail`](Self::fail) set, commands are still recorded but report a remote
/// failure.
#[derive(Debug, Default)]
pub struct RecordingVisualization {
    calls: Mutex<Vec<VisualizationCall>>,
    failing: AtomicBool,
}

impl RecordingVisualization {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<VisualizationCall> {
        self.calls.lock().clone()
    }

    /// Return and forget the calls recorded so far
    pub fn take_calls(&self) -> Vec<VisualizationCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                VisualizationCall::Message(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Parameters of the most recent push
    #[must_use]
    pub fn last_parameters(&self) -> Option<SystemParameters> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            VisualizationCall::UpdateParameters(parameters) => Some((**parameters).clone()),
            _ => None,
        })
    }

    fn record(&self, call: VisualizationCall) -> Result<()> {
        self.calls.lock().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(KrystalError::remote("visualization", "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl Visualization for RecordingVisualization {
    async fn update_parameters(&self, parameters: &SystemParameters) -> Result<()> {
        self.record(VisualizationCall::UpdateParameters(Box::new(
            parameters.clone(),
        )))
    }

    async fn reset(&self) -> Result<()> {
        self.record(VisualizationCall::Reset)
    }

    async fn reinitialize(&self) -> Result<()> {
        self.record(VisualizationCall::Reinitialize)
    }

    async fn set_active(&self, active: bool) -> Result<()> {
        self.record(VisualizationCall::SetActive(active))
    }

    async fn message(&self, message: &str) -> Result<()> {
        self.record(VisualizationCall::Message(message.to_string()))
    }

    async fn set_numbers(&self, numbers: &[u8]) -> Result<()> {
        self.record(VisualizationCall::SetNumbers(numbers.to_vec()))
    }

    async fn clear_numbers(&self) -> Result<()> {
        self.record(VisualizationCall::ClearNumbers)
    }

    async fn valid(&self) -> Result<()> {
        self.record(VisualizationCall::Valid)
    }

    async fn invalid(&self) -> Result<()> {
        self.record(VisualizationCall::Invalid)
    }
}
