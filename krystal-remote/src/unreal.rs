// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Remote control client of the visualization engine.
//!
//! Every command is a `PUT /remote/object/call` naming an object, a function and
//! optionally its parameters. Parameter pushes address the particle system, all
//! other commands address the controller blueprint.

use async_trait::async_trait;
use krystal_core::{Color, Parameter, ParameterValue, SystemParameters};
use krystal_error::{KrystalError, Result};
use krystal_session::{Visualization, ENTER_CODE};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

const SERVICE: &str = "visualization";

const SET_FLOAT: &str = "SetNiagaraVariableFloat";
const SET_COLOR: &str = "SetNiagaraVariableLinearColor";

/// Object paths the commands are addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrealTargets {
    /// Niagara component receiving parameter pushes and reinitialization
    pub system_object_path: String,
    /// Blueprint receiving every other command
    pub controller_object_path: String,
}

impl Default for UnrealTargets {
    fn default() -> Self {
        Self {
            system_object_path: "/Game/Medical/L_Medical.L_Medical:PersistentLevel.NiagaraActor_1.NiagaraComponent0".to_string(),
            controller_object_path: "/Game/Medical/L_Medical.L_Medical:PersistentLevel.BP_Controller_C_1".to_string(),
        }
    }
}

/// Body of one remote object call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectCall {
    pub object_path: String,
    pub function_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

impl ObjectCall {
    pub fn new(object_path: &str, function_name: &str) -> Self {
        Self {
            object_path: object_path.to_string(),
            function_name: function_name.to_string(),
            parameters: None,
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

fn linear_color(color: Color) -> Value {
    json!({ "R": color.r, "G": color.g, "B": color.b, "A": color.a })
}

/// One call per parameter, in declaration order, addressed to `system_object_path`
#[must_use]
pub fn parameter_calls(system_object_path: &str, parameters: &SystemParameters) -> Vec<ObjectCall> {
    Parameter::ALL
        .iter()
        .map(|&parameter| {
            let (function, value) = match parameters.get(parameter) {
                ParameterValue::Scalar(v) => (SET_FLOAT, json!(v)),
                ParameterValue::Color(c) => (SET_COLOR, linear_color(c)),
            };
            ObjectCall::new(system_object_path, function).with_parameters(json!({
                "InVariableName": parameter.external_name(),
                "InValue": value,
            }))
        })
        .collect()
}

/// HTTP client of the engine's remote control API.
///
/// The client starts disconnected; [`start`](Self::start) checks that the engine
/// answers and every command fails with a not-connected error until it did.
///
/// Whether a presentation is active is tracked here only; the engine has no
/// call for it.
#[derive(Debug)]
pub struct UnrealClient {
    http: Client,
    base_url: String,
    targets: UnrealTargets,
    connected: AtomicBool,
    active: AtomicBool,
}

impl UnrealClient {
    /// # Errors
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, targets: UnrealTargets) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| KrystalError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            targets,
            connected: AtomicBool::new(false),
            active: AtomicBool::new(false),
        })
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Last value given to [`Visualization::set_active`]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    #[must_use]
    pub const fn targets(&self) -> &UnrealTargets {
        &self.targets
    }

    /// Check that the engine answers, then reset it and show the code prompt.
    ///
    /// Returns whether the engine answered. An unreachable engine is logged and
    /// leaves the client disconnected.
    pub async fn start(&self) -> bool {
        let url = format!("{}/remote/info", self.base_url);
        match self.http.get(&url).send().await {
            Ok(_) => {
                info!("Connected to visualization at {}", self.base_url);
                self.connected.store(true, Ordering::Release);
            }
            Err(e) => {
                warn!("Could not connect to visualization at {}: {}", self.base_url, e);
                return false;
            }
        }

        if let Err(e) = self.reset().await {
            warn!("Visualization reset failed: {}", e);
        }
        if let Err(e) = self.message(ENTER_CODE).await {
            warn!("Visualization message failed: {}", e);
        }
        true
    }

    /// Clear the digit display and disconnect
    pub async fn stop(&self) {
        if !self.is_connected() {
            return;
        }
        if let Err(e) = self.clear_numbers().await {
            warn!("Visualization clear numbers failed: {}", e);
        }
        self.connected.store(false, Ordering::Release);
    }

    async fn call(&self, call: &ObjectCall) -> Result<()> {
        if !self.is_connected() {
            return Err(KrystalError::not_connected(SERVICE));
        }

        debug!("Calling {} on {}", call.function_name, call.object_path);
        let url = format!("{}/remote/object/call", self.base_url);
        let response = self
            .http
            .put(&url)
            .json(call)
            .send()
            .await
            .map_err(|e| KrystalError::remote(call.function_name.clone(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KrystalError::remote(
                call.function_name.clone(),
                format!("status {status}"),
            ));
        }
        Ok(())
    }

    async fn controller(&self, function: &str, parameters: Option<Value>) -> Result<()> {
        let mut call = ObjectCall::new(&self.targets.controller_object_path, function);
        call.parameters = parameters;
        self.call(&call).await
    }
}

#[async_trait]
impl Visualization for UnrealClient {
    async fn update_parameters(&self, parameters: &SystemParameters) -> Result<()> {
        for call in parameter_calls(&self.targets.system_object_path, parameters) {
            self.call(&call).await?;
        }
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        self.controller("Reset", None).await
    }

    async fn reinitialize(&self) -> Result<()> {
        self.call(&ObjectCall::new(
            &self.targets.system_object_path,
            "ReinitializeSystem",
        ))
        .await
    }

    async fn set_active(&self, active: bool) -> Result<()> {
        debug!("Presentation active: {}", active);
        self.active.store(active, Ordering::Release);
        Ok(())
    }

    async fn message(&self, message: &str) -> Result<()> {
        self.controller("Message", Some(json!({ "Message": message })))
            .await
    }

    async fn set_numbers(&self, numbers: &[u8]) -> Result<()> {
        self.controller("SetNumbers", Some(json!({ "Numbers": numbers })))
            .await
    }

    async fn clear_numbers(&self) -> Result<()> {
        self.controller("ClearNumbers", None).await
    }

    async fn valid(&self) -> Result<()> {
        self.controller("Valid", None).await
    }

    async fn invalid(&self) -> Result<()> {
        self.controller("Invalid", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_without_parameters_omits_the_key() {
        let body = serde_json::to_value(ObjectCall::new("/Game/X", "Reset")).unwrap();

        assert_eq!(body, json!({ "objectPath": "/Game/X", "functionName": "Reset" }));
    }

    #[test]
    fn parameter_calls_follow_field_kind() {
        let calls = parameter_calls("/Game/System", &SystemParameters::default());

        assert_eq!(calls.len(), Parameter::ALL.len());
        assert_eq!(calls[0].function_name, SET_FLOAT);
        assert_eq!(
            calls[0].parameters,
            Some(json!({ "InVariableName": "Base Spawn Rate", "InValue": 10.0 }))
        );

        let base_color = Parameter::ALL
            .iter()
            .position(|p| p.external_name() == "Base Color")
            .unwrap();
        assert_eq!(calls[base_color].function_name, SET_COLOR);
        assert_eq!(
            calls[base_color].parameters,
            Some(json!({
                "InVariableName": "Base Color",
                "InValue": { "R": 0.7, "G": 0.7, "B": 0.7, "A": 1.0 },
            }))
        );
    }
}
