// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Client of the enlisted lookup API.

use crate::jsonapi::{enlisted_from_document, Document};
use async_trait::async_trait;
use krystal_core::Enlisted;
use krystal_error::{KrystalError, Result};
use krystal_session::EnlistedLookup;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest error body kept in a remote error
const ERROR_BODY_LIMIT: usize = 200;

/// HTTP client for `GET {base}/enlisted/{number}`
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url`, e.g. `http://localhost:8000`.
    ///
    /// # Errors
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| KrystalError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the enlisted record registered under `number`.
    ///
    /// # Errors
    /// Returns a remote error on transport failures and non-2xx responses, and
    /// a decode error if the document does not describe an enlisted record.
    pub async fn fetch_enlisted(&self, number: &str) -> Result<Enlisted> {
        let operation = format!("GET /enlisted/{number}");
        let url = format!("{}/enlisted/{}", self.base_url, number);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.api+json")
            .send()
            .await
            .map_err(|e| KrystalError::remote(operation.clone(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KrystalError::remote(
                operation,
                format!(
                    "status {}: {}",
                    status,
                    body.chars().take(ERROR_BODY_LIMIT).collect::<String>()
                ),
            ));
        }

        let document: Document = response
            .json()
            .await
            .map_err(|e| KrystalError::remote(operation, e.to_string()))?;

        enlisted_from_document(&document)
    }
}

#[async_trait]
impl EnlistedLookup for ApiClient {
    async fn enlisted_by_number(&self, number: &str) -> Option<Enlisted> {
        match self.fetch_enlisted(number).await {
            Ok(enlisted) => {
                debug!("Found enlisted {} for {}", enlisted.name, number);
                Some(enlisted)
            }
            Err(e) => {
                warn!("Could not get enlisted {}: {}", number, e);
                None
            }
        }
    }
}
