// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use krystal_core::Enlisted;
use krystal_session::EnlistedLookup;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Enlisted records held in memory, keyed by number
#[derive(Debug, Default)]
pub struct StaticLookup {
    records: HashMap<String, Enlisted>,
    queries: Mutex<Vec<String>>,
}

impl StaticLookup {
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = Enlisted>) -> Arc<Self> {
        Arc::new(Self {
            records: records
                .into_iter()
                .map(|record| (record.number.clone(), record))
                .collect(),
            queries: Mutex::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn empty() -> Arc<Self> {
        Self::new([])
    }

    /// Numbers looked up so far, oldest first
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl EnlistedLookup for StaticLookup {
    async fn enlisted_by_number(&self, number: &str) -> Option<Enlisted> {
        self.queries.lock().push(number.to_string());
        self.records.get(number).cloned()
    }
}
