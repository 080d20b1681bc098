// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::source::Discovery;
use std::path::PathBuf;
use tracing::warn;

/// Expands glob patterns below a device root such as `/dev`
#[derive(Debug, Clone)]
pub struct GlobDiscovery {
    root: PathBuf,
}

impl GlobDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Discovery for GlobDiscovery {
    fn discover(&self, pattern: &str) -> Vec<PathBuf> {
        let full = self.root.join(pattern);
        let paths = match glob::glob(&full.to_string_lossy()) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Invalid device pattern {}: {}", full.display(), e);
                return Vec::new();
            }
        };

        paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Unreadable device entry: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_yields_nothing() {
        let discovery = GlobDiscovery::new("/dev");
        assert!(discovery.discover("tty[").is_empty());
    }

    #[test]
    fn missing_root_yields_nothing() {
        let discovery = GlobDiscovery::new("/nonexistent-krystal-root");
        assert!(discovery.discover("ttyACM*").is_empty());
    }
}
