// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// Where the session is in the interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// Waiting for a five digit code
    #[default]
    Input,
    /// A wrong code was entered; input is ignored until the lock expires
    InputLocked,
    /// Waiting for a blood and a refined sample on the reader
    SampleLookup,
    /// Showing the composition of the presented samples
    SampleActive,
    /// Showing the composition of an enlisted record
    Enlisted,
}

impl SessionState {
    /// Digits the state accepts before acting on them
    #[must_use]
    pub const fn max_digits(self) -> usize {
        match self {
            SessionState::Input => 5,
            SessionState::InputLocked => 0,
            SessionState::SampleLookup | SessionState::SampleActive | SessionState::Enlisted => 3,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
