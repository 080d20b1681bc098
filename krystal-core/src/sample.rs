// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Records produced by the decoders and the lookup API.
//!
//! Samples are immutable once built; decoders replace them wholesale.

use crate::{Action, Target};

/// One action/target pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Effect {
    pub action: Action,
    pub target: Target,
}

impl Effect {
    #[must_use]
    pub const fn new(action: Action, target: Target) -> Self {
        Self { action, target }
    }
}

/// Blood sample read from a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloodSample {
    /// Id of the tag the sample was read from
    pub tag_id: String,
    pub strength: i32,
    pub effect: Effect,
}

/// Refined krystal sample read from a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinedSample {
    /// Id of the tag the sample was read from
    pub tag_id: String,
    pub strength: i32,
    pub primary: Effect,
    pub secondary: Effect,
}

/// An effect carried by an enlisted record, with its own strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnlistedEffect {
    pub effect: Effect,
    pub strength: i32,
}

/// Personnel record looked up by number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enlisted {
    pub id: u64,
    pub name: String,
    pub number: String,
    /// Effects in application order
    pub effects: Vec<EnlistedEffect>,
}
