// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Domain vocabulary shared by every Krystal crate.
//!
//! - [`Action`] and [`Target`] are the two axes of an effect and key the modifier table
//! - [`Purity`] maps the purity words printed on refined tags to a 2..=12 strength
//! - [`BloodSample`], [`RefinedSample`] and [`Enlisted`] are the records the exhibit reacts to
//! - [`SystemParameters`] is the full named set of fields pushed to the visualization engine

pub mod color;
pub mod parameters;
pub mod purity;
pub mod sample;
pub mod vocabulary;

pub use self::color::Color;
pub use self::parameters::{Parameter, ParameterKind, ParameterValue, SystemParameters};
pub use self::purity::Purity;
pub use self::sample::{BloodSample, Effect, Enlisted, EnlistedEffect, RefinedSample};
pub use self::vocabulary::{Action, Target};
