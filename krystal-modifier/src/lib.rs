// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Modifier engine for the exhibit's particle system.
//!
//! Every `(action, target)` pair maps to a list of [`ParameterModifier`]s. Composing
//! a set of effects starts from [`SystemParameters::default`](krystal_core::SystemParameters)
//! and applies each effect's modifiers in order, scaled by the effect's strength.
//!
//! ```
//! use krystal_core::{Action, Effect, Target};
//! use krystal_modifier::{compose, ModifierTable};
//!
//! let table = ModifierTable::builtin();
//! let parameters = compose(&table, [(Effect::new(Action::Increasing, Target::Energy), 10)]);
//!
//! assert!((parameters.base_movement_speed - 6.0 * 2.81).abs() < 1e-9);
//! ```

mod apply;
mod builtin;
mod compose;
mod modifier;
mod table;

pub use self::apply::{apply, strength_factor};
pub use self::builtin::lookup;
pub use self::compose::{compose, compose_enlisted, compose_samples};
pub use self::modifier::{Operation, ParameterModifier};
pub use self::table::ModifierTable;
