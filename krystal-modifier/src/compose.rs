// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::apply::apply;
use crate::table::ModifierTable;
use krystal_core::{BloodSample, Effect, Enlisted, RefinedSample, SystemParameters};
use tracing::{debug, warn};

/// Apply every `(effect, strength)` in order onto a fresh set of defaults.
///
/// Effects without modifiers are logged and contribute nothing. Order matters: a
/// `Set` after a `Multiply` discards the product, the other way round it does not.
pub fn compose<I>(table: &ModifierTable, effects: I) -> SystemParameters
where
    I: IntoIterator<Item = (Effect, i32)>,
{
    let mut parameters = SystemParameters::default();

    for (effect, strength) in effects {
        match table.lookup(effect) {
            Some(modifiers) => {
                debug!(
                    "Applying {}/{} at strength {}",
                    effect.action, effect.target, strength
                );
                apply(&mut parameters, modifiers, strength);
            }
            None => warn!("No modifiers for {}/{}", effect.action, effect.target),
        }
    }

    parameters
}

/// Blood effect first, then the refined sample's primary and secondary effects.
pub fn compose_samples(
    table: &ModifierTable,
    blood: &BloodSample,
    refined: &RefinedSample,
) -> SystemParameters {
    compose(
        table,
        [
            (blood.effect, blood.strength),
            (refined.primary, refined.strength),
            (refined.secondary, refined.strength),
        ],
    )
}

/// The record's effects in list order, each at its own strength.
pub fn compose_enlisted(table: &ModifierTable, enlisted: &Enlisted) -> SystemParameters {
    compose(
        table,
        enlisted.effects.iter().map(|e| (e.effect, e.strength)),
    )
}
