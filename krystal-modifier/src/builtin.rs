// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The exhibit's effect table.

#![allow(clippy::enum_glob_use)]

use crate::modifier::ParameterModifier;
use krystal_core::Action::*;
use krystal_core::Parameter::*;
use krystal_core::Target::*;
use krystal_core::{Action, Color, Target};

const fn add(parameter: krystal_core::Parameter, value: f64) -> ParameterModifier {
    ParameterModifier::add(parameter, value)
}

const fn mul(parameter: krystal_core::Parameter, value: f64) -> ParameterModifier {
    ParameterModifier::mul(parameter, value)
}

const fn set(parameter: krystal_core::Parameter, value: f64) -> ParameterModifier {
    ParameterModifier::set(parameter, value)
}

const fn tint(parameter: krystal_core::Parameter, r: f64, g: f64, b: f64) -> ParameterModifier {
    ParameterModifier::add_color(parameter, Color::new(r, g, b))
}

// Pairs missing here have no modifiers
pub(crate) static BUILTIN: &[(Action, Target, &[ParameterModifier])] = &[
    (Increasing, Energy, &[mul(BaseMovementSpeed, 2.0)]),
    (Increasing, Flesh, &[mul(RbcSpawnChance, 2.0), mul(WbcSpawnChance, 2.0)]),
    (Increasing, Gas, &[tint(RbcTint, 0.25, -0.5, -0.5)]),
    (Increasing, Krystal, &[mul(KrystalSpawnChance, 2.0)]),
    (Increasing, Liquid, &[mul(BaseMovementSpeed, 2.0), mul(BaseSpawnRate, 0.5)]),
    (Increasing, Plant, &[mul(PlantSpawnChance, 2.0)]),
    (Decreasing, Energy, &[mul(BaseMovementSpeed, 0.5)]),
    (Decreasing, Flesh, &[mul(RbcSpawnChance, 0.5), mul(WbcSpawnChance, 0.5)]),
    (Decreasing, Gas, &[tint(RbcTint, 0.05, 0.15, 0.15)]),
    (Decreasing, Krystal, &[mul(KrystalSpawnChance, 0.5)]),
    (Decreasing, Liquid, &[mul(BaseMovementSpeed, 0.5), mul(BaseSpawnRate, 2.0)]),
    (Decreasing, Plant, &[mul(PlantSpawnChance, 0.5)]),
    (
        Creating,
        Energy,
        &[
            set(StrandSpawnChance, 1.0),
            ParameterModifier::set_color(StrandTint, Color::new(0.9, 1.5, 2.0)),
            set(StrandLifetime, 1.0),
        ],
    ),
    (Creating, Flesh, &[add(RbcSpawnChance, 0.5), add(WbcSpawnChance, 0.5)]),
    (Creating, Sound, &[add(BaseMovementJitter, 1.0)]),
    (Creating, Krystal, &[add(KrystalSpawnChance, 1.0)]),
    (
        Creating,
        Light,
        &[ParameterModifier::set_color(BaseColor, Color::new(7.0, 10.0, 7.0))],
    ),
    (Creating, Liquid, &[mul(BaseMovementSpeed, 2.0), mul(BaseSpawnRate, 0.5)]),
    (Creating, Plant, &[add(PlantSpawnChance, 1.0)]),
    (Destroying, Energy, &[mul(BaseMovementSpeed, 0.1)]),
    (Destroying, Flesh, &[add(RbcSpawnChance, -1.0), add(WbcSpawnChance, -1.0)]),
    (Destroying, Gas, &[tint(RbcTint, 0.10, 0.25, 0.25)]),
    (Destroying, Krystal, &[set(KrystalSpawnChance, 0.0)]),
    (Destroying, Plant, &[set(PlantSpawnChance, 0.0)]),
    (Expanding, Flesh, &[mul(BaseMovementSpeed, 2.0), mul(BaseSpawnRate, 0.5)]),
    (Expanding, Gas, &[add(DeadSpawnChance, 1.0)]),
    (Expanding, Krystal, &[add(KrystalScale, 0.5)]),
    (Expanding, Plant, &[add(PlantScale, 0.5)]),
    (Contracting, Flesh, &[mul(BaseMovementSpeed, 0.5), mul(BaseSpawnRate, 2.0)]),
    (Contracting, Krystal, &[add(KrystalScale, -0.5)]),
    (Contracting, Plant, &[add(PlantScale, -0.5)]),
    (Fortifying, Flesh, &[add(WbcSpawnChance, 1.0)]),
    (Deteriorating, Flesh, &[add(WbcSpawnChance, -1.0)]),
    (Lightening, Flesh, &[mul(BaseMovementSpeed, 2.0)]),
    (Lightening, Krystal, &[add(KrystalMovementMultiplier, 0.5)]),
    (Lightening, Plant, &[add(PlantMovementMultiplier, 0.5)]),
    (Encumbering, Flesh, &[mul(BaseMovementSpeed, 0.5)]),
    (Encumbering, Krystal, &[add(KrystalMovementMultiplier, -0.5)]),
    (Encumbering, Plant, &[add(PlantMovementMultiplier, -0.5)]),
    (Cooling, Flesh, &[add(BaseMovementJitter, -0.5)]),
    (Cooling, Krystal, &[add(KrystalMovementJitter, -0.5)]),
    (Cooling, Plant, &[add(PlantMovementJitter, -0.5)]),
    (Heating, Flesh, &[add(BaseMovementJitter, 0.5)]),
    (Heating, Krystal, &[add(KrystalMovementJitter, 0.5)]),
    (Heating, Plant, &[add(PlantMovementJitter, 0.5)]),
    (Conducting, Energy, &[add(RbcBurrChance, 1.0), add(RbcNormalChance, -1.0)]),
    (Conducting, Light, &[tint(RbcTint, 0.25, 0.25, 0.25)]),
    (Conducting, Liquid, &[add(RbcBurrChance, 1.0), add(RbcNormalChance, -1.0)]),
    (Insulating, Light, &[tint(RbcTint, -0.25, -0.25, -0.25)]),
    (Absorbing, Energy, &[add(RbcBurrChance, 1.0), add(RbcNormalChance, -1.0)]),
    (Absorbing, Gas, &[add(RbcScale, 0.25)]),
    (
        Absorbing,
        Krystal,
        &[tint(RbcTint, 0.0, 0.0, 1.0), tint(WbcTint, 0.0, 0.0, 1.0)],
    ),
    (Releasing, Gas, &[add(RbcScale, -0.25)]),
    (Solidifying, Flesh, &[add(StrandSpawnChance, 0.01)]),
    (Solidifying, Gas, &[add(StrandSpawnChance, 0.01)]),
    (Solidifying, Liquid, &[add(StrandSpawnChance, 0.01)]),
];

/// Modifiers of the built-in table for `(action, target)`.
///
/// Returns `None` for pairs with no modifiers.
#[must_use]
pub fn lookup(action: Action, target: Target) -> Option<&'static [ParameterModifier]> {
    BUILTIN
        .iter()
        .find(|(a, t, _)| *a == action && *t == target)
        .map(|(_, _, modifiers)| *modifiers)
        .filter(|modifiers| !modifiers.is_empty())
}
