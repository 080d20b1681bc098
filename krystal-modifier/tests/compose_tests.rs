// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use krystal_core::{Action, Effect, Parameter, SystemParameters, Target};
use krystal_modifier::{
    apply, compose, compose_enlisted, compose_samples, strength_factor, ModifierTable,
    ParameterModifier,
};
use krystal_test_utils::fixtures::{blood_sample, enlisted_record, refined_sample};

const EPSILON: f64 = 1e-9;

#[test]
fn test_empty_modifier_list_leaves_defaults() -> anyhow::Result<()> {
    // Arrange
    let mut parameters = SystemParameters::default();

    // Act
    apply(&mut parameters, &[], 12);

    // Assert
    assert_eq!(parameters, SystemParameters::default());

    Ok(())
}

#[test]
fn test_add_scales_with_strength() -> anyhow::Result<()> {
    // Arrange
    let modifiers = [ParameterModifier::add(Parameter::RbcScale, 0.25)];

    // Act
    let results: Vec<f64> = (2..=12)
        .map(|strength| {
            let mut parameters = SystemParameters::default();
            apply(&mut parameters, &modifiers, strength);
            parameters.rbc_scale
        })
        .collect();

    // Assert
    for (strength, value) in (2..=12).zip(&results) {
        assert!((value - (1.0 + 0.25 * strength_factor(strength))).abs() < EPSILON);
    }
    assert!(results.windows(2).all(|pair| pair[0] < pair[1]));
    assert!((results[0] - 1.0125).abs() < EPSILON);
    assert!((results[10] - 1.25).abs() < EPSILON);

    Ok(())
}

#[test]
fn test_increasing_energy_at_strength_ten() -> anyhow::Result<()> {
    // Arrange
    let table = ModifierTable::builtin();
    let effect = Effect::new(Action::Increasing, Target::Energy);

    // Act
    let parameters = compose(&table, [(effect, 10)]);

    // Assert
    assert!((parameters.base_movement_speed - 6.0 * 2.81).abs() < EPSILON);

    Ok(())
}

#[test]
fn test_composition_order_matters() -> anyhow::Result<()> {
    // Arrange
    let table = ModifierTable::builtin();
    let set_strands = (Effect::new(Action::Creating, Target::Energy), 12);
    let add_strands = (Effect::new(Action::Solidifying, Target::Flesh), 12);

    // Act
    let set_then_add = compose(&table, [set_strands, add_strands]);
    let add_then_set = compose(&table, [add_strands, set_strands]);

    // Assert
    assert!((set_then_add.strand_spawn_chance - 1.01).abs() < EPSILON);
    assert!((add_then_set.strand_spawn_chance - 1.0).abs() < EPSILON);

    Ok(())
}

#[test]
fn test_samples_apply_blood_then_primary_then_secondary() -> anyhow::Result<()> {
    // Arrange
    let table = ModifierTable::builtin();
    let blood = blood_sample();
    let refined = refined_sample();

    // Act
    let parameters = compose_samples(&table, &blood, &refined);

    // Assert
    let expected = compose(
        &table,
        [
            (blood.effect, blood.strength),
            (refined.primary, refined.strength),
            (refined.secondary, refined.strength),
        ],
    );
    assert_eq!(parameters, expected);
    assert!((parameters.base_movement_speed - 6.0 * 2.81).abs() < EPSILON);
    assert!((parameters.krystal_spawn_chance - 1.0).abs() < EPSILON);
    assert!((parameters.base_movement_jitter - 0.6).abs() < EPSILON);

    Ok(())
}

#[test]
fn test_enlisted_effects_apply_in_list_order() -> anyhow::Result<()> {
    // Arrange
    let table = ModifierTable::builtin();
    let enlisted = enlisted_record();

    // Act
    let parameters = compose_enlisted(&table, &enlisted);

    // Assert
    assert!((parameters.base_movement_speed - 6.0 * 2.81).abs() < EPSILON);
    assert_eq!(parameters.krystal_spawn_chance, 0.0);

    Ok(())
}

#[test]
fn test_effects_without_modifiers_contribute_nothing() -> anyhow::Result<()> {
    // Arrange
    let table = ModifierTable::builtin();

    // Act
    let parameters = compose(
        &table,
        [
            (Effect::new(Action::Increasing, Target::Mind), 12),
            (Effect::new(Action::Releasing, Target::Solid), 2),
        ],
    );

    // Assert
    assert_eq!(parameters, SystemParameters::default());

    Ok(())
}
