// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::modifier::{Operation, ParameterModifier};
use core::ops::{Add, Mul};
use krystal_core::{ParameterValue, SystemParameters};
use tracing::warn;

/// Scale applied to modifier values for a given strength.
///
/// Maps the purity scale linearly: strength 2 gives `0.05`, strength 12 gives `1.0`.
#[must_use]
pub fn strength_factor(strength: i32) -> f64 {
    0.05 + (f64::from(strength - 2) / 10.0) * 0.95
}

/// Apply `modifiers` in order onto `parameters`.
///
/// A modifier whose value kind does not match its field is logged and skipped.
pub fn apply(parameters: &mut SystemParameters, modifiers: &[ParameterModifier], strength: i32) {
    let factor = strength_factor(strength);

    for modifier in modifiers {
        let current = parameters.get(modifier.parameter);
        let updated = match (current, modifier.value) {
            (ParameterValue::Scalar(current), ParameterValue::Scalar(value)) => {
                ParameterValue::Scalar(combine(modifier.operation, current, value, factor))
            }
            (ParameterValue::Color(current), ParameterValue::Color(value)) => {
                ParameterValue::Color(combine(modifier.operation, current, value, factor))
            }
            (current, value) => {
                warn!(
                    "Skipping {:?} modifier on {:?} field {}",
                    value.kind(),
                    current.kind(),
                    modifier.parameter
                );
                continue;
            }
        };

        if let Err(e) = parameters.set(modifier.parameter, updated) {
            warn!("Failed to set {}: {}", modifier.parameter, e);
        }
    }
}

fn combine<T>(operation: Operation, current: T, value: T, factor: f64) -> T
where
    T: Copy + Add<Output = T> + Mul<Output = T> + Mul<f64, Output = T>,
{
    match operation {
        Operation::Add => current + value * factor,
        Operation::Multiply => current * (value * (1.0 + factor / 2.0)),
        Operation::Set => value * factor,
        Operation::SetUnscaled => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krystal_core::{Color, Parameter};

    #[test]
    fn factor_endpoints() {
        assert!((strength_factor(2) - 0.05).abs() < 1e-12);
        assert!((strength_factor(10) - 0.81).abs() < 1e-12);
        assert!((strength_factor(12) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn kind_mismatch_is_a_no_op() {
        let mut parameters = SystemParameters::default();
        let modifiers = [
            ParameterModifier::add(Parameter::RbcTint, 1.0),
            ParameterModifier::add_color(Parameter::RbcScale, Color::new(1.0, 1.0, 1.0)),
        ];

        apply(&mut parameters, &modifiers, 12);

        assert_eq!(parameters, SystemParameters::default());
    }

    #[test]
    fn color_operations_are_componentwise() {
        let mut parameters = SystemParameters::default();
        let modifiers = [ParameterModifier::add_color(
            Parameter::RbcTint,
            Color::new(0.0, 0.0, 1.0),
        )];

        apply(&mut parameters, &modifiers, 12);

        assert_eq!(parameters.rbc_tint, Color::rgba(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn set_unscaled_ignores_strength() {
        let mut parameters = SystemParameters::default();
        let modifiers = [ParameterModifier::new(
            Parameter::StrandLifetime,
            ParameterValue::Scalar(42.0),
            Operation::SetUnscaled,
        )];

        apply(&mut parameters, &modifiers, 2);

        assert_eq!(parameters.strand_lifetime, 42.0);
    }
}
