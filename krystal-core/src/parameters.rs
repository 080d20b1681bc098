// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The parameter set pushed to the visualization engine.
//!
//! Every field is declared exactly once in the `system_parameters!` invocation below
//! with its Rust name, its [`Parameter`] key, its [`ParameterKind`], its default and the
//! external variable name the engine knows it by. Everything else (the struct, the
//! defaults, keyed access and the wire table) is generated from that declaration, so
//! the wire boundary never has to introspect the struct.

use crate::Color;
use core::fmt;
use core::str::FromStr;
use krystal_error::{KrystalError, Result};

/// Wire kind of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Scalar,
    Color,
}

/// A parameter value of either kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Scalar(f64),
    Color(Color),
}

impl ParameterValue {
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        match self {
            Self::Scalar(_) => ParameterKind::Scalar,
            Self::Color(_) => ParameterKind::Color,
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Color> for ParameterValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl TryFrom<ParameterValue> for f64 {
    type Error = KrystalError;

    fn try_from(value: ParameterValue) -> Result<Self> {
        match value {
            ParameterValue::Scalar(v) => Ok(v),
            ParameterValue::Color(_) => Err(KrystalError::unknown_word("scalar value", "color")),
        }
    }
}

impl TryFrom<ParameterValue> for Color {
    type Error = KrystalError;

    fn try_from(value: ParameterValue) -> Result<Self> {
        match value {
            ParameterValue::Color(c) => Ok(c),
            ParameterValue::Scalar(_) => Err(KrystalError::unknown_word("color value", "scalar")),
        }
    }
}

macro_rules! system_parameters {
    ($($field:ident: $ty:ty => $variant:ident, $kind:ident, $default:expr, $external:literal;)*) => {
        /// Key of one field of [`SystemParameters`]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Parameter {
            $($variant,)*
        }

        impl Parameter {
            /// Every parameter, in declaration order
            pub const ALL: &'static [Parameter] = &[$(Parameter::$variant,)*];

            /// Rust field name, also used by modifier tables
            #[must_use]
            pub const fn field_name(self) -> &'static str {
                match self {
                    $(Parameter::$variant => stringify!($field),)*
                }
            }

            /// Variable name on the visualization engine side
            #[must_use]
            pub const fn external_name(self) -> &'static str {
                match self {
                    $(Parameter::$variant => $external,)*
                }
            }

            #[must_use]
            pub const fn kind(self) -> ParameterKind {
                match self {
                    $(Parameter::$variant => ParameterKind::$kind,)*
                }
            }
        }

        /// Accumulator of every visual parameter, starting from the engine defaults.
        #[derive(Debug, Clone, PartialEq)]
        pub struct SystemParameters {
            $(pub $field: $ty,)*
        }

        impl Default for SystemParameters {
            fn default() -> Self {
                Self {
                    $($field: $default,)*
                }
            }
        }

        impl SystemParameters {
            /// Read a field by key
            #[must_use]
            pub fn get(&self, parameter: Parameter) -> ParameterValue {
                match parameter {
                    $(Parameter::$variant => ParameterValue::from(self.$field),)*
                }
            }

            /// Write a field by key
            ///
            /// # Errors
            /// Returns an error if the value kind does not match the field kind; the
            /// field is left unchanged.
            pub fn set(&mut self, parameter: Parameter, value: ParameterValue) -> Result<()> {
                match parameter {
                    $(Parameter::$variant => self.$field = <$ty>::try_from(value)?,)*
                }
                Ok(())
            }
        }
    };
}

system_parameters! {
    base_spawn_rate: f64 => BaseSpawnRate, Scalar, 10.0, "Base Spawn Rate";
    base_movement_speed: f64 => BaseMovementSpeed, Scalar, 6.0, "Base Movement";
    base_movement_jitter: f64 => BaseMovementJitter, Scalar, 0.1, "Base Movement Jitter";
    base_color: Color => BaseColor, Color, Color::rgba(0.7, 0.7, 0.7, 1.0), "Base Color";

    rbc_spawn_chance: f64 => RbcSpawnChance, Scalar, 0.5, "RBC Spawn Chance";
    rbc_tint: Color => RbcTint, Color, Color::rgba(0.0, 0.0, 0.0, 0.0), "RBC Tint";
    rbc_scale: f64 => RbcScale, Scalar, 1.0, "RBC Scale";
    rbc_movement_multiplier: f64 => RbcMovementMultiplier, Scalar, 1.0, "RBC Movement Multiplier";
    rbc_movement_jitter: f64 => RbcMovementJitter, Scalar, 0.0, "RBC Movement Jitter";
    rbc_normal_chance: f64 => RbcNormalChance, Scalar, 1.0, "RBC Normal Chance";
    rbc_helmet_chance: f64 => RbcHelmetChance, Scalar, 0.0, "RBC Helmet Chance";
    rbc_burr_chance: f64 => RbcBurrChance, Scalar, 0.0, "RBC Burr Chance";
    rbc_oval_chance: f64 => RbcOvalChance, Scalar, 0.0, "RBC Oval Chance";

    wbc_spawn_chance: f64 => WbcSpawnChance, Scalar, 0.01, "WBC Spawn Chance";
    wbc_tint: Color => WbcTint, Color, Color::rgba(0.0, 0.0, 0.0, 0.0), "WBC Tint";
    wbc_scale: f64 => WbcScale, Scalar, 1.0, "WBC Scale";
    wbc_movement_multiplier: f64 => WbcMovementMultiplier, Scalar, 2.0, "WBC Movement Multiplier";
    wbc_movement_jitter: f64 => WbcMovementJitter, Scalar, 0.0, "WBC Movement Jitter";

    platelet_spawn_chance: f64 => PlateletSpawnChance, Scalar, 0.1, "Platelet Spawn Chance";
    platelet_tint: Color => PlateletTint, Color, Color::rgba(0.0, 0.0, 0.0, 0.0), "Platelet Tint";
    platelet_scale: f64 => PlateletScale, Scalar, 1.0, "Platelet Scale";
    platelet_movement_multiplier: f64 => PlateletMovementMultiplier, Scalar, 0.75, "Platelet Movement Multiplier";
    platelet_movement_jitter: f64 => PlateletMovementJitter, Scalar, 0.0, "Platelet Movement Jitter";

    strand_tint: Color => StrandTint, Color, Color::rgba(-0.2, -0.2, -0.2, 0.0), "Coagulated Strand Tint";
    strand_spawn_chance: f64 => StrandSpawnChance, Scalar, 0.0, "Coagulated Strand Spawn Chance";
    strand_scale: f64 => StrandScale, Scalar, 1.0, "Coagulated Strand Scale";
    strand_lifetime: f64 => StrandLifetime, Scalar, 1000.0, "Coagulated Strand Lifetime";
    strand_movement: f64 => StrandMovement, Scalar, 0.03, "Coagulated Strand Movement";

    krystal_spawn_chance: f64 => KrystalSpawnChance, Scalar, 0.0, "Krystal Spawn Chance";
    krystal_tint: Color => KrystalTint, Color, Color::rgba(-0.4, -0.3, 2.0, 0.0), "Krystal Tint";
    krystal_scale: f64 => KrystalScale, Scalar, 0.5, "Krystal Scale";
    krystal_movement_multiplier: f64 => KrystalMovementMultiplier, Scalar, 1.0, "Krystal Movement Multiplier";
    krystal_movement_jitter: f64 => KrystalMovementJitter, Scalar, 0.0, "Krystal Movement Jitter";

    plant_spawn_chance: f64 => PlantSpawnChance, Scalar, 0.0001, "Plant Spawn Chance";
    plant_tint: Color => PlantTint, Color, Color::rgba(-0.2, -0.1, -0.2, 0.0), "Plant Tint";
    plant_scale: f64 => PlantScale, Scalar, 1.0, "Plant Scale";
    plant_movement_multiplier: f64 => PlantMovementMultiplier, Scalar, 1.0, "Plant Movement Multiplier";
    plant_movement_jitter: f64 => PlantMovementJitter, Scalar, 0.0, "Plant Movement Jitter";

    dead_spawn_chance: f64 => DeadSpawnChance, Scalar, 0.0001, "Dead Cell Spawn Chance";
    dead_tint: Color => DeadTint, Color, Color::rgba(0.0, 0.0, 0.0, 0.0), "Dead Cell Tint";
    dead_scale: f64 => DeadScale, Scalar, 1.0, "Dead Cell Scale";
    dead_movement_multiplier: f64 => DeadMovementMultiplier, Scalar, 1.0, "Dead Cell Movement Multiplier";
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Parameter {
    type Err = KrystalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.field_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| KrystalError::unknown_word("parameter", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_access_matches_fields() {
        let mut parameters = SystemParameters::default();
        assert_eq!(
            parameters.get(Parameter::BaseMovementSpeed),
            ParameterValue::Scalar(6.0)
        );

        parameters
            .set(Parameter::RbcTint, Color::new(1.0, 0.0, 0.0).into())
            .unwrap();
        assert_eq!(parameters.rbc_tint, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn set_rejects_mismatched_kind() {
        let mut parameters = SystemParameters::default();
        assert!(parameters
            .set(Parameter::RbcTint, ParameterValue::Scalar(1.0))
            .is_err());
        assert_eq!(parameters, SystemParameters::default());
    }

    #[test]
    fn table_is_consistent() {
        let parameters = SystemParameters::default();
        assert_eq!(Parameter::ALL.len(), 42);
        for &parameter in Parameter::ALL {
            assert_eq!(parameters.get(parameter).kind(), parameter.kind());
            assert_eq!(parameter.field_name().parse::<Parameter>().unwrap(), parameter);
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "krystal_Scale".parse::<Parameter>().unwrap(),
            Parameter::KrystalScale
        );
        assert!("plant_spawn_rate".parse::<Parameter>().is_err());
    }
}
