// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::builtin::BUILTIN;
use crate::modifier::{Operation, ParameterModifier};
use krystal_core::{Action, Color, Effect, Parameter, ParameterValue, Target};
use krystal_error::{KrystalError, Result, ResultExt};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, warn};

/// Modifiers for every `(action, target)` pair.
///
/// [`ModifierTable::builtin`] holds the exhibit's own table. A replacement can be
/// loaded from TOML:
///
/// ```toml
/// [[modifier]]
/// action = "Increasing"
/// target = "Energy"
/// parameter = "base_movement_speed"
/// operation = "mul"
/// value = 2.0
///
/// [[modifier]]
/// action = "Absorbing"
/// target = "Krystal"
/// parameter = "rbc_tint"
/// operation = "add"
/// value = { r = 0.0, g = 0.0, b = 1.0 }
/// ```
///
/// Entries keep file order within a pair.
#[derive(Debug, Clone, Default)]
pub struct ModifierTable {
    cells: HashMap<Effect, Vec<ParameterModifier>>,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    modifier: Vec<EntryDef>,
}

#[derive(Debug, Deserialize)]
struct EntryDef {
    action: String,
    target: String,
    parameter: String,
    operation: String,
    value: ValueDef,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum ValueDef {
    Scalar(f64),
    Color {
        r: f64,
        g: f64,
        b: f64,
        #[serde(default = "opaque")]
        a: f64,
    },
}

const fn opaque() -> f64 {
    1.0
}

impl From<ValueDef> for ParameterValue {
    fn from(value: ValueDef) -> Self {
        match value {
            ValueDef::Scalar(v) => ParameterValue::Scalar(v),
            ValueDef::Color { r, g, b, a } => ParameterValue::Color(Color::rgba(r, g, b, a)),
        }
    }
}

impl EntryDef {
    fn resolve(&self) -> Result<(Effect, ParameterModifier)> {
        let effect = Effect::new(self.action.parse::<Action>()?, self.target.parse::<Target>()?);
        let parameter = self.parameter.parse::<Parameter>()?;
        let operation = self.operation.parse::<Operation>()?;
        let value = ParameterValue::from(self.value);

        if value.kind() != parameter.kind() {
            return Err(KrystalError::config(format!(
                "{:?} value for {:?} parameter {}",
                value.kind(),
                parameter.kind(),
                parameter
            )));
        }

        Ok((effect, ParameterModifier::new(parameter, value, operation)))
    }
}

impl ModifierTable {
    /// The exhibit's built-in table
    #[must_use]
    pub fn builtin() -> Self {
        let cells = BUILTIN
            .iter()
            .map(|(action, target, modifiers)| (Effect::new(*action, *target), modifiers.to_vec()))
            .collect();
        Self { cells }
    }

    /// Parse a table from TOML.
    ///
    /// Entries naming an unknown action, target, parameter or operation, or giving a
    /// value of the wrong kind, are logged and skipped.
    ///
    /// # Errors
    /// Returns [`KrystalError::Config`] if the document is not valid TOML or does not
    /// have the table's shape.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: TableFile = toml::from_str(source).context("invalid modifier table")?;
        let mut table = Self::default();

        for entry in &file.modifier {
            match entry.resolve() {
                Ok((effect, modifier)) => table.push(effect, modifier),
                Err(e) => warn!(
                    "Skipping modifier {}/{} {}: {}",
                    entry.action, entry.target, entry.parameter, e
                ),
            }
        }

        info!("Loaded {} modifier cell(s)", table.cells.len());
        Ok(table)
    }

    /// Replace every cell `other` defines, keeping the rest
    pub fn overlay(&mut self, other: ModifierTable) {
        self.cells.extend(other.cells);
    }

    pub fn push(&mut self, effect: Effect, modifier: ParameterModifier) {
        self.cells.entry(effect).or_default().push(modifier);
    }

    /// Modifiers for `effect`, `None` when the pair has none
    #[must_use]
    pub fn lookup(&self, effect: Effect) -> Option<&[ParameterModifier]> {
        self.cells
            .get(&effect)
            .map(Vec::as_slice)
            .filter(|modifiers| !modifiers.is_empty())
    }

    /// Number of pairs with at least one modifier
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.values().filter(|m| !m.is_empty()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_matches_static_lookup() {
        let table = ModifierTable::builtin();

        for action in Action::ALL {
            for target in Target::ALL {
                assert_eq!(
                    table.lookup(Effect::new(*action, *target)),
                    crate::lookup(*action, *target)
                );
            }
        }
    }

    #[test]
    fn color_alpha_defaults_to_opaque() {
        let table = ModifierTable::from_toml_str(
            r#"
            [[modifier]]
            action = "absorbing"
            target = "krystal"
            parameter = "wbc_tint"
            operation = "add"
            value = { r = 0.0, g = 0.0, b = 1.0 }
            "#,
        )
        .unwrap();

        let modifiers = table
            .lookup(Effect::new(Action::Absorbing, Target::Krystal))
            .unwrap();
        assert_eq!(
            modifiers[0].value,
            ParameterValue::Color(Color::rgba(0.0, 0.0, 1.0, 1.0))
        );
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let err = ModifierTable::from_toml_str("[[modifier]]\naction = 3").unwrap_err();
        assert!(matches!(err, KrystalError::Config { .. }));
    }
}
