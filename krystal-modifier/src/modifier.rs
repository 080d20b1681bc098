// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::str::FromStr;
use krystal_core::{Color, Parameter, ParameterValue};
use krystal_error::KrystalError;

/// How a modifier combines its value with the current parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `current + value * factor`
    Add,
    /// `current * (value * (1 + factor / 2))`
    Multiply,
    /// `value * factor`
    Set,
    /// `value`
    SetUnscaled,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Multiply => "mul",
            Operation::Set => "set",
            Operation::SetUnscaled => "set_unscaled",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = KrystalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "mul" | "multiply" => Ok(Operation::Multiply),
            "set" => Ok(Operation::Set),
            "set_unscaled" => Ok(Operation::SetUnscaled),
            _ => Err(KrystalError::unknown_word("operation", s)),
        }
    }
}

/// One change to one system parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterModifier {
    pub parameter: Parameter,
    pub value: ParameterValue,
    pub operation: Operation,
}

impl ParameterModifier {
    #[must_use]
    pub const fn new(parameter: Parameter, value: ParameterValue, operation: Operation) -> Self {
        Self {
            parameter,
            value,
            operation,
        }
    }

    #[must_use]
    pub const fn add(parameter: Parameter, value: f64) -> Self {
        Self::new(parameter, ParameterValue::Scalar(value), Operation::Add)
    }

    #[must_use]
    pub const fn add_color(parameter: Parameter, value: Color) -> Self {
        Self::new(parameter, ParameterValue::Color(value), Operation::Add)
    }

    #[must_use]
    pub const fn mul(parameter: Parameter, value: f64) -> Self {
        Self::new(parameter, ParameterValue::Scalar(value), Operation::Multiply)
    }

    #[must_use]
    pub const fn set(parameter: Parameter, value: f64) -> Self {
        Self::new(parameter, ParameterValue::Scalar(value), Operation::Set)
    }

    #[must_use]
    pub const fn set_color(parameter: Parameter, value: Color) -> Self {
        Self::new(parameter, ParameterValue::Color(value), Operation::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_words() {
        assert_eq!("MUL".parse::<Operation>().unwrap(), Operation::Multiply);
        assert_eq!("multiply".parse::<Operation>().unwrap(), Operation::Multiply);
        assert_eq!("set_unscaled".parse::<Operation>().unwrap(), Operation::SetUnscaled);
        assert!("divide".parse::<Operation>().is_err());

        for op in [
            Operation::Add,
            Operation::Multiply,
            Operation::Set,
            Operation::SetUnscaled,
        ] {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
    }
}
