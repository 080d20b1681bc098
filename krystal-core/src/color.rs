// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::ops::{Add, Mul};

/// Linear RGBA color used for tints.
///
/// Components are unbounded: tints are offsets added onto a base color by the
/// visualization engine, so negative values are meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Opaque color (alpha 1.0)
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Apply `f` to every component, alpha included
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::rgba(f(self.r), f(self.g), f(self.b), f(self.a))
    }

    /// Combine two colors component by component, alpha included
    #[must_use]
    pub fn zip(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self::rgba(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
            f(self.a, other.a),
        )
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        self.zip(rhs, |l, r| l + r)
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        self.zip(rhs, |l, r| l * r)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        self.map(|c| c * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_componentwise() {
        let tint = Color::rgba(0.0, 0.0, 0.0, 0.0) + Color::new(0.25, -0.5, -0.5) * 0.5;
        assert_eq!(tint, Color::rgba(0.125, -0.25, -0.25, 0.5));

        let product = Color::rgba(1.0, 2.0, 3.0, 0.5) * Color::rgba(2.0, 2.0, 2.0, 2.0);
        assert_eq!(product, Color::rgba(2.0, 4.0, 6.0, 1.0));
    }
}
