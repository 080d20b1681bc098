// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::str::FromStr;
use krystal_error::KrystalError;

/// Purity grade printed on a tag, ordered worst to best.
///
/// The grade determines the strength a sample's effects are applied with,
/// from 2 ([`Purity::Polluted`]) to 12 ([`Purity::Perfect`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Purity {
    Polluted,
    Tarnished,
    Dirty,
    Blemished,
    Impure,
    Unblemished,
    Lucid,
    Stainless,
    Pristine,
    Immaculate,
    Perfect,
}

impl Purity {
    pub const ALL: &'static [Purity] = &[
        Purity::Polluted,
        Purity::Tarnished,
        Purity::Dirty,
        Purity::Blemished,
        Purity::Impure,
        Purity::Unblemished,
        Purity::Lucid,
        Purity::Stainless,
        Purity::Pristine,
        Purity::Immaculate,
        Purity::Perfect,
    ];

    /// Strength on the 2..=12 scale
    #[must_use]
    pub const fn strength(self) -> i32 {
        self as i32 + 2
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Purity::Polluted => "POLLUTED",
            Purity::Tarnished => "TARNISHED",
            Purity::Dirty => "DIRTY",
            Purity::Blemished => "BLEMISHED",
            Purity::Impure => "IMPURE",
            Purity::Unblemished => "UNBLEMISHED",
            Purity::Lucid => "LUCID",
            Purity::Stainless => "STAINLESS",
            Purity::Pristine => "PRISTINE",
            Purity::Immaculate => "IMMACULATE",
            Purity::Perfect => "PERFECT",
        }
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purity {
    type Err = KrystalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| KrystalError::unknown_purity(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strengths_follow_vocabulary_order() {
        assert_eq!(Purity::Polluted.strength(), 2);
        assert_eq!(Purity::Pristine.strength(), 10);
        assert_eq!(Purity::Perfect.strength(), 12);

        let strengths: Vec<i32> = Purity::ALL.iter().map(|p| p.strength()).collect();
        assert_eq!(strengths, (2..=12).collect::<Vec<_>>());
    }

    #[test]
    fn parses_tag_spelling() {
        assert_eq!("pristine".parse::<Purity>().unwrap(), Purity::Pristine);
        assert_eq!("PERFECT".parse::<Purity>().unwrap(), Purity::Perfect);
    }

    #[test]
    fn unknown_word_is_an_error() {
        let err = "SPARKLING".parse::<Purity>().unwrap_err();
        assert!(err.is_decode_failure());
    }
}
