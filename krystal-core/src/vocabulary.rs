// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The closed action and target vocabularies.
//!
//! Words arrive lower-cased from tags and capitalized from the lookup API, so parsing
//! ignores ASCII case.

use core::fmt;
use core::str::FromStr;
use krystal_error::KrystalError;

macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            /// Every word of the vocabulary, in table order
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// The canonical spelling of this word
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)*
                }
            }

            /// Position of this word in [`Self::ALL`]
            #[must_use]
            pub const fn index(self) -> usize {
                self as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = KrystalError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|word| word.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| KrystalError::unknown_word($kind, s))
            }
        }
    };
}

vocabulary!(
    /// The verb of an effect
    Action, "action" {
        Increasing,
        Decreasing,
        Creating,
        Destroying,
        Expanding,
        Contracting,
        Fortifying,
        Deteriorating,
        Lightening,
        Encumbering,
        Cooling,
        Heating,
        Conducting,
        Insulating,
        Absorbing,
        Releasing,
        Solidifying,
    }
);

vocabulary!(
    /// The domain an effect acts on
    Target, "target" {
        Energy,
        Flesh,
        Sound,
        Gas,
        Krystal,
        Light,
        Liquid,
        Mind,
        Plant,
        Solid,
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ignoring_case() {
        assert_eq!("increasing".parse::<Action>().unwrap(), Action::Increasing);
        assert_eq!("SOLIDIFYING".parse::<Action>().unwrap(), Action::Solidifying);
        assert_eq!(" Krystal ".parse::<Target>().unwrap(), Target::Krystal);
    }

    #[test]
    fn rejects_unknown_words() {
        let err = "None".parse::<Action>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown action: None");
        assert!("Water".parse::<Target>().is_err());
    }

    #[test]
    fn vocabulary_sizes() {
        assert_eq!(Action::ALL.len(), 17);
        assert_eq!(Target::ALL.len(), 10);
        assert_eq!(Target::Solid.index(), 9);
    }
}
