// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sample records and reader lines used across the test suites.

use krystal_core::{
    Action, BloodSample, Effect, Enlisted, EnlistedEffect, Purity, RefinedSample, Target,
};

/// A blood sample as the RFID reader reports it
#[must_use]
pub fn blood_line(tag_id: &str, action: Action, target: Target, purity: Purity) -> String {
    format!("tag found: {tag_id} blood {action} {target} x x {purity}")
}

/// A refined sample as the RFID reader reports it
#[must_use]
pub fn refined_line(tag_id: &str, primary: Effect, secondary: Effect, purity: Purity) -> String {
    format!(
        "tag found: {tag_id} refined {} {} {} {} {purity}",
        primary.action, primary.target, secondary.action, secondary.target
    )
}

#[must_use]
pub fn lost_line(tag_id: &str) -> String {
    format!("tag lost: {tag_id}")
}

/// Increasing/Energy at PRISTINE purity from tag `B1`
#[must_use]
pub fn blood_sample() -> BloodSample {
    BloodSample {
        tag_id: "B1".to_string(),
        strength: Purity::Pristine.strength(),
        effect: Effect::new(Action::Increasing, Target::Energy),
    }
}

/// Creating/Krystal then Heating/Flesh at PERFECT purity from tag `K1`
#[must_use]
pub fn refined_sample() -> RefinedSample {
    RefinedSample {
        tag_id: "K1".to_string(),
        strength: Purity::Perfect.strength(),
        primary: Effect::new(Action::Creating, Target::Krystal),
        secondary: Effect::new(Action::Heating, Target::Flesh),
    }
}

/// Enlisted record `24680` carrying two effects
#[must_use]
pub fn enlisted_record() -> Enlisted {
    Enlisted {
        id: 7,
        name: "Vega".to_string(),
        number: "24680".to_string(),
        effects: vec![
            EnlistedEffect {
                effect: Effect::new(Action::Increasing, Target::Energy),
                strength: 10,
            },
            EnlistedEffect {
                effect: Effect::new(Action::Destroying, Target::Krystal),
                strength: 4,
            },
        ],
    }
}
