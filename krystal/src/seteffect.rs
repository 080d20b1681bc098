// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operator tool for trying out effects on the engine without any devices.
//!
//! Either one composition given on the command line is shown, or every table
//! cell with modifiers is shown in turn at full strength.

use crate::config::DEFAULT_PATH;
use clap::Parser;
use krystal_core::{Action, Effect, SystemParameters, Target};
use krystal_modifier::{compose, ModifierTable};
use krystal_session::Visualization;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Strength every cell is shown at by [`show_all`]
pub const FULL_STRENGTH: i32 = 12;

/// Push an effect composition to the visualization engine
#[derive(Debug, Clone, Parser)]
#[command(name = "seteffect")]
pub struct Args {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_PATH)]
    pub config: PathBuf,

    #[arg(long, requires = "blood_target")]
    pub blood_action: Option<Action>,

    #[arg(long, requires = "blood_action")]
    pub blood_target: Option<Target>,

    #[arg(long, default_value_t = FULL_STRENGTH, value_parser = clap::value_parser!(i32).range(2..=12))]
    pub blood_strength: i32,

    #[arg(long, required_unless_present = "test_all", requires = "primary_target")]
    pub primary_action: Option<Action>,

    #[arg(long, required_unless_present = "test_all", requires = "primary_action")]
    pub primary_target: Option<Target>,

    #[arg(long, requires = "secondary_target")]
    pub secondary_action: Option<Action>,

    #[arg(long, requires = "secondary_action")]
    pub secondary_target: Option<Target>,

    /// Strength of the primary and secondary effects
    #[arg(long, default_value_t = FULL_STRENGTH, value_parser = clap::value_parser!(i32).range(2..=12))]
    pub purity: i32,

    /// Show every table cell with modifiers in turn
    #[arg(long, conflicts_with_all = ["blood_action", "primary_action", "secondary_action"])]
    pub test_all: bool,

    /// Seconds a composition stays on screen
    #[arg(long, default_value_t = 5)]
    pub pause_secs: u64,
}

impl Args {
    /// The given effects in composition order: blood, primary, secondary
    #[must_use]
    pub fn effects(&self) -> Vec<(Effect, i32)> {
        let effect = |action: Option<Action>, target: Option<Target>, strength: i32| {
            action
                .zip(target)
                .map(|(action, target)| (Effect::new(action, target), strength))
        };

        [
            effect(self.blood_action, self.blood_target, self.blood_strength),
            effect(self.primary_action, self.primary_target, self.purity),
            effect(self.secondary_action, self.secondary_target, self.purity),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    #[must_use]
    pub const fn pause(&self) -> Duration {
        Duration::from_secs(self.pause_secs)
    }
}

/// Every pair of `table` that has modifiers, actions first, in vocabulary order
#[must_use]
pub fn table_cells(table: &ModifierTable) -> Vec<Effect> {
    Action::ALL
        .iter()
        .flat_map(|&action| Target::ALL.iter().map(move |&target| Effect::new(action, target)))
        .filter(|&effect| table.lookup(effect).is_some())
        .collect()
}

/// Push `parameters`, restart the particle system and show it.
///
/// # Errors
/// Fails on the first command the engine rejects.
pub async fn show<V>(visualization: &V, parameters: &SystemParameters) -> anyhow::Result<()>
where
    V: Visualization + ?Sized,
{
    visualization.update_parameters(parameters).await?;
    visualization.reinitialize().await?;
    visualization.set_active(true).await?;
    Ok(())
}

/// Show each of [`table_cells`] at [`FULL_STRENGTH`], hiding the previous one
/// for `pause` first. Returns the number of cells shown.
///
/// # Errors
/// Fails on the first command the engine rejects.
pub async fn show_all<V>(
    visualization: &V,
    table: &ModifierTable,
    pause: Duration,
) -> anyhow::Result<usize>
where
    V: Visualization + ?Sized,
{
    let cells = table_cells(table);

    for (index, &effect) in cells.iter().enumerate() {
        visualization.set_active(false).await?;
        sleep(pause).await;

        info!(
            "Showing {}/{} ({} of {})",
            effect.action,
            effect.target,
            index + 1,
            cells.len()
        );
        show(visualization, &compose(table, [(effect, FULL_STRENGTH)])).await?;
    }

    Ok(cells.len())
}
