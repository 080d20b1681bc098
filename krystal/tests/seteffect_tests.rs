// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::Parser;
use krystal::seteffect::{show, show_all, table_cells, Args, FULL_STRENGTH};
use krystal_core::{Action, Effect, Target};
use krystal_modifier::{compose, ModifierTable};
use krystal_test_utils::{RecordingVisualization, VisualizationCall};
use std::time::Duration;

const TWO_CELLS: &str = r#"
[[modifier]]
action = "Cooling"
target = "Gas"
parameter = "base_movement_speed"
operation = "mul"
value = 0.5

[[modifier]]
action = "Increasing"
target = "Energy"
parameter = "base_movement_speed"
operation = "mul"
value = 2.0
"#;

#[test]
fn test_effects_are_composed_blood_first() -> anyhow::Result<()> {
    // Act
    let args = Args::try_parse_from([
        "seteffect",
        "--secondary-action",
        "heating",
        "--secondary-target",
        "liquid",
        "--primary-action",
        "Increasing",
        "--primary-target",
        "Energy",
        "--blood-action",
        "cooling",
        "--blood-target",
        "gas",
        "--blood-strength",
        "4",
        "--purity",
        "8",
    ])?;

    // Assert
    assert_eq!(
        args.effects(),
        vec![
            (Effect::new(Action::Cooling, Target::Gas), 4),
            (Effect::new(Action::Increasing, Target::Energy), 8),
            (Effect::new(Action::Heating, Target::Liquid), 8),
        ]
    );
    assert_eq!(args.pause(), Duration::from_secs(5));

    Ok(())
}

#[test]
fn test_primary_effect_alone_uses_full_strength() -> anyhow::Result<()> {
    // Act
    let args = Args::try_parse_from([
        "seteffect",
        "--primary-action",
        "solidifying",
        "--primary-target",
        "plant",
    ])?;

    // Assert
    assert_eq!(
        args.effects(),
        vec![(Effect::new(Action::Solidifying, Target::Plant), FULL_STRENGTH)]
    );
    assert!(!args.test_all);

    Ok(())
}

#[test]
fn test_invalid_command_lines_are_rejected() {
    // Assert
    assert!(Args::try_parse_from(["seteffect"]).is_err());
    assert!(Args::try_parse_from(["seteffect", "--primary-action", "cooling"]).is_err());
    assert!(Args::try_parse_from([
        "seteffect",
        "--primary-action",
        "melting",
        "--primary-target",
        "gas",
    ])
    .is_err());
    assert!(Args::try_parse_from([
        "seteffect",
        "--primary-action",
        "cooling",
        "--primary-target",
        "gas",
        "--purity",
        "13",
    ])
    .is_err());
    assert!(Args::try_parse_from([
        "seteffect",
        "--test-all",
        "--primary-action",
        "cooling",
        "--primary-target",
        "gas",
    ])
    .is_err());
}

#[test]
fn test_test_all_needs_no_effects() -> anyhow::Result<()> {
    // Act
    let args = Args::try_parse_from(["seteffect", "--test-all", "--pause-secs", "1"])?;

    // Assert
    assert!(args.test_all);
    assert!(args.effects().is_empty());
    assert_eq!(args.pause(), Duration::from_secs(1));

    Ok(())
}

#[test]
fn test_table_cells_skip_empty_pairs() -> anyhow::Result<()> {
    // Arrange
    let builtin = ModifierTable::builtin();
    let custom = ModifierTable::from_toml_str(TWO_CELLS)?;

    // Act
    let builtin_cells = table_cells(&builtin);
    let custom_cells = table_cells(&custom);

    // Assert
    assert_eq!(builtin_cells.len(), builtin.len());
    assert!(builtin_cells.iter().all(|&cell| builtin.lookup(cell).is_some()));
    assert_eq!(
        custom_cells,
        vec![
            Effect::new(Action::Increasing, Target::Energy),
            Effect::new(Action::Cooling, Target::Gas),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_show_pushes_then_activates() -> anyhow::Result<()> {
    // Arrange
    let visualization = RecordingVisualization::new();
    let table = ModifierTable::builtin();
    let parameters = compose(&table, [(Effect::new(Action::Increasing, Target::Energy), 12)]);

    // Act
    show(&*visualization, &parameters).await?;

    // Assert
    assert_eq!(
        visualization.calls(),
        vec![
            VisualizationCall::UpdateParameters(Box::new(parameters)),
            VisualizationCall::Reinitialize,
            VisualizationCall::SetActive(true),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_show_all_hides_between_cells() -> anyhow::Result<()> {
    // Arrange
    tokio::time::pause();
    let visualization = RecordingVisualization::new();
    let table = ModifierTable::from_toml_str(TWO_CELLS)?;
    let started = tokio::time::Instant::now();

    // Act
    let shown = show_all(&*visualization, &table, Duration::from_secs(5)).await?;

    // Assert
    assert_eq!(shown, 2);
    assert!(started.elapsed() >= Duration::from_secs(10));
    let expected: Vec<_> = table_cells(&table)
        .into_iter()
        .flat_map(|cell| {
            [
                VisualizationCall::SetActive(false),
                VisualizationCall::UpdateParameters(Box::new(compose(
                    &table,
                    [(cell, FULL_STRENGTH)],
                ))),
                VisualizationCall::Reinitialize,
                VisualizationCall::SetActive(true),
            ]
        })
        .collect();
    assert_eq!(visualization.calls(), expected);

    Ok(())
}

#[tokio::test]
async fn test_show_all_stops_on_engine_failure() -> anyhow::Result<()> {
    // Arrange
    tokio::time::pause();
    let visualization = RecordingVisualization::new();
    visualization.fail(true);
    let table = ModifierTable::from_toml_str(TWO_CELLS)?;

    // Act
    let result = show_all(&*visualization, &table, Duration::from_secs(5)).await;

    // Assert
    assert!(result.is_err());
    assert_eq!(visualization.calls(), vec![VisualizationCall::SetActive(false)]);

    Ok(())
}
