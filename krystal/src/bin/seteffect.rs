// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use clap::Parser;
use krystal::seteffect::{show, show_all, Args};
use krystal::{Config, Shutdown};
use krystal_modifier::compose;
use krystal_remote::UnrealClient;
use tokio::time::sleep;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;
    let table = config.modifier_table()?;
    let shutdown = Shutdown::install().context("failed to install signal handlers")?;

    let unreal = UnrealClient::new(config.unreal_url(), config.unreal_targets())
        .context("failed to create visualization client")?;
    anyhow::ensure!(
        unreal.start().await,
        "visualization at {} is not reachable",
        config.unreal_url()
    );

    let pushed = async {
        if args.test_all {
            let shown = show_all(&unreal, &table, args.pause()).await?;
            info!("Showed {} effects", shown);
        } else {
            show(&unreal, &compose(&table, args.effects())).await?;
            sleep(args.pause()).await;
        }
        anyhow::Ok(())
    };

    let outcome = tokio::select! {
        outcome = pushed => outcome,
        () = shutdown.wait() => {
            warn!("Interrupted");
            Ok(())
        }
    };

    unreal.stop().await;
    outcome
}
