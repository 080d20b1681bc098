// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use krystal::config::DEFAULT_PATH;
use krystal::{Config, Controller, DeviceNames, Shutdown};
use krystal_decode::{NumericDecoder, RfidDecoder};
use krystal_device::{DeviceManager, GlobDiscovery, SerialConnector};
use krystal_remote::{ApiClient, UnrealClient};
use krystal_session::Session;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_PATH), PathBuf::from);
    let config = Config::load(&path)?;
    let table = config.modifier_table()?;
    let shutdown = Shutdown::install().context("failed to install signal handlers")?;

    let api = Arc::new(ApiClient::new(config.api_url()).context("failed to create API client")?);
    let unreal = Arc::new(
        UnrealClient::new(config.unreal_url(), config.unreal_targets())
            .context("failed to create visualization client")?,
    );
    if !unreal.start().await {
        warn!("Running without visualization");
    }

    let manager = DeviceManager::new(
        config.device_manager(),
        Arc::new(SerialConnector::new(config.read_timeout())),
        Box::new(GlobDiscovery::new(config.serial.device_root.clone())),
    );
    let rfid = RfidDecoder::new();
    let numbers = NumericDecoder::new();
    let session = Session::new(
        config.session(),
        table,
        numbers.clone(),
        rfid.clone(),
        unreal.clone(),
        api,
    );

    let mut controller = Controller::new(
        manager,
        session,
        rfid,
        numbers,
        DeviceNames {
            rfid: config.controller.rfid_device.clone(),
            number: config.controller.number_device.clone(),
        },
        config.scan_interval(),
    );

    info!("Controller running at {} Hz", config.controller.tick_hz);
    controller
        .run(config.tick_interval(), shutdown.wait())
        .await;

    drop(controller);
    unreal.stop().await;
    info!("Stopped");
    Ok(())
}
