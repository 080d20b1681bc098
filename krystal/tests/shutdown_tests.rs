// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(unix)]

use krystal::Shutdown;
use std::process::Command;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_sigterm_completes_shutdown() -> anyhow::Result<()> {
    // Arrange
    let shutdown = Shutdown::install()?;
    let wait = shutdown.wait();
    tokio::pin!(wait);
    assert!(
        timeout(Duration::from_millis(50), &mut wait).await.is_err(),
        "shutdown completed without a signal"
    );

    // Act
    let status = Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()?;

    // Assert
    assert!(status.success());
    timeout(Duration::from_secs(5), wait).await?;

    Ok(())
}
