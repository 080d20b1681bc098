// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use krystal_decode::NumericDecoder;
use tokio::time::{advance, pause, Instant};

#[tokio::test]
async fn test_accepted_digits_update_last_input() -> anyhow::Result<()> {
    // Arrange
    pause();
    let decoder = NumericDecoder::new();
    decoder.push_line("1");
    let first = decoder
        .last_input()
        .ok_or_else(|| anyhow::anyhow!("no input recorded"))?;

    // Act
    advance(std::time::Duration::from_secs(3)).await;
    decoder.push_line("12");
    let after_rejected = decoder.last_input();
    decoder.push_line("2");

    // Assert
    assert_eq!(after_rejected, Some(first));
    assert_eq!(decoder.last_input(), Some(Instant::now()));
    assert_eq!(decoder.digits(), vec![1, 2]);

    Ok(())
}

#[test]
fn test_buffer_is_unbounded_until_cleared() -> anyhow::Result<()> {
    // Arrange
    let decoder = NumericDecoder::new();

    // Act
    for digit in 0..12 {
        decoder.push_line(&(digit % 10).to_string());
    }
    let collected = decoder.digits().len();
    decoder.clear();

    // Assert
    assert_eq!(collected, 12);
    assert!(decoder.digits().is_empty());

    Ok(())
}
