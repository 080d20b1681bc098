// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use krystal_error::{KrystalError, Result, ResultExt};
use std::io;

#[test]
fn test_error_display() {
    let err = KrystalError::unknown_purity("SHINY");
    assert_eq!(err.to_string(), "Unknown purity word: SHINY");

    let err = KrystalError::decode("tag found: T1", "expected at least 6 tokens");
    assert_eq!(
        err.to_string(),
        "Failed to decode line 'tag found: T1': expected at least 6 tokens"
    );

    let err = KrystalError::unknown_word("action", "Juggling");
    assert_eq!(err.to_string(), "Unknown action: Juggling");
}

#[test]
fn test_error_constructors() {
    let err = KrystalError::device_open("/dev/ttyACM0", "busy");
    assert!(matches!(err, KrystalError::DeviceOpen { .. }));
    assert!(err.to_string().contains("/dev/ttyACM0"));

    let err = KrystalError::remote("Reset", "500 Internal Server Error");
    assert!(matches!(err, KrystalError::Remote { .. }));

    let err = KrystalError::not_connected("unreal");
    assert_eq!(err.to_string(), "Not connected to unreal");
}

#[test]
fn test_is_decode_failure() {
    assert!(KrystalError::unknown_purity("x").is_decode_failure());
    assert!(KrystalError::decode("x", "y").is_decode_failure());
    assert!(KrystalError::unknown_word("target", "x").is_decode_failure());
    assert!(!KrystalError::config("x").is_decode_failure());
}

#[test]
fn test_is_connection_lost() {
    let err: KrystalError = io::Error::new(io::ErrorKind::BrokenPipe, "unplugged").into();
    assert!(err.is_connection_lost());
    assert!(KrystalError::device_open("/dev/ttyUSB0", "gone").is_connection_lost());
    assert!(!KrystalError::remote("Reset", "timeout").is_connection_lost());
}

#[test]
fn test_result_context() {
    let result: std::result::Result<(), io::Error> = Err(io::Error::other("missing key"));

    let err = result.context("reading krystal.toml").unwrap_err();
    assert!(matches!(err, KrystalError::Config { .. }));
    assert!(err.to_string().contains("reading krystal.toml"));
    assert!(err.to_string().contains("missing key"));
}

#[test]
fn test_result_with_context_ok() {
    let result: std::result::Result<i32, io::Error> = Ok(42);
    let value: Result<i32> = result.with_context(|| "unused".to_string());
    assert_eq!(value.unwrap(), 42);
}
