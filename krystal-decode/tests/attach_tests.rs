// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use krystal_decode::{NumericDecoder, RfidDecoder};
use krystal_device::{DeviceManager, DeviceManagerConfig};
use krystal_test_utils::{wait_until, FakeConnector, FakeDiscovery, SETTLE};
use std::sync::Arc;
use std::time::Duration;

fn identified_manager(names: &[(&str, &str)]) -> (DeviceManager, FakeConnector) {
    let connector = FakeConnector::new();
    let discovery = FakeDiscovery::new();
    for (path, name) in names {
        connector.add_port(*path).answering_name(name);
        discovery.insert(*path);
    }

    let config = DeviceManagerConfig {
        identify_interval: Duration::from_millis(10),
        ..DeviceManagerConfig::default()
    };
    let mut manager = DeviceManager::new(
        config,
        Arc::new(connector.clone()),
        Box::new(discovery),
    );
    manager.scan();
    wait_until(SETTLE, || {
        manager.dispatch_events();
        names
            .iter()
            .all(|(_, name)| !manager.devices_by_name(name).is_empty())
    });

    (manager, connector)
}

#[test]
fn test_attached_decoder_receives_device_lines() -> anyhow::Result<()> {
    // Arrange
    let (manager, connector) = identified_manager(&[("/dev/ttyACM0", "number")]);
    let decoder = NumericDecoder::new();
    let device = manager.devices_by_name("number").remove(0);
    let port = connector
        .port("/dev/ttyACM0")
        .ok_or_else(|| anyhow::anyhow!("missing port"))?;

    // Act
    decoder.attach(&device);
    for line in ["3", "x", "7"] {
        port.push_line(line);
    }
    let received = wait_until(SETTLE, || decoder.digits().len() == 2);

    // Assert
    assert!(received);
    assert_eq!(decoder.digits(), vec![3, 7]);
    assert!(decoder
        .device()
        .is_some_and(|attached| Arc::ptr_eq(&attached, &device)));

    Ok(())
}

#[test]
fn test_attaching_elsewhere_detaches_previous_device() -> anyhow::Result<()> {
    // Arrange
    let (manager, connector) =
        identified_manager(&[("/dev/ttyACM0", "rfid"), ("/dev/ttyACM1", "rfid")]);
    let decoder = RfidDecoder::new();
    let devices = manager.devices_by_name("rfid");
    assert_eq!(devices.len(), 2);
    let old_port = connector
        .port(devices[0].path())
        .ok_or_else(|| anyhow::anyhow!("missing port"))?;

    // Act
    decoder.attach(&devices[0]);
    decoder.attach(&devices[1]);
    old_port.push_line("tag found: B1 blood Increasing Energy x x PRISTINE");
    let drained = wait_until(SETTLE, || old_port.pending() == 0);

    // Assert
    assert!(drained);
    assert!(!devices[0].has_consumer());
    assert!(devices[1].has_consumer());
    assert!(decoder.blood().is_none());

    Ok(())
}
