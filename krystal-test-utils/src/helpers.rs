// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::thread;
use std::time::{Duration, Instant};

/// Poll `condition` until it holds or `timeout` elapses.
///
/// Device readers run on OS threads, so tests observing them wait on the wall clock.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    loop {
        if condition() {
            return true;
        }
        if start.elapsed() >= timeout {
            return false;
        }
        thread::sleep(Duration::from_millis(2));
    }
}

/// Default timeout for [`wait_until`] in tests
pub const SETTLE: Duration = Duration::from_secs(2);
