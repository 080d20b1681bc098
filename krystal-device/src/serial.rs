// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Serial port backing for [`LineSource`].

use crate::source::{Connector, LineSource};
use krystal_error::{KrystalError, Result};
use serialport::SerialPort;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::time::Duration;

/// Opens serial ports with a fixed read timeout
#[derive(Debug, Clone)]
pub struct SerialConnector {
    read_timeout: Duration,
}

impl SerialConnector {
    #[must_use]
    pub const fn new(read_timeout: Duration) -> Self {
        Self { read_timeout }
    }
}

impl Connector for SerialConnector {
    fn open(&self, path: &Path, baud_rate: u32) -> Result<Box<dyn LineSource>> {
        let port = serialport::new(path.to_string_lossy(), baud_rate)
            .timeout(self.read_timeout)
            .open()
            .map_err(|e| KrystalError::device_open(path, e.to_string()))?;
        let writer = port
            .try_clone()
            .map_err(|e| KrystalError::device_open(path, e.to_string()))?;

        Ok(Box::new(SerialLine {
            reader: BufReader::new(port),
            writer,
            pending: Vec::new(),
        }))
    }
}

struct SerialLine {
    reader: BufReader<Box<dyn SerialPort>>,
    writer: Box<dyn SerialPort>,
    // Bytes of a line whose terminator has not arrived yet
    pending: Vec<u8>,
}

impl LineSource for SerialLine {
    fn read_line(&mut self) -> Result<Option<String>> {
        next_line(&mut self.reader, &mut self.pending)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Read up to the next `\n`, keeping a partial line in `pending` across timeouts.
///
/// `read_until` only returns `Ok` at a terminator or at end of stream, so any
/// `Ok` without a terminator means the port is gone, with or without a partial
/// line buffered.
fn next_line<R: BufRead>(reader: &mut R, pending: &mut Vec<u8>) -> Result<Option<String>> {
    match reader.read_until(b'\n', pending) {
        Ok(_) if pending.last() == Some(&b'\n') => {
            let line = String::from_utf8_lossy(pending).trim_end().to_string();
            pending.clear();
            Ok(Some(line))
        }
        Ok(_) => Err(KrystalError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "serial port closed",
        ))),
        Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
        Err(e) => Err(e.into()),
    }
}
