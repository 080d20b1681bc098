// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! RFID reader lines.
//!
//! The reader reports tags with lines of the form
//!
//! ```text
//! tag found: <id> <kind> <field>...
//! traits: <id> <kind> <field>...
//! tag lost: <id>
//! ```
//!
//! where `<kind>` is `raw`, `refined` or `blood`. Sample kinds carry five fields: two
//! action/target pairs followed by the purity word. Blood samples use only the first
//! pair; the second pair is reserved.

use crate::attachment::Attachment;
use krystal_core::{Action, BloodSample, Effect, Purity, RefinedSample, Target};
use krystal_device::{Device, LineConsumer};
use krystal_error::{KrystalError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

const FOUND_PREFIXES: [&str; 2] = ["tag found:", "traits:"];
const LOST_PREFIX: &str = "tag lost:";
const SAMPLE_FIELDS: usize = 5;

/// What a found tag carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSample {
    Blood(BloodSample),
    Refined(RefinedSample),
    /// Unprogrammed tag
    Raw,
}

/// A decoded reader line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RfidLine {
    Found { tag_id: String, sample: TagSample },
    Lost { tag_id: String },
}

/// Decode one reader line.
///
/// Returns `Ok(None)` for lines that are not tag reports.
///
/// # Errors
/// Returns a decode failure if a tag report is truncated or names an unknown kind,
/// action, target or purity.
pub fn parse_line(line: &str) -> Result<Option<RfidLine>> {
    let line = line.trim();
    if let Some(rest) = strip_prefix(line, LOST_PREFIX) {
        let tag_id = rest
            .split_whitespace()
            .next()
            .ok_or_else(|| KrystalError::decode(line, "missing tag id"))?;
        return Ok(Some(RfidLine::Lost {
            tag_id: tag_id.to_string(),
        }));
    }

    let Some(rest) = FOUND_PREFIXES
        .iter()
        .find_map(|prefix| strip_prefix(line, prefix))
    else {
        return Ok(None);
    };

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let (tag_id, kind, fields) = match tokens.as_slice() {
        [tag_id, kind, fields @ ..] => (*tag_id, *kind, fields),
        _ => return Err(KrystalError::decode(line, "missing tag id or kind")),
    };

    let sample = if kind.eq_ignore_ascii_case("raw") {
        TagSample::Raw
    } else if kind.eq_ignore_ascii_case("blood") {
        let fields = sample_fields(line, fields)?;
        TagSample::Blood(BloodSample {
            tag_id: tag_id.to_string(),
            strength: fields[4].parse::<Purity>()?.strength(),
            effect: effect(fields[0], fields[1])?,
        })
    } else if kind.eq_ignore_ascii_case("refined") {
        let fields = sample_fields(line, fields)?;
        TagSample::Refined(RefinedSample {
            tag_id: tag_id.to_string(),
            strength: fields[4].parse::<Purity>()?.strength(),
            primary: effect(fields[0], fields[1])?,
            secondary: effect(fields[2], fields[3])?,
        })
    } else {
        return Err(KrystalError::decode(line, format!("unknown tag kind '{kind}'")));
    };

    Ok(Some(RfidLine::Found {
        tag_id: tag_id.to_string(),
        sample,
    }))
}

fn strip_prefix<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &line[prefix.len()..])
}

fn sample_fields<'a, 'b>(line: &str, fields: &'b [&'a str]) -> Result<&'b [&'a str]> {
    if fields.len() < SAMPLE_FIELDS {
        return Err(KrystalError::decode(
            line,
            format!("expected {SAMPLE_FIELDS} fields, got {}", fields.len()),
        ));
    }
    Ok(fields)
}

fn effect(action: &str, target: &str) -> Result<Effect> {
    Ok(Effect::new(action.parse::<Action>()?, target.parse::<Target>()?))
}

#[derive(Debug, Default)]
struct RfidState {
    blood: Option<BloodSample>,
    refined: Option<RefinedSample>,
    tag_id: Option<String>,
}

/// Tracks the samples whose tags are currently on the reader.
///
/// A found tag replaces the slot of its kind. A lost tag clears the current tag id,
/// but clears a sample slot only when the lost id is the one that produced it, so
/// swapping one tag for another never drops the sample that is still present.
#[derive(Default)]
pub struct RfidDecoder {
    state: Mutex<RfidState>,
    attachment: Attachment,
}

impl RfidDecoder {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register as the consumer of `device`, detaching from the previous one.
    pub fn attach(self: &Arc<Self>, device: &Arc<Device>) {
        self.attachment.attach(device, self.clone());
    }

    #[must_use]
    pub fn device(&self) -> Option<Arc<Device>> {
        self.attachment.device()
    }

    #[must_use]
    pub fn blood(&self) -> Option<BloodSample> {
        self.state.lock().blood.clone()
    }

    #[must_use]
    pub fn refined(&self) -> Option<RefinedSample> {
        self.state.lock().refined.clone()
    }

    /// Id of the last tag seen, cleared when any tag is lost
    #[must_use]
    pub fn tag_id(&self) -> Option<String> {
        self.state.lock().tag_id.clone()
    }

    /// Accept one line as if it came from the device.
    pub fn push_line(&self, line: &str) {
        match parse_line(line) {
            Ok(Some(decoded)) => self.apply(decoded),
            Ok(None) => debug!("Ignoring reader line '{}'", line),
            Err(e) => warn!("Discarding reader line: {}", e),
        }
    }

    fn apply(&self, line: RfidLine) {
        let mut state = self.state.lock();

        match line {
            RfidLine::Found { tag_id, sample } => {
                match sample {
                    TagSample::Blood(blood) => {
                        info!("Blood sample {} found", tag_id);
                        state.blood = Some(blood);
                    }
                    TagSample::Refined(refined) => {
                        info!("Refined sample {} found", tag_id);
                        state.refined = Some(refined);
                    }
                    TagSample::Raw => info!("Raw tag {} is not supported", tag_id),
                }
                state.tag_id = Some(tag_id);
            }
            RfidLine::Lost { tag_id } => {
                state.tag_id = None;
                if state.blood.as_ref().is_some_and(|s| s.tag_id == tag_id) {
                    info!("Blood sample {} removed", tag_id);
                    state.blood = None;
                }
                if state.refined.as_ref().is_some_and(|s| s.tag_id == tag_id) {
                    info!("Refined sample {} removed", tag_id);
                    state.refined = None;
                }
            }
        }
    }
}

impl LineConsumer for RfidDecoder {
    fn on_line(&self, line: &str) {
        self.push_line(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_case_insensitive() {
        let found = parse_line("TAG FOUND: 04a1 raw").unwrap();
        let traits = parse_line("Traits: 04a1 raw").unwrap();

        assert_eq!(found, traits);
        assert!(matches!(
            found,
            Some(RfidLine::Found {
                sample: TagSample::Raw,
                ..
            })
        ));
    }

    #[test]
    fn unrelated_lines_are_not_tag_reports() {
        assert_eq!(parse_line("reader ready").unwrap(), None);
        assert_eq!(parse_line("").unwrap(), None);
    }

    #[test]
    fn lost_without_id_is_a_decode_failure() {
        let err = parse_line("tag lost:").unwrap_err();
        assert!(err.is_decode_failure());
    }

    #[test]
    fn unknown_kind_is_a_decode_failure() {
        let err = parse_line("tag found: T1 mineral Increasing Energy x x PRISTINE").unwrap_err();
        assert!(err.is_decode_failure());
    }
}
