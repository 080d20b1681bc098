// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! The exhibit's interaction session.
//!
//! A [`Session`] is ticked at a fixed rate by the controller loop. Each tick it polls
//! the numeric and RFID decoders, advances its [`SessionState`], and drives the
//! [`Visualization`]. Enlisted codes are resolved through an [`EnlistedLookup`].
//!
//! Collaborator failures never stop the session: they are logged and the next push
//! resynchronizes the visualization.

mod collaborators;
mod session;
mod state;

pub use self::collaborators::{EnlistedLookup, Visualization};
pub use self::session::{Session, SessionConfig, ENTER_CODE, INVALID_INPUT, RESET_CODE, SAMPLE_CODE};
pub use self::state::SessionState;
