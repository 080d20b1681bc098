// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! HTTP clients for the services around the exhibit.
//!
//! - [`ApiClient`] resolves enlisted codes against the lookup API, which serves
//!   JSON:API documents.
//! - [`UnrealClient`] drives the visualization engine through its remote control API.
//!
//! Both implement the session's collaborator traits.

pub mod api;
pub mod jsonapi;
pub mod unreal;

pub use self::api::ApiClient;
pub use self::unreal::{parameter_calls, ObjectCall, UnrealClient, UnrealTargets};
