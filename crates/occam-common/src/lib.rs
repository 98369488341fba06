//! # occam-common
//!
//! Shared error definitions, configuration model, constants, and the
//! build log buffer used across the occam workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod log;
