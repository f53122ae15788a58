//! Core data types for the TACO toolchain.
//!
//! This crate defines the per-project `taco.json` manifest, user
//! configuration and `TACO_HOME` resolution, and the telemetry property bag
//! returned by commands.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod config;
pub mod manifest;
pub mod telemetry;
