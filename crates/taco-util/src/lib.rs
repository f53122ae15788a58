//! Shared utilities for the TACO toolchain.
//!
//! This crate provides cross-cutting concerns used by all other TACO crates:
//! the unified error type, filesystem helpers (including path validity
//! probing and async copies), app-name validation, process spawning, and
//! terminal status output.

pub mod errors;
pub mod fs;
pub mod process;
pub mod progress;
pub mod strings;
