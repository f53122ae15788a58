//! Operations behind the `taco` commands.
//!
//! Each operation validates its input, performs the work, and returns an
//! outcome value (including telemetry properties) for the CLI to render.

pub mod ops_create;
pub mod ops_kit;
