//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set. Otherwise the level comes from the `-v` count:
//! none is `warn`, then `info`, `debug`, and `trace`.

use miette::Result;
use taco_util::errors::TacoError;
use tracing_subscriber::EnvFilter;

pub fn init(verbose: u8) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| TacoError::Generic {
            message: format!("Failed to initialize logging: {e}"),
        })?;
    Ok(())
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
