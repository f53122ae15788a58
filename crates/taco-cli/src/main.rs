//! TACO CLI binary.
//!
//! Entry point for the `taco` command-line tool. Parses arguments with
//! `clap`, initializes `tracing`, and dispatches to the command handlers.

mod cli;
mod commands;
mod logging;

use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse();
    logging::init(args.verbose)?;
    commands::dispatch(args).await
}
