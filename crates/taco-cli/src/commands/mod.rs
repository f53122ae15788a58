//! Command dispatch and handler modules.

mod create;
mod kit;

use std::path::PathBuf;
use std::sync::Arc;

use miette::Result;
use taco_core::config::TacoConfig;
use taco_kits::cache::{KitCatalogCache, KitSource};
use taco_kits::registry::KitRegistry;

use crate::cli::{Cli, Command};

/// State shared by the command handlers of one invocation.
pub struct Context {
    pub config: TacoConfig,
    pub catalog: KitCatalogCache,
    kit_metadata: Option<PathBuf>,
}

impl Context {
    fn new(config: TacoConfig, kit_metadata: Option<PathBuf>) -> Self {
        Self {
            config,
            catalog: KitCatalogCache::new(),
            kit_metadata,
        }
    }

    /// The kit catalog: `--kit-metadata`, then `[kits] metadata`, then the
    /// bundled catalog.
    pub fn registry(&self) -> Result<Arc<KitRegistry>> {
        let path = self
            .kit_metadata
            .clone()
            .or_else(|| self.config.kits.metadata.clone());
        self.catalog.get_or_load(&KitSource::from_override(path))
    }
}

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let ctx = Context::new(TacoConfig::load()?, cli.kit_metadata);
    match cli.command {
        Command::Kit { action, list } => kit::exec(&ctx, action, list),
        Command::Create {
            path,
            id,
            name,
            kit,
            cordova,
            copy_from,
            cordova_bin,
        } => {
            let request = create::Request {
                path,
                id,
                name,
                kit,
                cordova,
                copy_from,
                cordova_bin,
            };
            create::exec(&ctx, request).await
        }
    }
}
