use std::path::PathBuf;

use miette::Result;
use taco_ops::ops_create::{self, CreateRequest};
use taco_util::progress;

use super::Context;

/// Arguments of `taco create`, before config defaults are applied.
pub struct Request {
    pub path: PathBuf,
    pub id: Option<String>,
    pub name: Option<String>,
    pub kit: Option<String>,
    pub cordova: Option<String>,
    pub copy_from: Option<PathBuf>,
    pub cordova_bin: Option<String>,
}

pub async fn exec(ctx: &Context, request: Request) -> Result<()> {
    let registry = ctx.registry()?;
    let create_request = CreateRequest {
        path: ops_create::absolute_project_path(&request.path)?,
        id: request.id,
        name: request.name,
        kit: request.kit,
        cordova: request.cordova,
        copy_from: request.copy_from,
        cordova_bin: request
            .cordova_bin
            .unwrap_or_else(|| ctx.config.cordova.bin.clone()),
    };

    let outcome = ops_create::create(&create_request, &registry).await?;

    progress::status(
        "Created",
        &format!("{} at {}", outcome.app_name, outcome.project_dir.display()),
    );
    match &outcome.kit {
        Some(kit) => progress::status_info(
            "Using",
            &format!("kit {} (Cordova CLI {})", kit.id, outcome.cordova_cli),
        ),
        None => progress::status_info("Using", &format!("Cordova CLI {}", outcome.cordova_cli)),
    }
    Ok(())
}
