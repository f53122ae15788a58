use std::path::PathBuf;

use miette::Result;
use taco_core::manifest::{self, ProjectManifest};
use taco_kits::metadata::Kit;
use taco_kits::registry::KitRegistry;
use taco_ops::ops_kit::{self, KitCommandOptions};
use taco_util::errors::TacoError;
use taco_util::progress;

use super::Context;
use crate::cli::{KitAction, KitListArgs};

pub fn exec(ctx: &Context, action: Option<KitAction>, list: KitListArgs) -> Result<()> {
    match action {
        None => cmd_list(ctx, list),
        Some(KitAction::List(args)) => cmd_list(ctx, args),
        Some(KitAction::Select {
            kit,
            cordova,
            project,
        }) => cmd_select(ctx, kit, cordova, project),
    }
}

fn cmd_list(ctx: &Context, args: KitListArgs) -> Result<()> {
    let registry = ctx.registry()?;
    let options = KitCommandOptions {
        kit: args.kit,
        cordova: None,
        json: args.json,
    };
    let outcome = ops_kit::list(&options, &registry)?;

    let default_id = outcome.listing.default_kit.as_deref();
    let project = current_project_manifest();
    let selected_kit = project.as_ref().and_then(ProjectManifest::kit_id);
    let pinned_by_project = kits_matching_project_cli(project.as_ref(), &registry);
    for kit in &outcome.listing.kits {
        let mut markers = Vec::new();
        if default_id == Some(kit.id.as_str()) {
            markers.push("default");
        }
        if kit.deprecated {
            markers.push("deprecated");
        }
        if selected_kit == Some(kit.id.as_str()) {
            markers.push("selected");
        }
        if pinned_by_project.contains(&kit.id.as_str()) {
            markers.push("matches project Cordova CLI");
        }
        println!("{}", describe(kit, &markers));
        if options.kit.is_some() {
            print_details(kit);
        }
    }
    if let Some(path) = &outcome.json_path {
        progress::status("Wrote", &format!("kit listing to {}", path.display()));
    }
    Ok(())
}

fn cmd_select(
    ctx: &Context,
    kit: Option<String>,
    cordova: Option<String>,
    project: Option<PathBuf>,
) -> Result<()> {
    let project_dir = match project {
        Some(dir) => dir,
        None => {
            let cwd = std::env::current_dir().map_err(TacoError::Io)?;
            manifest::find_project_root(&cwd).unwrap_or(cwd)
        }
    };

    let registry = ctx.registry()?;
    let options = KitCommandOptions {
        kit,
        cordova,
        json: None,
    };
    let outcome = ops_kit::select(&project_dir, &options, &registry)?;

    if !outcome.changed() {
        progress::status_info("Unchanged", &format!("project already uses {}", outcome.manifest));
        return Ok(());
    }
    match &outcome.kit {
        Some(kit) => {
            progress::status(
                "Selected",
                &format!("kit {} (Cordova CLI {})", kit.id, outcome.cordova_cli),
            );
            if kit.deprecated {
                progress::status_warn("Deprecated", &deprecation_note(kit));
            }
        }
        None => progress::status("Selected", &format!("Cordova CLI {}", outcome.cordova_cli)),
    }
    Ok(())
}

/// The manifest of the project containing the working directory, if any.
fn current_project_manifest() -> Option<ProjectManifest> {
    let cwd = std::env::current_dir().ok()?;
    let root = manifest::find_project_root(&cwd)?;
    match manifest::read(&root) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            tracing::debug!("Ignoring manifest in {}: {e}", root.display());
            None
        }
    }
}

/// Ids of kits pinning the Cordova CLI version a CLI-mode project uses.
fn kits_matching_project_cli<'a>(
    project: Option<&ProjectManifest>,
    registry: &'a KitRegistry,
) -> Vec<&'a str> {
    let Some(version) = project
        .and_then(ProjectManifest::cordova_cli)
        .and_then(|v| registry.resolve_cordova_version(v).ok())
    else {
        return Vec::new();
    };
    registry
        .kits_for_cordova(&version)
        .map(|k| k.id.as_str())
        .collect()
}

fn describe(kit: &Kit, markers: &[&str]) -> String {
    let mut line = format!("{:<12} Cordova CLI {}", kit.id, kit.cordova_cli);
    for marker in markers {
        line.push_str(&format!(" ({marker})"));
    }
    line
}

fn print_details(kit: &Kit) {
    if !kit.platforms.is_empty() {
        println!("  platforms:");
        for (name, version) in &kit.platforms {
            println!("    {name} {version}");
        }
    }
    if !kit.plugins.is_empty() {
        println!("  plugins:");
        for (name, version) in &kit.plugins {
            println!("    {name} {version}");
        }
    }
    if let Some(uri) = &kit.release_notes_uri {
        println!("  release notes: {uri}");
    }
}

fn deprecation_note(kit: &Kit) -> String {
    match &kit.deprecated_reason_uri {
        Some(uri) => format!("{} is deprecated, see {uri}", kit.id),
        None => format!("{} is deprecated", kit.id),
    }
}
