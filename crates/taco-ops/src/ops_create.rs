//! Operation: scaffold a new Cordova project and record its kit selection.

use std::path::{Path, PathBuf};

use taco_core::manifest::{self, ProjectManifest};
use taco_core::telemetry::TelemetryProperties;
use taco_kits::metadata::Kit;
use taco_kits::registry::KitRegistry;
use taco_kits::version::CordovaVersion;
use taco_util::errors::{TacoError, TacoResult};
use taco_util::fs::{copy_recursive, is_missing_or_empty_dir, is_path_valid};
use taco_util::process::CommandBuilder;
use taco_util::progress;
use taco_util::strings::validate_app_name;

/// Application id Cordova uses when none is given.
const DEFAULT_APP_ID: &str = "io.cordova.hellocordova";

/// Input for [`create`].
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub path: PathBuf,
    pub id: Option<String>,
    pub name: Option<String>,
    pub kit: Option<String>,
    pub cordova: Option<String>,
    /// Directory whose contents become the project's `www/`.
    pub copy_from: Option<PathBuf>,
    /// Cordova executable to run.
    pub cordova_bin: String,
}

impl CreateRequest {
    /// Telemetry for `create`. The template directory is PII.
    pub fn telemetry(&self) -> TelemetryProperties {
        let mut props = TelemetryProperties::for_sub_command("create");
        props.set_option("kit", self.kit.as_deref(), false);
        props.set_option("cordova", self.cordova.as_deref(), false);
        let copy_from = self.copy_from.as_ref().map(|p| p.to_string_lossy());
        props.set_option("copyFrom", copy_from.as_deref(), true);
        props
    }

    /// The app name: explicit, or the final segment of the project path.
    pub fn app_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        })
    }
}

/// Result of a successful [`create`].
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub project_dir: PathBuf,
    pub app_name: String,
    pub manifest: ProjectManifest,
    pub kit: Option<Kit>,
    pub cordova_cli: CordovaVersion,
    pub telemetry: TelemetryProperties,
}

/// Create a Cordova project at `request.path` and write its `taco.json`.
///
/// Everything that can be checked up front (path, app name, kit or version,
/// template directory) is validated before Cordova runs.
pub async fn create(request: &CreateRequest, registry: &KitRegistry) -> TacoResult<CreateOutcome> {
    let project_dir = request.path.clone();
    let path_str = project_dir.to_string_lossy().to_string();
    if !is_path_valid(&path_str) {
        return Err(TacoError::InvalidPath { path: path_str }.into());
    }
    if !is_missing_or_empty_dir(&project_dir).map_err(TacoError::Io)? {
        return Err(TacoError::Generic {
            message: format!("Directory '{path_str}' already exists and is not empty"),
        }
        .into());
    }

    let app_name = request.app_name();
    validate_app_name(&app_name)?;

    let (selection, kit, cordova_cli) = resolve_selection(request, registry)?;

    if let Some(template) = &request.copy_from {
        if !template.is_dir() {
            return Err(TacoError::Generic {
                message: format!("Template directory '{}' does not exist", template.display()),
            }
            .into());
        }
    }

    run_cordova_create(request, &app_name).await?;

    if let Some(template) = &request.copy_from {
        copy_recursive(template, &project_dir.join("www")).await?;
    }

    manifest::write(&project_dir, &selection)?;

    let telemetry = request.telemetry();
    telemetry.emit("create");

    Ok(CreateOutcome {
        project_dir,
        app_name,
        manifest: selection,
        kit,
        cordova_cli,
        telemetry,
    })
}

fn resolve_selection(
    request: &CreateRequest,
    registry: &KitRegistry,
) -> Result<(ProjectManifest, Option<Kit>, CordovaVersion), TacoError> {
    match (&request.kit, &request.cordova) {
        (Some(_), Some(_)) => Err(TacoError::Generic {
            message: "Specify either --kit or --cordova, not both".to_string(),
        }),
        (None, Some(version)) => {
            let version = registry.resolve_cordova_version(version)?;
            Ok((ProjectManifest::CordovaCli(version.to_string()), None, version))
        }
        (kit_id, None) => {
            let kit = match kit_id {
                Some(id) => registry.resolve_kit(id)?,
                None => registry.default_kit().ok_or_else(|| TacoError::KitMetadata {
                    message: "the kit catalog is empty; pass --cordova <version>".to_string(),
                })?,
            };
            Ok((
                ProjectManifest::Kit(kit.id.clone()),
                Some(kit.clone()),
                kit.cordova_cli.clone(),
            ))
        }
    }
}

async fn run_cordova_create(request: &CreateRequest, app_name: &str) -> TacoResult<()> {
    let mut command = CommandBuilder::new(request.cordova_bin.clone())
        .arg("create")
        .arg(request.path.to_string_lossy().to_string());
    let id = request.id.as_deref().or(request.name.as_ref().map(|_| DEFAULT_APP_ID));
    if let Some(id) = id {
        command = command.arg(id);
        if request.name.is_some() {
            command = command.arg(app_name);
        }
    }

    let pb = progress::spinner(&format!("Creating Cordova project {app_name}..."));
    let result = tokio::task::spawn_blocking(move || command.exec_checked()).await;
    pb.finish_and_clear();

    result.map_err(|e| TacoError::Generic {
        message: format!("Cordova create task failed: {e}"),
    })??;
    Ok(())
}

/// Resolve `path` against the current directory when it is relative.
pub fn absolute_project_path(path: &Path) -> TacoResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(TacoError::Io)?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use taco_kits::cache::KitSource;
    use tempfile::TempDir;

    use super::*;

    fn registry() -> KitRegistry {
        KitSource::Builtin.load().unwrap()
    }

    fn request(path: PathBuf, cordova_bin: &str) -> CreateRequest {
        CreateRequest {
            path,
            id: None,
            name: None,
            kit: None,
            cordova: None,
            copy_from: None,
            cordova_bin: cordova_bin.to_string(),
        }
    }

    fn taco_error(report: &miette::Report) -> &TacoError {
        report.downcast_ref::<TacoError>().expect("TacoError")
    }

    /// A stand-in `cordova` that records its arguments and creates `www/`.
    #[cfg(unix)]
    fn fake_cordova(dir: &Path) -> String {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("fake-cordova");
        std::fs::write(
            &script,
            "#!/bin/sh\nmkdir -p \"$2/www\" && printf '%s\\n' \"$@\" > \"$2/cordova-args\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script.to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn rejects_invalid_app_name_before_running_cordova() {
        let tmp = TempDir::new().unwrap();
        let mut req = request(tmp.path().join("app"), "nonexistent_cordova_xyz");
        req.name = Some("Bad<Name>".to_string());

        let err = create(&req, &registry()).await.unwrap_err();
        assert!(matches!(taco_error(&err), TacoError::InvalidAppName { .. }));
        assert!(!tmp.path().join("app").exists());
    }

    #[tokio::test]
    async fn rejects_non_empty_directory() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("existing"), "x").unwrap();
        let req = request(tmp.path().to_path_buf(), "nonexistent_cordova_xyz");

        let err = create(&req, &registry()).await.unwrap_err();
        assert!(err.to_string().contains("not empty"), "got: {err}");
    }

    #[tokio::test]
    async fn rejects_invalid_path() {
        let tmp = TempDir::new().unwrap();
        let req = request(tmp.path().join("bad\0dir"), "nonexistent_cordova_xyz");

        let err = create(&req, &registry()).await.unwrap_err();
        assert!(matches!(taco_error(&err), TacoError::InvalidPath { .. }));
    }

    #[tokio::test]
    async fn rejects_unknown_kit() {
        let tmp = TempDir::new().unwrap();
        let mut req = request(tmp.path().join("app"), "nonexistent_cordova_xyz");
        req.kit = Some("InvalidKit".to_string());

        let err = create(&req, &registry()).await.unwrap_err();
        assert!(matches!(taco_error(&err), TacoError::InvalidKit { .. }));
    }

    #[tokio::test]
    async fn rejects_kit_and_cordova_together() {
        let tmp = TempDir::new().unwrap();
        let mut req = request(tmp.path().join("app"), "nonexistent_cordova_xyz");
        req.kit = Some("5.1.1-Kit".to_string());
        req.cordova = Some("5.1.1".to_string());

        assert!(create(&req, &registry()).await.is_err());
    }

    #[tokio::test]
    async fn missing_cordova_binary_surfaces_io_error() {
        let tmp = TempDir::new().unwrap();
        let req = request(tmp.path().join("app"), "nonexistent_cordova_xyz");

        let err = create(&req, &registry()).await.unwrap_err();
        assert!(matches!(taco_error(&err), TacoError::Io(_)), "got: {err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn creates_project_with_default_kit() {
        let tmp = TempDir::new().unwrap();
        let bin = fake_cordova(tmp.path());
        let project = tmp.path().join("HelloTaco");

        let outcome = create(&request(project.clone(), &bin), &registry())
            .await
            .unwrap();

        assert_eq!(outcome.app_name, "HelloTaco");
        assert_eq!(outcome.manifest, ProjectManifest::Kit("5.1.1-Kit".to_string()));
        assert_eq!(
            manifest::read(&project).unwrap(),
            ProjectManifest::Kit("5.1.1-Kit".to_string())
        );
        let args = std::fs::read_to_string(project.join("cordova-args")).unwrap();
        assert_eq!(args.lines().collect::<Vec<_>>(), vec!["create", project.to_str().unwrap()]);
        assert_eq!(outcome.telemetry.value("subCommand"), Some("create"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn creates_project_pinned_to_cordova_with_template() {
        let tmp = TempDir::new().unwrap();
        let bin = fake_cordova(tmp.path());
        let template = tmp.path().join("template");
        std::fs::create_dir_all(template.join("js")).unwrap();
        std::fs::write(template.join("index.html"), "<h1>taco</h1>").unwrap();
        std::fs::write(template.join("js").join("index.js"), "// app").unwrap();

        let project = tmp.path().join("pinned");
        let mut req = request(project.clone(), &bin);
        req.cordova = Some("5.4.1".to_string());
        req.name = Some("Pinned App".to_string());
        req.copy_from = Some(template.clone());

        let outcome = create(&req, &registry()).await.unwrap();

        assert_eq!(outcome.manifest, ProjectManifest::CordovaCli("5.4.1".to_string()));
        assert!(outcome.kit.is_none());
        assert_eq!(
            std::fs::read_to_string(project.join("www").join("index.html")).unwrap(),
            "<h1>taco</h1>"
        );
        assert!(project.join("www").join("js").join("index.js").is_file());

        let args = std::fs::read_to_string(project.join("cordova-args")).unwrap();
        let args: Vec<&str> = args.lines().collect();
        assert_eq!(args[2], "io.cordova.hellocordova");
        assert_eq!(args[3], "Pinned App");
        assert!(outcome.telemetry.get("options.copyFrom").unwrap().is_pii);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_cordova_leaves_no_manifest() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let script = tmp.path().join("broken-cordova");
        std::fs::write(&script, "#!/bin/sh\necho 'cordova exploded' >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let project = tmp.path().join("app");
        let req = request(project.clone(), script.to_str().unwrap());
        let err = create(&req, &registry()).await.unwrap_err();

        match taco_error(&err) {
            TacoError::CommandFailed { stderr, .. } => assert_eq!(stderr, "cordova exploded"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(manifest::read(&project).is_err());
    }
}
