//! Folder creation tasks.
//!
//! `init` and `bootstrap` are the user-facing entry points; `check-target`
//! and `make-dir` are internal building blocks reached only as dependencies.
//! `make-dir` depends on `check-target`, so the target is always inspected
//! before anything is created. Under `--fail-fast` a failed check skips the
//! creation; otherwise `make-dir` still refuses to create a folder over a file.

use std::path::PathBuf;

use serde_json::json;
use trellis_protocol::{async_trait, Dependency, FlagDef, Task, TaskContext, TaskResult};

use super::{is_dir, is_file};

const README: &str = "README.md";

/// Create `<folder_name>` and write a README into it.
pub struct Init {
    root: PathBuf,
}

impl Init {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Task for Init {
    fn command(&self) -> &str {
        "init"
    }

    fn description(&self) -> &str {
        "Create a project folder with a README"
    }

    fn dependencies(&self) -> Vec<Dependency> {
        vec![Dependency::new("make-dir")]
    }

    fn params(&self) -> Vec<String> {
        vec!["folder_name".to_string()]
    }

    fn flags(&self) -> Vec<FlagDef> {
        vec![
            FlagDef::new("force", "Overwrite an existing README"),
            FlagDef::new("title", "README heading (defaults to the folder name)"),
        ]
    }

    fn label(&self) -> String {
        "Initialize project".to_string()
    }

    async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> {
        let folder_name = ctx.param("folder_name")?.to_string();
        let force = ctx.flag_enabled("force")?;
        let title = ctx
            .flag_value::<String>("title")?
            .unwrap_or_else(|| folder_name.clone());

        let folder = self.root.join(&folder_name);
        if !is_dir(&folder).await {
            ctx.logger_mut().error_with(
                "folder is not available",
                json!({ "path": folder.display().to_string() }),
            );
            ctx.fail();
            return Ok(());
        }

        let readme = folder.join(README);
        if !force && tokio::fs::try_exists(&readme).await? {
            ctx.logger_mut().warn_with(
                "README.md already exists, pass --force to overwrite it",
                json!({ "path": readme.display().to_string() }),
            );
            ctx.fail();
            return Ok(());
        }

        ctx.set_progress_text("writing README.md");
        tokio::fs::write(&readme, format!("# {}\n", title)).await?;
        ctx.logger_mut().info_with(
            "wrote README.md",
            json!({ "path": readme.display().to_string(), "title": title }),
        );
        ctx.succeed();
        Ok(())
    }
}

/// Create the standard `build` and `dist` folders.
pub struct Bootstrap;

#[async_trait]
impl Task for Bootstrap {
    fn command(&self) -> &str {
        "bootstrap"
    }

    fn description(&self) -> &str {
        "Create the build and dist folders"
    }

    fn dependencies(&self) -> Vec<Dependency> {
        vec![
            Dependency::with_params("make-dir", ["build"]),
            Dependency::with_params("make-dir", ["dist"]),
        ]
    }

    async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> {
        ctx.logger_mut().info("build and dist folders are ready");
        ctx.succeed();
        Ok(())
    }
}

/// Fails when `<folder_name>` exists but is not a directory.
pub struct CheckTarget {
    root: PathBuf,
}

impl CheckTarget {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Task for CheckTarget {
    fn command(&self) -> &str {
        "check-target"
    }

    fn params(&self) -> Vec<String> {
        vec!["folder_name".to_string()]
    }

    fn label(&self) -> String {
        "Check target".to_string()
    }

    fn is_internal(&self) -> bool {
        true
    }

    async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> {
        let target = self.root.join(ctx.param("folder_name")?);

        match tokio::fs::metadata(&target).await {
            Ok(metadata) if !metadata.is_dir() => {
                ctx.logger_mut().warn_with(
                    "target exists and is not a folder",
                    json!({ "path": target.display().to_string() }),
                );
                ctx.fail();
            }
            Ok(_) => {
                ctx.logger_mut().info("target folder already exists");
                ctx.succeed();
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ctx.logger_mut().info("target is free");
                ctx.succeed();
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

/// Create `<folder_name>` and any missing parents.
pub struct MakeDir {
    root: PathBuf,
}

impl MakeDir {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Task for MakeDir {
    fn command(&self) -> &str {
        "make-dir"
    }

    fn dependencies(&self) -> Vec<Dependency> {
        vec![Dependency::new("check-target")]
    }

    fn params(&self) -> Vec<String> {
        vec!["folder_name".to_string()]
    }

    fn label(&self) -> String {
        "Create folder".to_string()
    }

    fn is_internal(&self) -> bool {
        true
    }

    async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> {
        let folder = self.root.join(ctx.param("folder_name")?);

        if is_file(&folder).await {
            ctx.logger_mut().error_with(
                "cannot create folder over an existing file",
                json!({ "path": folder.display().to_string() }),
            );
            ctx.fail();
            return Ok(());
        }

        tokio::fs::create_dir_all(&folder).await?;
        ctx.logger_mut().info_with(
            "folder ready",
            json!({ "path": folder.display().to_string() }),
        );
        ctx.succeed();
        Ok(())
    }
}
