use std::path::PathBuf;

use serde_json::json;
use trellis_protocol::{async_trait, Task, TaskContext, TaskResult};

use super::is_dir;

/// Log the entries of `<folder_name>`.
pub struct Inspect {
    root: PathBuf,
}

impl Inspect {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Task for Inspect {
    fn command(&self) -> &str {
        "inspect"
    }

    fn description(&self) -> &str {
        "List the contents of a project folder"
    }

    fn params(&self) -> Vec<String> {
        vec!["folder_name".to_string()]
    }

    async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> {
        let folder = self.root.join(ctx.param("folder_name")?);
        if !is_dir(&folder).await {
            ctx.logger_mut().error_with(
                "folder does not exist",
                json!({ "path": folder.display().to_string() }),
            );
            ctx.fail();
            return Ok(());
        }

        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(&folder).await?;
        while let Some(entry) = dir.next_entry().await? {
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().await?.is_dir() {
                name.push('/');
            }
            entries.push(name);
        }
        entries.sort();

        ctx.logger_mut().info_with(
            format!("{} entries", entries.len()),
            json!({ "entries": entries }),
        );
        ctx.succeed();
        Ok(())
    }
}
