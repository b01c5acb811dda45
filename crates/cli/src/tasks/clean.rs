use std::path::PathBuf;

use serde_json::json;
use trellis_protocol::{async_trait, FlagDef, Task, TaskContext, TaskResult};

use super::is_dir;

/// Remove `<folder_name>` and everything in it. Requires `--yes`.
pub struct Clean {
    root: PathBuf,
}

impl Clean {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Task for Clean {
    fn command(&self) -> &str {
        "clean"
    }

    fn description(&self) -> &str {
        "Remove a project folder"
    }

    fn params(&self) -> Vec<String> {
        vec!["folder_name".to_string()]
    }

    fn flags(&self) -> Vec<FlagDef> {
        vec![FlagDef::new("yes", "Confirm the removal").required()]
    }

    fn label(&self) -> String {
        "Remove project".to_string()
    }

    async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> {
        let folder = self.root.join(ctx.param("folder_name")?);
        let path = folder.display().to_string();

        if !ctx.flag_enabled("yes")? {
            ctx.logger_mut()
                .warn_with("removal was not confirmed", json!({ "path": path }));
            ctx.fail();
            return Ok(());
        }

        if !is_dir(&folder).await {
            ctx.logger_mut()
                .info_with("nothing to remove", json!({ "path": path }));
            ctx.succeed();
            return Ok(());
        }

        ctx.set_progress_text("removing");
        tokio::fs::remove_dir_all(&folder).await?;
        ctx.logger_mut().info_with("removed", json!({ "path": path }));
        ctx.succeed();
        Ok(())
    }
}
