//! Folder scaffolding tasks shipped with the `trellis` binary.

use std::path::{Path, PathBuf};

use trellis_core::{EngineConfig, EngineResult, Tool};

mod clean;
mod inspect;
mod scaffold;

use clean::Clean;
use inspect::Inspect;
use scaffold::{Bootstrap, CheckTarget, Init, MakeDir};

/// Assemble the `trellis` tool, resolving folder names against `root`.
pub fn build_tool(config: EngineConfig, root: PathBuf) -> EngineResult<Tool> {
    let mut tool = Tool::new("trellis")
        .about("Scaffold project folders with dependent tasks")
        .with_config(config);

    tool.register(Init::new(root.clone()))?;
    tool.register(Bootstrap)?;
    tool.register(Clean::new(root.clone()))?;
    tool.register(Inspect::new(root.clone()))?;
    tool.register(CheckTarget::new(root.clone()))?;
    tool.register(MakeDir::new(root))?;

    Ok(tool)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_dir())
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|metadata| !metadata.is_dir())
}
