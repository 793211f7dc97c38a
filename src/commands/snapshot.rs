use std::path::Path;

use anyhow::Result;

use swatch::domain::ports::DesignSource;
use swatch::Target;

use super::workspace::Workspace;
use crate::cli::SourceArgs;

pub fn cmd_snapshot(
    source: &SourceArgs,
    config_file: Option<&Path>,
    target: Target,
    json: bool,
) -> Result<()> {
    let workspace = Workspace::load(source, config_file)?;
    let root = workspace.design_source()?.load()?;
    let compiler = workspace.compiler()?;

    let graph = compiler.build(&root, &workspace.options(vec![target]))?;
    let snapshot = compiler.snapshot(&graph, target)?;

    if json {
        println!("{}", snapshot.to_wire()?);
    } else {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}
