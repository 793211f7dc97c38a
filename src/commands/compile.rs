use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use swatch::application::PublishUseCase;
use swatch::infrastructure::LocalFs;
use swatch::domain::ports::DesignSource;
use swatch::Target;

use super::workspace::{event_sink, Workspace};
use crate::cli::SourceArgs;

pub fn cmd_compile(
    source: &SourceArgs,
    config_file: Option<&Path>,
    targets: Option<Vec<Target>>,
    output: Option<PathBuf>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let workspace = Workspace::load(source, config_file)?;
    let events = event_sink(json);
    let root = workspace.design_source()?.load()?;
    let options = workspace.options(workspace.targets(targets));

    let report = workspace
        .compiler()?
        .execute_with_events(&root, &options, events.clone())?;

    if !dry_run {
        let publisher = PublishUseCase::new(workspace.output_dir(output), LocalFs::new())
            .with_events(events);
        for output in &report.outputs {
            let published = publisher.execute(output)?;
            if !json {
                println!(
                    "✓ {:<8} {} ({} files)",
                    output.target.directory_name(),
                    published.destination.display(),
                    published.files.len()
                );
            }
        }
    }

    if !json {
        for failure in &report.failures {
            println!("✗ {:<8} {}", failure.target.directory_name(), failure.error);
        }
    }
    if !report.is_success() {
        bail!("{} of {} targets failed", report.failures.len(), options.targets.len());
    }
    Ok(())
}
