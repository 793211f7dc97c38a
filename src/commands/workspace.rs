//! Shared setup: configuration, design source and use-case wiring

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::warn;

use swatch::application::{CompileOptions, CompileUseCase};
use swatch::config::{self, Config};
use swatch::domain::ports::{DesignSource, EventSink, SkipToolchainCheck, ToolchainCheck};
use swatch::infrastructure::{
    DesignDumpImporter, DumpFileSource, JsonEventSink, LocalFs, PathToolchain,
    SystemFontCatalog, TracingEventSink,
};
use swatch::{BindingRegistry, Target};

use crate::cli::SourceArgs;

pub type Compiler = CompileUseCase<LocalFs, Box<dyn ToolchainCheck>>;

/// Resolved project settings for one command
pub struct Workspace {
    pub config: Config,
    /// Directory relative config paths resolve against
    pub base: PathBuf,
    pub project_root: PathBuf,
    dump: Option<PathBuf>,
}

impl Workspace {
    pub fn load(source: &SourceArgs, config_file: Option<&Path>) -> Result<Self> {
        let loaded = config::discover(&source.project, config_file)?;
        for warning in &loaded.warnings {
            warn!("{}", warning);
        }

        let mut config = loaded.config;
        if source.skip_toolchain_check {
            config.toolchain.skip_check = true;
        }
        let project_root = config.project_root(&loaded.base);
        let dump = source
            .dump
            .clone()
            .or_else(|| config.design_dump(&loaded.base));

        Ok(Self {
            config,
            base: loaded.base,
            project_root,
            dump,
        })
    }

    pub fn targets(&self, cli: Option<Vec<Target>>) -> Vec<Target> {
        cli.filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.config.enabled_targets())
    }

    pub fn options(&self, targets: Vec<Target>) -> CompileOptions {
        CompileOptions::new(&self.project_root)
            .with_targets(targets)
            .with_settings(self.config.emit_settings())
    }

    pub fn output_dir(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.unwrap_or_else(|| self.config.output_dir(&self.base))
    }

    pub fn design_source(&self) -> Result<Arc<dyn DesignSource>> {
        let Some(dump) = &self.dump else {
            bail!("no design dump: pass --dump or set [design] dump in swatch.toml");
        };
        let importer = DesignDumpImporter::new(&self.config.design.assets);
        let source = DumpFileSource::new(dump, importer)
            .watching(self.project_root.join(&self.config.design.assets));
        Ok(Arc::new(source))
    }

    pub fn compiler(&self) -> Result<Compiler> {
        let catalog = BindingRegistry::with_standard_library()
            .finalize()
            .context("standard library bindings")?;
        Ok(CompileUseCase::new(Arc::new(catalog), LocalFs::new(), self.toolchain())
            .with_fonts(Arc::new(self.fonts())))
    }

    fn toolchain(&self) -> Box<dyn ToolchainCheck> {
        if self.config.toolchain.skip_check {
            return Box::new(SkipToolchainCheck);
        }
        let mut toolchain = PathToolchain::new();
        for target in Target::ALL {
            if let Some(program) = self.config.toolchain_program(target) {
                toolchain = toolchain.with_program(target, program);
            }
        }
        if let Some(path) = &self.config.toolchain.search_path {
            toolchain = toolchain.with_search_path(path);
        }
        Box::new(toolchain)
    }

    fn fonts(&self) -> SystemFontCatalog {
        let extra = self.config.font_paths(&self.base);
        if self.config.fonts.system {
            SystemFontCatalog::new(extra)
        } else {
            SystemFontCatalog::with_roots(extra)
        }
    }
}

/// NDJSON on stdout, or the development log
pub fn event_sink(json: bool) -> Arc<dyn EventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink)
    }
}
