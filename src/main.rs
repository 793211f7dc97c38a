//! Swatch CLI - design-token compiler and hot-reload server
//!
//! Usage: swatch <COMMAND>
//!
//! Commands:
//!   compile   Compile the design and publish bindings for every target
//!   serve     Watch the design and push snapshots to running apps
//!   snapshot  Print the snapshot JSON of one target

use std::fmt;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Compile {
            source,
            targets,
            output,
            dry_run,
        } => commands::cmd_compile(&source, config, targets, output, dry_run, cli.json),
        Commands::Serve {
            source,
            targets,
            addr,
            no_publish,
        } => commands::cmd_serve(&source, config, targets, addr, no_publish, cli.json),
        Commands::Snapshot { source, target } => {
            commands::cmd_snapshot(&source, config, target, cli.json)
        }
    }
}

/// Development log on stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8, json: bool) {
    let default = match (json, verbose) {
        (true, 0) => "swatch=warn",
        (_, 0) => "swatch=info",
        (_, 1) => "swatch=debug",
        _ => "swatch=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(WallClock)
        .init();
}

/// `HH:MM:SS` local time
struct WallClock;

impl FormatTime for WallClock {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S"))
    }
}
