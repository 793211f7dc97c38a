use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use swatch::Target;

/// Swatch - design-token compiler and hot-reload server
#[derive(Parser, Debug)]
#[command(name = "swatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of <project>/swatch.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the design comes from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Project directory
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Design dump JSON (overrides [design] dump)
    #[arg(short, long)]
    pub dump: Option<PathBuf>,

    /// Skip the compiler availability check
    #[arg(long)]
    pub skip_toolchain_check: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the design and publish bindings for every target
    Compile {
        #[command(flatten)]
        source: SourceArgs,

        /// Target platforms
        #[arg(short, long, value_delimiter = ',')]
        targets: Option<Vec<Target>>,

        /// Output root (overrides [output] dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compile without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Watch the design and push snapshots to running apps
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Target platforms
        #[arg(short, long, value_delimiter = ',')]
        targets: Option<Vec<Target>>,

        /// Listen address (overrides [hot] addr)
        #[arg(long)]
        addr: Option<String>,

        /// Do not publish outputs on rebuild
        #[arg(long)]
        no_publish: bool,
    },

    /// Print the snapshot JSON of one target
    Snapshot {
        #[command(flatten)]
        source: SourceArgs,

        /// Target platform
        #[arg(short, long, value_enum)]
        target: Target,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compile_with_targets() {
        let cli = Cli::try_parse_from([
            "swatch", "compile", "--targets", "ios,web", "--dump", "brand.json", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Compile {
                targets, source, ..
            } => {
                assert_eq!(targets, Some(vec![Target::Ios, Target::Web]));
                assert_eq!(source.dump, Some(PathBuf::from("brand.json")));
                assert_eq!(source.project, PathBuf::from("."));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn snapshot_requires_target() {
        assert!(Cli::try_parse_from(["swatch", "snapshot"]).is_err());
        let cli = Cli::try_parse_from(["swatch", "-vv", "snapshot", "-t", "android"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Snapshot {
                target: Target::Android,
                ..
            }
        ));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
