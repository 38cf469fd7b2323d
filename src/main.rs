use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use deploy_addresses::config::Mode;
use deploy_addresses::config_loader::{self, CliOverrides};
use deploy_addresses::consolidator;
use deploy_addresses::report;

/// Consolidate deployment address files into a single JSON summary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional YAML settings file; command-line flags take precedence
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a fixed list of contract names and extract the first address in each file
    Compile {
        #[command(flatten)]
        common: CommonArgs,

        /// Comma-separated contract names to look up
        #[arg(long, value_delimiter = ',')]
        names: Option<Vec<String>>,
    },

    /// Read every address file in the directory as a KEY=VALUE line
    Consolidate {
        #[command(flatten)]
        common: CommonArgs,

        /// Chain id recorded in the manifest (null when omitted)
        #[arg(long)]
        chain_id: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Directory holding the address files
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Path of the JSON summary to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Network label recorded in the summary
    #[arg(short, long)]
    network: Option<String>,

    /// Extension of address files
    #[arg(short, long)]
    extension: Option<String>,
}

impl Commands {
    fn mode(&self) -> Mode {
        match self {
            Commands::Compile { .. } => Mode::Compile,
            Commands::Consolidate { .. } => Mode::Consolidate,
        }
    }

    fn overrides(self) -> CliOverrides {
        let (common, names, chain_id) = match self {
            Commands::Compile { common, names } => (common, names, None),
            Commands::Consolidate { common, chain_id } => (common, None, chain_id),
        };
        CliOverrides {
            addresses_dir: common.dir,
            output: common.output,
            network: common.network,
            extension: common.extension,
            names,
            chain_id,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    let mode = cli.command.mode();
    let file_config = cli
        .config
        .as_deref()
        .map(config_loader::load_file_config)
        .transpose()?;
    let config = config_loader::resolve_config(mode, file_config.as_ref(), &cli.command.overrides())?;

    info!("Compiling deployed addresses ({:?} mode)", mode);

    let result = consolidator::consolidate(&config)?;
    report::write_report(&result, &config.output)?;

    info!(
        "Found {} contracts on network '{}'",
        result.len(),
        result.network
    );
    Ok(())
}
