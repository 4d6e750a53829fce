//! tooldock - a lightweight plugin-based CLI toolkit.
//!
//! Plugins are installed with `tooldock plugin install <name>` and run directly
//! as `tooldock <name> [args...]`. Any first argument that is not a flag or a
//! built-in command is forwarded to the installed plugin of that name.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::ffi::OsString;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tooldock_config::{Config, StoragePaths};
use tooldock_registry::{InstallationStore, PluginManager, ReqwestTransport};

mod commands;
mod config_bridge;
mod theme;

use commands::{forward, plugin};
use theme::Theme;

/// tooldock - a lightweight plugin-based CLI toolkit
///
/// Install plugins with 'tooldock plugin install <name>' and use them directly
/// with 'tooldock <plugin> [args...]'.
#[derive(Parser)]
#[command(name = "tooldock")]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Print version information
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tooldock plugins
    Plugin {
        #[command(subcommand)]
        command: PluginCommands,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum PluginCommands {
    /// List available and installed plugins
    List,
    /// Download and install a plugin from the registry
    Install {
        /// Plugin name
        name: String,
    },
    /// Uninstall a plugin
    #[command(visible_aliases = ["uninstall", "rm"])]
    Remove {
        /// Plugin name
        name: String,
    },
    /// Install the latest registry version of an installed plugin
    Update {
        /// Plugin name
        name: String,
    },
    /// Search plugins by name or description
    Search {
        /// Case-insensitive search text
        query: String,
    },
}

/// Everything resolved before a command runs.
struct Startup {
    paths: StoragePaths,
    config: Config,
}

impl Startup {
    /// Resolve storage, create the plugin and cache directories, load config.
    fn load() -> anyhow::Result<Self> {
        let paths = StoragePaths::resolve().context("failed to resolve storage directory")?;
        paths.ensure().context("failed to create directories")?;
        let config = Config::load(&paths).context("failed to load configuration")?;
        Ok(Self { paths, config })
    }

    fn init_logging(&self, verbose: bool) {
        let log_config = config_bridge::to_log_config(&self.config, &self.paths, verbose);
        if let Err(e) = tooldock_telemetry::setup_logging(&log_config) {
            eprintln!("Failed to initialize logging: {e}");
        }
    }

    fn manager(&self) -> anyhow::Result<PluginManager> {
        let transport = ReqwestTransport::new().context("failed to create HTTP client")?;
        Ok(PluginManager::new(
            &self.paths,
            &self.config,
            Arc::new(transport),
        ))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", Theme::error(&format!("{e:#}")));
            ExitCode::FAILURE
        },
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let args: Vec<OsString> = std::env::args_os().collect();
    let startup = Startup::load()?;

    if let Some(name) = args.get(1).and_then(forward::forward_target) {
        startup.init_logging(false);
        let store = InstallationStore::from_paths(&startup.paths);
        let rest = args.get(2..).unwrap_or_default();
        return forward::run_forwarded(&store, name, rest).await;
    }

    let cli = Cli::parse_from(args);
    startup.init_logging(cli.verbose);

    if cli.version {
        print_version();
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command {
        Some(Commands::Plugin { command }) => handle_plugin(&startup, command).await?,
        Some(Commands::Version) => print_version(),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        },
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_plugin(startup: &Startup, command: PluginCommands) -> anyhow::Result<()> {
    let manager = startup.manager()?;
    match command {
        PluginCommands::List => plugin::list_plugins(&manager).await,
        PluginCommands::Install { name } => plugin::install_plugin(&manager, &name).await,
        PluginCommands::Remove { name } => plugin::remove_plugin(&manager, &name),
        PluginCommands::Update { name } => plugin::update_plugin(&manager, &name).await,
        PluginCommands::Search { query } => plugin::search_plugins(&manager, &query).await,
    }
}

fn print_version() {
    println!("tooldock version {}", env!("CARGO_PKG_VERSION"));
}
