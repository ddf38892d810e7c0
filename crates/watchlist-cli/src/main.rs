use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::list::ListArgs;
use commands::serve::ServeArgs;
use commands::{config, list, serve};
use std::path::PathBuf;
use watchlist_config::{Config, PathManager};

mod api;
mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlist")]
#[command(about = "Watchlist - Keep track of the movies you want to watch")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH", env = "WATCHLIST_CONFIG")]
    config: Option<PathBuf>,

    /// Server options used when no subcommand is given
    #[command(flatten)]
    serve: ServeArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    #[command(long_about = "Serve the movie API under /api/movies, plus the static frontend if a static directory is configured. Stops gracefully on Ctrl-C.")]
    Serve(ServeArgs),
    /// Print one page of movies from the data file
    List(ListArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration and resolved paths
    Show,

    /// Write a default config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let serve_args = match cli.command {
        Some(Commands::Serve(ref args)) => Some(args.clone()),
        None => Some(cli.serve.clone()),
        _ => None,
    };
    if let Some(args) = &serve_args {
        if let Some(file) = &args.log_file {
            config.logging.file = Some(file.clone());
        }
        if args.log_to_file {
            config.logging.to_file = true;
        }
    }
    let log_file = config.log_file(&paths);

    logging::init_logging(cli.verbose, cli.quiet, &config.logging, log_file.as_deref())
        .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Some(Commands::List(args)) => list::run_list(args, &config, &paths, &output),
        Some(Commands::Config { cmd }) => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &config, &config_file, &paths, &output)
        }
        Some(Commands::Serve(_)) | None => {
            let args = serve_args.unwrap_or_default();
            serve::run_serve(args, config, &paths, &output).await
        }
    }
}
