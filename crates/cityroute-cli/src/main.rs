use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cityroute_cli::commands::map::{handle_map_command, MapCommandArgs};
use cityroute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use cityroute_cli::output::{print_footer, print_logo, OutputFormat};
use cityroute_lib::{DatasetPaths, HeuristicKind};

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest-route planner for city road maps")]
struct Cli {
    /// Directory holding locations.txt and connections.txt (defaults to
    /// CITYROUTE_DATA_DIR, then the current directory).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Suppress the banner.
    #[arg(long, global = true)]
    no_logo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Default)]
struct MapFileArgs {
    /// Explicit locations file, overriding the data directory.
    #[arg(long)]
    locations: Option<PathBuf>,
    /// Explicit connections file, overriding the data directory.
    #[arg(long)]
    connections: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two location names.
    Route {
        /// Starting location name.
        #[arg(long = "from")]
        from: String,
        /// Destination location name.
        #[arg(long = "to")]
        to: String,
        /// Locations to avoid (comma separated, repeatable).
        #[arg(long, value_delimiter = ',')]
        avoid: Vec<String>,
        /// Cost model: `distance` (1) or `links` (2).
        #[arg(long, default_value_t = HeuristicKind::Distance)]
        heuristic: HeuristicKind,
        /// Pause after every expansion; enter `q` to cancel.
        #[arg(long)]
        step: bool,
        #[command(flatten)]
        files: MapFileArgs,
    },
    /// List every location with its outgoing connections.
    Map {
        /// Locations to leave out (comma separated, repeatable).
        #[arg(long, value_delimiter = ',')]
        avoid: Vec<String>,
        #[command(flatten)]
        files: MapFileArgs,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let started = Instant::now();

    if !cli.no_logo && cli.format.is_decorated() {
        print_logo();
    }

    match cli.command {
        Command::Route {
            from,
            to,
            avoid,
            heuristic,
            step,
            files,
        } => {
            let paths = resolve_paths(cli.data_dir.as_ref(), &files);
            let args = RouteCommandArgs {
                from,
                to,
                avoid,
                heuristic,
                step,
            };
            handle_route_command(&paths, cli.format, &args)?;
        }
        Command::Map { avoid, files } => {
            let paths = resolve_paths(cli.data_dir.as_ref(), &files);
            handle_map_command(&paths, cli.format, &MapCommandArgs { avoid })?;
        }
    }

    if cli.format.is_decorated() {
        print_footer(started.elapsed());
    }
    Ok(())
}

fn resolve_paths(data_dir: Option<&PathBuf>, files: &MapFileArgs) -> DatasetPaths {
    DatasetPaths::resolve(
        data_dir.map(PathBuf::as_path),
        files.locations.as_deref(),
        files.connections.as_deref(),
    )
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
