mod export;
mod map;
mod naming;
mod prompt;
mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use looker_core::GeoPoint;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "looker")]
#[command(about = "Collect nearby places by category and export them to a spreadsheet and map")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search around one or more points and export the results
    Search(SearchArgs),
    /// List the selectable categories
    Categories,
}

/// Any value left unset is prompted for interactively.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct SearchArgs {
    /// Comma-separated category keys, e.g. `1,3,5`
    #[arg(long)]
    pub categories: Option<String>,

    /// Search radius in meters
    #[arg(long, value_parser = parse_radius_arg)]
    pub radius: Option<u32>,

    /// Search center as `lat,lng`; repeat for several points
    #[arg(long = "point", value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub points: Vec<GeoPoint>,

    /// Overrides `LOOKER_OUTPUT_DIR`
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

fn parse_radius_arg(raw: &str) -> Result<u32, String> {
    looker_core::parse_radius(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Categories) => {
            print!("{}", prompt::category_menu());
            Ok(())
        }
        Some(Commands::Search(args)) => search(args).await,
        None => search(SearchArgs::default()).await,
    }
}

async fn search(args: SearchArgs) -> anyhow::Result<()> {
    let config = looker_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");

    run::run_search(&config, args).await
}

/// `RUST_LOG` wins when set; otherwise the configured level applies.
fn init_tracing(fallback_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
