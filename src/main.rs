use clap::{Args, Parser, Subcommand, builder::styling};
use eyre::Result;
use restaurant_inspections::{
    cli::{inspection_stats, load_inspections, print_stats},
    config::{Config, ConfigLayer},
};
use std::path::PathBuf;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Restaurant Inspections: normalize an inspection CSV export into per-table SQL insert scripts
#[derive(Parser)]
#[command(name = "inspections", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source INSPECTIONS_* variables from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// A YAML file with source, output_dir, city and state settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

/// Settings that override the config file and environment
#[derive(Args)]
struct RunArgs {
    /// CSV export to read
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Directory to write insert_<table>.sql files to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// City label applied to every address
    #[arg(long)]
    city: Option<String>,

    /// State label applied to every address
    #[arg(long)]
    state: Option<String>,
}

impl From<RunArgs> for ConfigLayer {
    fn from(args: RunArgs) -> Self {
        ConfigLayer {
            source: args.source,
            output_dir: args.output_dir,
            city: args.city,
            state: args.state,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, normalize and write SQL insert scripts
    Load {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Extract and normalize only, then print entity counts
    Stats {
        #[command(flatten)]
        args: RunArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing dotenv file is fine; a broken one is not
    match dotenvy::from_filename(&cli.env) {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Load { args } => {
            let config = Config::resolve(cli.config.as_deref(), args.into())?;
            log::debug!("Resolved configuration: {:?}", config);
            load_inspections(&config)?;
        }
        Commands::Stats { args } => {
            let config = Config::resolve(cli.config.as_deref(), args.into())?;
            log::debug!("Resolved configuration: {:?}", config);
            let (snapshot, stats) = inspection_stats(&config)?;
            print_stats(&snapshot, &stats);
        }
    }

    Ok(())
}
