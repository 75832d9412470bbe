mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "labrisk",
    version,
    about = "Explainable hazard scoring for combinations of laboratory chemicals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every analysis command.
#[derive(Args, Clone)]
pub struct RunArgs {
    /// Directory holding substances.csv and incompatibilities.csv (default: bundled catalog)
    #[arg(long, value_name = "DIR")]
    pub catalog: Option<PathBuf>,

    /// JSON scoring config (default: built-in weights and thresholds)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    pub output: String,

    /// Show the step-by-step explanation
    #[arg(long)]
    pub verbose: bool,
}

/// Lab conditions given on the command line.
#[derive(Args, Clone)]
pub struct ContextArgs {
    /// Lab temperature in °C
    #[arg(long, value_name = "CELSIUS", allow_hyphen_values = true)]
    pub temperature: Option<Decimal>,

    /// Relative humidity in percent
    #[arg(long, value_name = "PERCENT")]
    pub humidity: Option<Decimal>,

    /// The room has no ventilation or fume hood
    #[arg(long)]
    pub no_ventilation: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a set of substances (1 to 10 names or CAS numbers)
    Analyze {
        /// Substance names or CAS numbers
        #[arg(required = true)]
        names: Vec<String>,

        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Analyze a JSON request file
    AnalyzeFile {
        /// Path to a request: {"substances": [...], "quantities": {...}, "context": {...}}
        request_file: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Analyze a pair of substances
    Pair {
        a: String,
        b: String,

        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Analyze a single substance
    Single {
        name: String,

        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Inspect the substance catalog
    Substances {
        #[command(subcommand)]
        action: SubstancesAction,
    },
    /// Inspect the known dangerous reactions
    Reactions {
        #[command(subcommand)]
        action: ReactionsAction,
    },
    /// Inspect and validate scoring configs
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum SubstancesAction {
    /// List catalog substances
    List {
        /// Directory holding substances.csv (default: bundled catalog)
        #[arg(long, value_name = "DIR")]
        catalog: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ReactionsAction {
    /// List the dangerous reactions that lock the score at its maximum
    List,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print a scoring config as JSON (the built-in one by default)
    Show {
        /// Config file to load and print
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Validate a scoring config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { names, context, run } => commands::analyze::run_names(names, &context, &run),
        Commands::AnalyzeFile { request_file, run } => commands::analyze::run_file(&request_file, &run),
        Commands::Pair { a, b, context, run } => commands::analyze::run_pair(&a, &b, &context, &run),
        Commands::Single { name, context, run } => commands::analyze::run_single(&name, &context, &run),
        Commands::Substances { action } => match action {
            SubstancesAction::List { catalog } => commands::catalog::list_substances(catalog.as_deref()),
        },
        Commands::Reactions { action } => match action {
            ReactionsAction::List => commands::catalog::list_reactions(),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show { config } => commands::config::show(config.as_deref()),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
