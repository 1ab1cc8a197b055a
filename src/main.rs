//! CLI entry point for advent-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "advent-rs")]
#[command(version = "0.1.0")]
#[command(about = "Content loader and CLI for Advent-style daily challenge sites", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Advent site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new day file
    New {
        /// Day number (1-25)
        day: u32,

        /// Title of the new entry
        #[arg(short, long)]
        title: Option<String>,

        /// Topic category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Difficulty label
        #[arg(short = 'D', long)]
        difficulty: Option<String>,
    },

    /// List all day entries
    #[command(alias = "ls")]
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single entry by day number or slug
    Show {
        /// Day number or slug (e.g. 7, day-7, index)
        entry: String,

        /// Print metadata only, without the body
        #[arg(short, long)]
        meta: bool,
    },

    /// Display the calendar progress summary
    Status {
        /// Emit JSON instead of a summary line
        #[arg(long)]
        json: bool,
    },

    /// Validate the content directory
    Check,

    /// Export entries, index and progress as JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "advent_rs=debug,info"
    } else {
        "advent_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing Advent site in {:?}", target_dir);
            advent_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized Advent site in {:?}", target_dir);
        }

        Commands::New {
            day,
            title,
            category,
            difficulty,
        } => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            tracing::info!("Creating day {} entry", day);
            advent_rs::commands::new::create_day(
                &advent,
                day,
                title.as_deref(),
                category.as_deref(),
                difficulty.as_deref(),
            )?;
        }

        Commands::List { json } => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            advent_rs::commands::list::run(&advent, json)?;
        }

        Commands::Show { entry, meta } => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            advent_rs::commands::show::run(&advent, &entry, meta)?;
        }

        Commands::Status { json } => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            advent_rs::commands::status::run(&advent, json)?;
        }

        Commands::Check => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            advent_rs::commands::check::run(&advent)?;
        }

        Commands::Export { output } => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            advent_rs::commands::export::run(&advent, output.as_deref())?;
        }

        Commands::Version => {
            println!("advent-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
