//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A portfolio site backed by a headless CMS", long_about = None)]
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
    /// Initialize a new portfolio site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate the static page
    #[command(alias = "g")]
    Generate,

    /// Start the server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Clean the public folder
    Clean,

    /// List content-store documents
    List {
        /// Type of content to list (project, skill, profile, contact)
        #[arg(default_value = "project")]
        r#type: String,
    },

    /// Write the initial documents to the content store
    Seed {
        /// Which set to write (projects, profile-skills)
        set: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing portfolio site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized portfolio site in {:?}", target_dir);
        }

        Commands::Generate => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip, open } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&site, &ip, port, open).await?;
        }

        Commands::Clean => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type).await?;
        }

        Commands::Seed { set } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::seed::run(&site, &set).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
