//! veneer - catalog and ingestion engine for zip-packaged visual themes.

mod commands;
mod diagnostic;

use clap::{Parser, Subcommand};
use diagnostic::IntoDiagnosticExn;
use miette::IntoDiagnostic;
use std::path::PathBuf;
use veneer_cache::{Database, Repository};
use veneer_config::Config;

#[derive(Parser)]
#[command(name = "veneer", version, about = "Browse and maintain a catalog of zip-packaged themes")]
struct Cli {
    /// Explicit config file (TOML or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the themes directory and refresh the catalog
    Scan {
        /// Also drop records whose archive no longer exists
        #[arg(long)]
        prune: bool,
    },
    /// List cataloged themes
    List {
        /// Only themes providing this element (icons, wallpaper, systemui,
        /// framework, lockscreen, ringtones, bootanimation, mms)
        #[arg(long)]
        element: Option<String>,
    },
    /// Show one theme in full
    Show { file_name: String },
    /// Remove a theme: catalog record, archive file, staged assets
    Remove { file_name: String },
    /// Stage a theme's ringtone and notification sounds
    StageRingtones { file_name: String },
    /// Decode a theme's preview thumbnail and write it as PNG
    Thumbnail {
        file_name: String,
        /// Output path
        #[arg(long, default_value = "thumbnail.png")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .into_diagnostic()?;

    // SQLite will create the database file, but not its directory.
    if let Some(parent) = config.database.parent() {
        std::fs::create_dir_all(parent).into_diagnostic()?;
    }
    let db = Database::connect(&config.database).await.into_diagnostic()?;
    let repo = Repository::from(&db);

    let result = match &cli.command {
        Command::Scan { prune } => commands::scan(&config, &repo, *prune).await,
        Command::List { element } => commands::list(&repo, element.as_deref()).await,
        Command::Show { file_name } => commands::show(&repo, file_name).await,
        Command::Remove { file_name } => commands::remove(&config, &repo, file_name).await,
        Command::StageRingtones { file_name } => commands::stage_ringtones(&config, &repo, file_name).await,
        Command::Thumbnail { file_name, out } => commands::thumbnail(&repo, file_name, out).await,
    };

    db.close().await;
    result
}
