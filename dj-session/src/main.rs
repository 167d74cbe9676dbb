use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use core::num::NonZeroUsize;
use deck_cache::config::SessionConfig;
use deck_cache::metrics::CacheMetrics;
use deck_cache::service::DjLibrary;
use deck_cache::ConfigError;
use dj_session::{settings, DjSession};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "deck_cache=info,dj_session=info,warn";

/// DJ session runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session file (TOML). Defaults to $DJ_SESSION_CONFIG_PATH, then
    /// $XDG_CONFIG_HOME/dj-session/session.toml
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a playlist through the controller cache and the decks
    Run {
        /// Playlist to play (default: the first configured playlist)
        #[arg(short, long)]
        playlist: Option<String>,

        /// Override the controller cache size
        #[arg(long, value_name = "N")]
        cache_size: Option<usize>,
    },

    /// Build the library and print every track
    Library,

    /// Check the session file without running it
    Validate,
}

fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = settings::load(args.config.as_deref())
        .context("failed to load session configuration")?;

    match args.command {
        Commands::Run {
            playlist,
            cache_size,
        } => run(config, playlist.as_deref(), cache_size),
        Commands::Library => show_library(&config),
        Commands::Validate => validate(&config),
    }
}

fn run(config: SessionConfig, playlist: Option<&str>, cache_size: Option<usize>) -> Result<()> {
    let mut session = match cache_size {
        Some(size) => {
            let size = NonZeroUsize::new(size).ok_or(ConfigError::ZeroCacheSize)?;
            DjSession::with_cache_size(config, size)?
        }
        None => DjSession::new(config)?,
    };

    let stats = session.run(playlist)?.clone();
    info!(tracks = stats.tracks_processed, "session finished");

    println!("{}", session.library());
    print!("{}", session.status_report());
    println!();
    print!("{}", stats);

    println!("\nCache Metrics ({})", session.controller().algorithm_name());
    for (name, value) in session.controller().metrics() {
        println!("  {:<26} {:>10.3}", name, value);
    }
    Ok(())
}

fn show_library(config: &SessionConfig) -> Result<()> {
    let mut library = DjLibrary::new();
    let count = library
        .build_library(&config.library)
        .context("failed to build track library")?;

    println!("Track library ({} tracks)", count);
    for (pos, track) in library.library().iter().enumerate() {
        println!("  {:>3}. {}  [quality {:.1}]", pos + 1, track, track.quality_score());
    }
    for playlist in &config.playlists {
        println!("Playlist '{}': {:?}", playlist.name, playlist.tracks);
    }
    Ok(())
}

fn validate(config: &SessionConfig) -> Result<()> {
    let warnings = settings::validate(config).context("session file is invalid")?;
    for warning in &warnings {
        println!("warning: {}", warning);
    }
    println!(
        "Session OK: {} tracks, {} playlists, cache size {}",
        config.library.len(),
        config.playlists.len(),
        config.controller.cache_size
    );
    Ok(())
}
