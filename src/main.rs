mod app;
mod catalog;
mod config;
mod constants;
mod display;
mod error;
mod input;
mod player;
mod playlist;
mod search;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::App;
use catalog::VideoLibrary;
use config::Config;
use constants::constants;
use display::OutputMode;
use player::VideoPlayer;

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Args {
  /// Catalog file with one `title | id | tag, tag` entry per line (default: built-in library)
  #[arg(short, long)]
  catalog: Option<PathBuf>,

  /// Read commands from a file instead of stdin
  #[arg(short, long)]
  script: Option<PathBuf>,

  /// Output format (default: config file, else text)
  #[arg(short, long)]
  output: Option<OutputMode>,

  /// Print shell completions and exit
  #[arg(long, value_name = "SHELL")]
  completions: Option<Shell>,
}

// --- Logging ---

const DEFAULT_LOG_FILTER: &str = "vp=info";

/// `RUST_LOG` first, then the config's `log_filter`, then the default.
/// An unparseable directive falls through to the next source.
fn log_filter(env: Option<&str>, configured: Option<&str>) -> EnvFilter {
  [env, configured]
    .into_iter()
    .flatten()
    .find_map(|directive| EnvFilter::try_new(directive).ok())
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn prepare_log_dir(dir: &Path) -> bool {
  match std::fs::create_dir_all(dir) {
    Ok(()) => true,
    Err(e) => {
      eprintln!("warning: logging disabled, cannot create {}: {}", dir.display(), e);
      false
    }
  }
}

/// Logs go to a daily file in the data dir; stdout belongs to command output.
/// Without a usable data dir the player runs unlogged.
fn init_logging(config: &Config) -> Option<WorkerGuard> {
  let proj_dirs = Config::project_dirs()?;
  let log_dir = proj_dirs.data_local_dir();
  if !prepare_log_dir(log_dir) {
    return None;
  }

  let appender = tracing_appender::rolling::daily(log_dir, &constants().log_file);
  let (writer, guard) = tracing_appender::non_blocking(appender);
  let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
  let filter = log_filter(env.as_deref(), config.log_filter.as_deref());

  tracing_subscriber::fmt().with_writer(writer).with_env_filter(filter).with_ansi(false).init();
  Some(guard)
}

// --- Main ---

fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(shell) = args.completions {
    clap_complete::generate(shell, &mut Args::command(), &constants().app_name, &mut io::stdout());
    return Ok(());
  }

  let config = Config::load();
  let _guard = init_logging(&config);

  let output = args.output.or_else(|| config.output.as_deref().map(OutputMode::from_config)).unwrap_or_default();
  let library = match args.catalog.or(config.catalog) {
    Some(path) => VideoLibrary::load(&path)?,
    None => VideoLibrary::embedded()?,
  };
  if library.is_empty() {
    warn!("catalog is empty");
  }
  info!(videos = library.len(), ?output, "starting");

  let mut app = App::new(VideoPlayer::new(library), output);
  let mut out = io::stdout().lock();
  let result = match args.script {
    Some(path) => {
      let file = File::open(&path).with_context(|| format!("Failed to open script {}", path.display()))?;
      app.run(&mut BufReader::new(file), &mut out)
    }
    None => {
      let stdin = io::stdin();
      app.interactive = stdin.is_terminal();
      app.run(&mut stdin.lock(), &mut out)
    }
  };
  info!("shutting down");
  result
}
