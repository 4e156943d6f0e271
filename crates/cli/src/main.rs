//! wordfreq - term frequency over a text file, computed by a pipeline of actors

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{debug, info, warn};
use wordfreq_core::{CancellationToken, Config, PipelinePaths, output::LineSink, run_pipeline};

mod logging;

use logging::init_cli_logging;

#[derive(Parser)]
#[command(name = "wordfreq")]
#[command(about = "Print the most frequent words of a text file, ignoring stop words")]
#[command(after_help = "\
EXAMPLE:
  wordfreq stop_words.txt pride-and-prejudice.txt

CONFIG:
  Read from --config, $WORDFREQ_CONFIG, or <config dir>/wordfreq/config.toml")]
struct Cli {
  /// Comma-separated stop-word list
  stop_words: PathBuf,
  /// Text file to count
  input: PathBuf,
  /// Config file (default: user config, if present)
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,
  /// Number of lines to print (1 to 25)
  #[arg(long, value_name = "N")]
  top: Option<usize>,
  /// Mailbox capacity of every actor
  #[arg(long, value_name = "N")]
  capacity: Option<usize>,
  /// More logging on stderr (repeatable)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

impl Cli {
  /// Resolve config and apply flag overrides
  fn config(&self) -> Result<Config> {
    let mut config = Config::load(self.config.as_deref()).context("Failed to load config")?;
    if let Some(top) = self.top {
      config.pipeline.top_n = top;
    }
    if let Some(capacity) = self.capacity {
      config.pipeline.mailbox_capacity = capacity;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let config = cli.config()?;

  init_cli_logging(&config.logging.level, cli.verbose);
  debug!(?config, "Configuration resolved");

  let cancel = CancellationToken::new();
  let on_interrupt = cancel.clone();
  tokio::spawn(async move {
    if let Err(e) = signal::ctrl_c().await {
      warn!("Failed to listen for ctrl-c: {}", e);
      return;
    }
    info!("Received ctrl-c, cancelling run");
    on_interrupt.cancel();
  });

  let paths = PipelinePaths {
    stop_words: cli.stop_words,
    input: cli.input,
  };
  let report = run_pipeline(&config.pipeline, paths, Box::new(LineSink::stdout()), cancel)
    .await
    .context("Word frequency run failed")?;

  debug!(
    distinct_words = report.summary.distinct_words,
    lines_written = report.summary.lines_written,
    "Done"
  );
  Ok(())
}
