//! Logging setup for the wordfreq binary

use tracing_subscriber::EnvFilter;

/// Parse log level from config string
fn parse_log_level(level: &str) -> Option<tracing::Level> {
  match level.to_lowercase().as_str() {
    "off" => None,
    "error" => Some(tracing::Level::ERROR),
    "warn" => Some(tracing::Level::WARN),
    "info" => Some(tracing::Level::INFO),
    "debug" => Some(tracing::Level::DEBUG),
    "trace" => Some(tracing::Level::TRACE),
    _ => Some(tracing::Level::WARN),
  }
}

/// Raise `level` by one step per `-v`
fn raise(level: Option<tracing::Level>, verbose: u8) -> Option<tracing::Level> {
  use tracing::Level;

  const LADDER: [Level; 5] = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE];
  // 0 is "off", 1..=5 index into LADDER
  let rank = match level {
    Some(level) => LADDER.iter().position(|l| *l == level).map_or(2, |i| i + 1),
    None => 0,
  };
  match (rank + verbose as usize).min(LADDER.len()) {
    0 => None,
    n => Some(LADDER[n - 1]),
  }
}

/// Initialize console logging on stderr.
///
/// The default level comes from config, raised by `-v`; `RUST_LOG` overrides
/// both. Stdout is left to the ranking.
pub fn init_cli_logging(level: &str, verbose: u8) {
  let directive = match raise(parse_log_level(level), verbose) {
    Some(level) => tracing::level_filters::LevelFilter::from_level(level),
    None => tracing::level_filters::LevelFilter::OFF,
  };

  // Build env filter (allows RUST_LOG override)
  let env_filter = EnvFilter::builder()
    .with_default_directive(directive.into())
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(true)
    .with_writer(std::io::stderr)
    .init();
}
