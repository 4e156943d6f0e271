//! Output sinks for the final ranking

use std::{
  io::{self, Write},
  sync::{Arc, Mutex, PoisonError},
};

use crate::ranking::RankedEntry;

/// Destination for ranked lines
pub trait RankingSink: Send {
  fn write_entry(&mut self, entry: &RankedEntry) -> io::Result<()>;

  fn flush(&mut self) -> io::Result<()>;
}

/// Write the first `limit` entries in rank order, returning how many were
/// written. Shorter rankings are written in full, never padded.
pub fn write_ranking(sink: &mut dyn RankingSink, ranking: &[RankedEntry], limit: usize) -> io::Result<usize> {
  let mut written = 0;
  for entry in ranking.iter().take(limit) {
    sink.write_entry(entry)?;
    written += 1;
  }
  sink.flush()?;
  Ok(written)
}

/// Writes one `word - count` line per entry
#[derive(Debug)]
pub struct LineSink<W> {
  writer: W,
}

impl<W: Write + Send> LineSink<W> {
  pub fn new(writer: W) -> Self {
    Self { writer }
  }

  pub fn into_inner(self) -> W {
    self.writer
  }
}

impl LineSink<io::Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write + Send> RankingSink for LineSink<W> {
  fn write_entry(&mut self, entry: &RankedEntry) -> io::Result<()> {
    writeln!(self.writer, "{}", entry)
  }

  fn flush(&mut self) -> io::Result<()> {
    self.writer.flush()
  }
}

/// Collects lines in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
  lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Lines written so far
  pub fn lines(&self) -> Vec<String> {
    self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }
}

impl RankingSink for MemorySink {
  fn write_entry(&mut self, entry: &RankedEntry) -> io::Result<()> {
    self
      .lines
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(entry.to_string());
    Ok(())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}
