//! Text collaborators used by the actors
//!
//! Normalization keeps ASCII letters (lowercased) and turns every other byte
//! into a single space, so tokenizing is just splitting on whitespace.

use std::{
  collections::HashSet,
  path::{Path, PathBuf},
};

use tracing::debug;

/// Lowercase ASCII letters, replacing every other byte with a space.
///
/// The output has the same byte length as the input. Applying it twice
/// yields the same text.
pub fn normalize(data: &[u8]) -> String {
  data
    .iter()
    .map(|&b| if b.is_ascii_alphabetic() { b.to_ascii_lowercase() as char } else { ' ' })
    .collect()
}

/// Split normalized text into words, dropping empty tokens
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
  text.split_ascii_whitespace()
}

/// Read a whole file. There is no partial read: any failure is returned.
pub async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
  let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(path = %path.display(), bytes = bytes.len(), "Loaded text file");
  Ok(bytes)
}

/// Read a file and normalize it
pub async fn load_normalized(path: &Path) -> Result<String, LoadError> {
  Ok(normalize(&read_file(path).await?))
}

// ============================================================================
// Stop words
// ============================================================================

/// Immutable set of normalized stop words
#[derive(Debug, Clone, Default)]
pub struct StopWords {
  words: HashSet<String>,
}

impl StopWords {
  /// Parse a stop-word list. Any non-letter separates entries, so both
  /// comma-separated and whitespace-separated lists are accepted.
  pub fn parse(data: &[u8]) -> Self {
    let normalized = normalize(data);
    Self {
      words: tokenize(&normalized).map(str::to_owned).collect(),
    }
  }

  pub async fn load(path: &Path) -> Result<Self, LoadError> {
    Ok(Self::parse(&read_file(path).await?))
  }

  /// Exact membership test against an already-normalized word
  pub fn contains(&self, word: &str) -> bool {
    self.words.contains(word)
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }
}

/// Errors from the file-loading collaborator
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
