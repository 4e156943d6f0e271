//! Message types for the word frequency pipeline
//!
//! Every actor has its own message enum, so a payload of the wrong shape can
//! not be sent at all.
//!
//! ```text
//! Controller ─Run/ProduceWords─▶ DataSource ─Filter─▶ Filter ─Count─▶ Aggregator
//!     ▲                                                                   │
//!     └────────────────────────── RankedResult ───────────────────────────┘
//! ```
//!
//! ## Forwarding policy
//!
//! [`Control`] messages travel the chain unchanged. DataSource and Filter
//! forward every `Control` message to their downstream; the Aggregator is
//! terminal and answers `Rank` itself. Adding a message kind means adding a
//! variant here, so nothing is swallowed silently.

use super::{
  handle::{AggregatorHandle, ControllerHandle, FilterHandle, SourceHandle},
  runtime::MessageKind,
};
use crate::ranking::RankedEntry;

// ============================================================================
// Control Messages
// ============================================================================

/// Messages forwarded verbatim along the chain until they reach the
/// Aggregator
#[derive(Debug)]
pub enum Control {
  /// Ask for the full ranking; the answer goes straight to `requester`
  Rank { requester: ControllerHandle },
  /// Last message an actor processes; forwarded before the actor closes
  Shutdown,
}

impl Control {
  pub fn kind(&self) -> MessageKind {
    match self {
      Control::Rank { .. } => MessageKind::Work,
      Control::Shutdown => MessageKind::Shutdown,
    }
  }
}

// ============================================================================
// DataSource Messages
// ============================================================================

#[derive(Debug)]
pub enum SourceMessage {
  /// Load the input text and connect to the Filter
  Init { downstream: FilterHandle },
  /// Stream every word downstream, then request the ranking for `requester`
  ProduceWords { requester: ControllerHandle },
  Control(Control),
}

// ============================================================================
// Filter Messages
// ============================================================================

#[derive(Debug)]
pub enum FilterMessage {
  /// Load the stop words and connect to the Aggregator
  Init { downstream: AggregatorHandle },
  /// A normalized word to check against the stop-word set
  Filter { word: String },
  Control(Control),
}

// ============================================================================
// Aggregator Messages
// ============================================================================

#[derive(Debug)]
pub enum AggregatorMessage {
  /// An accepted word to count
  Count { word: String },
  Control(Control),
}

// ============================================================================
// Controller Messages
// ============================================================================

#[derive(Debug)]
pub enum ControllerMessage {
  /// Start the run against the given DataSource
  Run { source: SourceHandle },
  /// Full ranking, highest count first
  RankedResult { ranking: Vec<RankedEntry> },
}

/// Summary reported by the Controller once the ranking has been written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
  /// Distinct accepted words in the ranking
  pub distinct_words: usize,
  /// Lines written to the output sink
  pub lines_written: usize,
}

