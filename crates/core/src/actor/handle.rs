//! Actor handles for communicating with actors
//!
//! Handles are cheap to clone and wrap the actor's [`Address`] with methods
//! named after the messages it understands. All sends wait while the target
//! mailbox is full.

use super::{
  mailbox::{Address, SendError},
  message::{AggregatorMessage, Control, ControllerMessage, FilterMessage, SourceMessage},
};
use crate::ranking::RankedEntry;

// ============================================================================
// DataSource Handle
// ============================================================================

/// Handle to communicate with a DataSourceActor
#[derive(Clone, Debug)]
pub struct SourceHandle {
  address: Address<SourceMessage>,
}

impl SourceHandle {
  pub fn new(address: Address<SourceMessage>) -> Self {
    Self { address }
  }

  pub async fn send(&self, msg: SourceMessage) -> Result<(), SendError> {
    self.address.send(msg).await
  }

  pub async fn init(&self, downstream: FilterHandle) -> Result<(), SendError> {
    self.send(SourceMessage::Init { downstream }).await
  }

  /// Start streaming words; the ranking will be delivered to `requester`
  pub async fn produce_words(&self, requester: ControllerHandle) -> Result<(), SendError> {
    self.send(SourceMessage::ProduceWords { requester }).await
  }

  /// Begin the shutdown cascade
  pub async fn shutdown(&self) -> Result<(), SendError> {
    self.send(SourceMessage::Control(Control::Shutdown)).await
  }
}

// ============================================================================
// Filter Handle
// ============================================================================

/// Handle to communicate with a FilterActor
#[derive(Clone, Debug)]
pub struct FilterHandle {
  address: Address<FilterMessage>,
}

impl FilterHandle {
  pub fn new(address: Address<FilterMessage>) -> Self {
    Self { address }
  }

  pub async fn send(&self, msg: FilterMessage) -> Result<(), SendError> {
    self.address.send(msg).await
  }

  pub async fn init(&self, downstream: AggregatorHandle) -> Result<(), SendError> {
    self.send(FilterMessage::Init { downstream }).await
  }

  pub async fn filter(&self, word: String) -> Result<(), SendError> {
    self.send(FilterMessage::Filter { word }).await
  }

  /// Pass a control message through unchanged
  pub async fn forward(&self, control: Control) -> Result<(), SendError> {
    self.send(FilterMessage::Control(control)).await
  }
}

// ============================================================================
// Aggregator Handle
// ============================================================================

/// Handle to communicate with an AggregatorActor
#[derive(Clone, Debug)]
pub struct AggregatorHandle {
  address: Address<AggregatorMessage>,
}

impl AggregatorHandle {
  pub fn new(address: Address<AggregatorMessage>) -> Self {
    Self { address }
  }

  pub async fn send(&self, msg: AggregatorMessage) -> Result<(), SendError> {
    self.address.send(msg).await
  }

  pub async fn count(&self, word: String) -> Result<(), SendError> {
    self.send(AggregatorMessage::Count { word }).await
  }

  /// Pass a control message through unchanged
  pub async fn forward(&self, control: Control) -> Result<(), SendError> {
    self.send(AggregatorMessage::Control(control)).await
  }
}

// ============================================================================
// Controller Handle
// ============================================================================

/// Handle to communicate with a ControllerActor
#[derive(Clone, Debug)]
pub struct ControllerHandle {
  address: Address<ControllerMessage>,
}

impl ControllerHandle {
  pub fn new(address: Address<ControllerMessage>) -> Self {
    Self { address }
  }

  pub async fn send(&self, msg: ControllerMessage) -> Result<(), SendError> {
    self.address.send(msg).await
  }

  /// Start the run against `source`
  pub async fn run(&self, source: SourceHandle) -> Result<(), SendError> {
    self.send(ControllerMessage::Run { source }).await
  }

  /// Deliver the final ranking
  pub async fn deliver(&self, ranking: Vec<RankedEntry>) -> Result<(), SendError> {
    self.send(ControllerMessage::RankedResult { ranking }).await
  }
}
