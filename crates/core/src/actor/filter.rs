//! FilterActor - drops stop words, forwards everything else

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info, trace};

use super::{
  handle::AggregatorHandle,
  message::{Control, FilterMessage},
  runtime::{Actor, ActorError, Context, Flow, MessageKind},
};
use crate::text::StopWords;

#[derive(Debug)]
struct Loaded {
  stop_words: StopWords,
  downstream: AggregatorHandle,
}

/// The stop-word filter actor
///
/// The stop-word set is built once on `Init` and never changes afterwards.
#[derive(Debug)]
pub struct FilterActor {
  path: PathBuf,
  loaded: Option<Loaded>,
  accepted: u64,
  rejected: u64,
}

impl FilterActor {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      loaded: None,
      accepted: 0,
      rejected: 0,
    }
  }

  fn loaded(&self) -> Result<&Loaded, ActorError> {
    self.loaded.as_ref().ok_or(ActorError::NotInitialized(Self::NAME))
  }

  async fn init(&mut self, downstream: AggregatorHandle) -> Result<(), ActorError> {
    let stop_words = StopWords::load(&self.path).await?;
    info!(path = %self.path.display(), stop_words = stop_words.len(), "Stop words loaded");
    self.loaded = Some(Loaded { stop_words, downstream });
    Ok(())
  }

  async fn filter(&mut self, word: String) -> Result<(), ActorError> {
    let loaded = self.loaded.as_ref().ok_or(ActorError::NotInitialized(Self::NAME))?;
    if loaded.stop_words.contains(&word) {
      self.rejected += 1;
      return Ok(());
    }
    loaded.downstream.count(word).await?;
    self.accepted += 1;
    Ok(())
  }

  async fn forward(&self, control: Control) -> Result<(), ActorError> {
    if matches!(control, Control::Shutdown) {
      debug!(accepted = self.accepted, rejected = self.rejected, "Filter shutting down");
    }
    trace!(?control, "Forwarding control message to aggregator");
    self.loaded()?.downstream.forward(control).await?;
    Ok(())
  }
}

#[async_trait]
impl Actor for FilterActor {
  type Message = FilterMessage;

  const NAME: &'static str = "filter";
  const REQUIRES_INIT: bool = true;

  fn classify(msg: &FilterMessage) -> MessageKind {
    match msg {
      FilterMessage::Init { .. } => MessageKind::Init,
      FilterMessage::Filter { .. } => MessageKind::Work,
      FilterMessage::Control(control) => control.kind(),
    }
  }

  async fn handle(&mut self, msg: FilterMessage, _ctx: &Context<FilterMessage>) -> Result<Flow, ActorError> {
    match msg {
      FilterMessage::Init { downstream } => self.init(downstream).await?,
      FilterMessage::Filter { word } => self.filter(word).await?,
      FilterMessage::Control(control) => self.forward(control).await?,
    }
    Ok(Flow::Continue)
  }
}
