//! DataSourceActor - owns the normalized input text
//!
//! On `ProduceWords` it streams every token to the Filter in file order and
//! then sends a ranking request down the chain on behalf of the requester.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info, trace};

use super::{
  handle::{ControllerHandle, FilterHandle},
  message::{Control, SourceMessage},
  runtime::{Actor, ActorError, Context, Flow, MessageKind},
};
use crate::text;

/// State available once `Init` has been handled
#[derive(Debug)]
struct Loaded {
  text: String,
  downstream: FilterHandle,
}

/// The data source actor
///
/// Constructed inert with the input path; the file is read when `Init`
/// arrives, and a read failure ends the whole run.
#[derive(Debug)]
pub struct DataSourceActor {
  path: PathBuf,
  loaded: Option<Loaded>,
}

impl DataSourceActor {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      loaded: None,
    }
  }

  fn loaded(&self) -> Result<&Loaded, ActorError> {
    self.loaded.as_ref().ok_or(ActorError::NotInitialized(Self::NAME))
  }

  async fn init(&mut self, downstream: FilterHandle) -> Result<(), ActorError> {
    let text = text::load_normalized(&self.path).await?;
    info!(path = %self.path.display(), bytes = text.len(), "Input loaded");
    self.loaded = Some(Loaded { text, downstream });
    Ok(())
  }

  /// Send every word downstream, then the ranking request
  async fn produce_words(&self, requester: ControllerHandle) -> Result<(), ActorError> {
    let loaded = self.loaded()?;

    let mut sent = 0usize;
    for word in text::tokenize(&loaded.text) {
      loaded.downstream.filter(word.to_owned()).await?;
      sent += 1;
    }
    debug!(words = sent, "Streamed words to filter");

    loaded.downstream.forward(Control::Rank { requester }).await?;
    Ok(())
  }
}

#[async_trait]
impl Actor for DataSourceActor {
  type Message = SourceMessage;

  const NAME: &'static str = "data_source";
  const REQUIRES_INIT: bool = true;

  fn classify(msg: &SourceMessage) -> MessageKind {
    match msg {
      SourceMessage::Init { .. } => MessageKind::Init,
      SourceMessage::ProduceWords { .. } => MessageKind::Work,
      SourceMessage::Control(control) => control.kind(),
    }
  }

  async fn handle(&mut self, msg: SourceMessage, _ctx: &Context<SourceMessage>) -> Result<Flow, ActorError> {
    match msg {
      SourceMessage::Init { downstream } => self.init(downstream).await?,
      SourceMessage::ProduceWords { requester } => self.produce_words(requester).await?,
      SourceMessage::Control(control) => {
        trace!(?control, "Forwarding control message to filter");
        self.loaded()?.downstream.forward(control).await?;
      }
    }
    Ok(Flow::Continue)
  }
}
