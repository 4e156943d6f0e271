//! AggregatorActor - owns the frequency table
//!
//! Terminal actor: it answers `Rank` itself and has nothing to forward to.

use async_trait::async_trait;
use tracing::debug;

use super::{
  handle::ControllerHandle,
  message::{AggregatorMessage, Control},
  runtime::{Actor, ActorError, Context, Flow, MessageKind},
};
use crate::ranking::FrequencyTable;

#[derive(Debug, Default)]
pub struct AggregatorActor {
  table: FrequencyTable,
}

impl AggregatorActor {
  pub fn new() -> Self {
    Self::default()
  }

  async fn rank(&self, requester: ControllerHandle) -> Result<(), ActorError> {
    let ranking = self.table.ranked();
    debug!(distinct_words = ranking.len(), "Sending ranking to requester");
    requester.deliver(ranking).await?;
    Ok(())
  }
}

#[async_trait]
impl Actor for AggregatorActor {
  type Message = AggregatorMessage;

  const NAME: &'static str = "aggregator";

  fn classify(msg: &AggregatorMessage) -> MessageKind {
    match msg {
      AggregatorMessage::Count { .. } => MessageKind::Work,
      AggregatorMessage::Control(control) => control.kind(),
    }
  }

  async fn handle(&mut self, msg: AggregatorMessage, _ctx: &Context<AggregatorMessage>) -> Result<Flow, ActorError> {
    match msg {
      AggregatorMessage::Count { word } => self.table.increment(word),
      AggregatorMessage::Control(Control::Rank { requester }) => self.rank(requester).await?,
      AggregatorMessage::Control(Control::Shutdown) => {
        debug!(distinct_words = self.table.len(), "Aggregator shutting down");
      }
    }
    Ok(Flow::Continue)
  }
}
