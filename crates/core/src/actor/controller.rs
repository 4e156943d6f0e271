//! ControllerActor - drives a run and writes the result
//!
//! `Run` hands the controller its DataSource and kicks off word production
//! with the controller's own address as requester. When the ranking arrives
//! it is written to the sink, shutdown is sent into the chain, and the
//! controller stops without waiting for the cascade to finish. Joining the
//! other actors is the pipeline driver's job.

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::{debug, info};

use super::{
  handle::{ControllerHandle, SourceHandle},
  message::{ControllerMessage, RunSummary},
  runtime::{Actor, ActorError, Context, Flow, MessageKind},
};
use crate::{
  config::MAX_TOP_N,
  output::{RankingSink, write_ranking},
  ranking::RankedEntry,
};

pub struct ControllerActor {
  sink: Box<dyn RankingSink>,
  top_n: usize,
  source: Option<SourceHandle>,
  summary: Option<oneshot::Sender<RunSummary>>,
}

impl ControllerActor {
  /// Create a controller that writes at most `top_n` lines to `sink`,
  /// never more than [`MAX_TOP_N`]
  pub fn new(sink: Box<dyn RankingSink>, top_n: usize) -> Self {
    Self {
      sink,
      top_n: top_n.min(MAX_TOP_N),
      source: None,
      summary: None,
    }
  }

  /// Report a [`RunSummary`] on `tx` once the ranking has been written
  pub fn report_to(mut self, tx: oneshot::Sender<RunSummary>) -> Self {
    self.summary = Some(tx);
    self
  }

  async fn run(&mut self, source: SourceHandle, requester: ControllerHandle) -> Result<(), ActorError> {
    debug!("Requesting word production");
    source.produce_words(requester).await?;
    self.source = Some(source);
    Ok(())
  }

  async fn display(&mut self, ranking: Vec<RankedEntry>) -> Result<(), ActorError> {
    let lines_written = write_ranking(self.sink.as_mut(), &ranking, self.top_n)?;
    let summary = RunSummary {
      distinct_words: ranking.len(),
      lines_written,
    };
    info!(
      distinct_words = summary.distinct_words,
      lines_written = summary.lines_written,
      "Ranking written"
    );

    if let Some(tx) = self.summary.take() {
      let _ = tx.send(summary);
    }

    let source = self.source.as_ref().ok_or(ActorError::NotInitialized(Self::NAME))?;
    source.shutdown().await?;
    Ok(())
  }
}

#[async_trait]
impl Actor for ControllerActor {
  type Message = ControllerMessage;

  const NAME: &'static str = "controller";
  const REQUIRES_INIT: bool = true;

  fn classify(msg: &ControllerMessage) -> MessageKind {
    match msg {
      ControllerMessage::Run { .. } => MessageKind::Init,
      ControllerMessage::RankedResult { .. } => MessageKind::Work,
    }
  }

  async fn handle(&mut self, msg: ControllerMessage, ctx: &Context<ControllerMessage>) -> Result<Flow, ActorError> {
    match msg {
      ControllerMessage::Run { source } => {
        self.run(source, ControllerHandle::new(ctx.address())).await?;
        Ok(Flow::Continue)
      }
      ControllerMessage::RankedResult { ranking } => {
        self.display(ranking).await?;
        Ok(Flow::Stop)
      }
    }
  }
}
