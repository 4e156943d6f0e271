//! Word frequency pipeline driver
//!
//! Spawns the four actors, wires them together, starts the run and joins
//! every actor before returning:
//!
//! ```text
//! Controller → DataSource → Filter → Aggregator
//!     ▲                                   │
//!     └────────── ranked result ──────────┘
//! ```
//!
//! Every mailbox has the same fixed capacity. The topology is an acyclic
//! chain, and the Controller mailbox is idle while it waits for the result,
//! so the run cannot deadlock for any capacity of at least 1.

use std::path::PathBuf;

use futures::future::join_all;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{
  aggregator::AggregatorActor,
  controller::ControllerActor,
  filter::FilterActor,
  handle::{AggregatorHandle, ControllerHandle, FilterHandle, SourceHandle},
  message::RunSummary,
  runtime::{ActorError, ActorExit, ActorTask, spawn},
  source::DataSourceActor,
};
use crate::{config::PipelineConfig, output::RankingSink};

/// Input files for a run
#[derive(Debug, Clone)]
pub struct PipelinePaths {
  pub stop_words: PathBuf,
  pub input: PathBuf,
}

/// Result of a completed run
#[derive(Debug)]
pub struct PipelineReport {
  pub summary: RunSummary,
  /// One entry per actor, in join order
  pub exits: Vec<ActorExit>,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
  #[error("{actor} failed: {source}")]
  Actor {
    actor: &'static str,
    #[source]
    source: ActorError,
  },
  #[error("pipeline cancelled before the ranking was written")]
  Cancelled,
}

/// Run the word frequency pipeline.
///
/// Returns once every actor has terminated. An actor error aborts the whole
/// run through a child of `cancel`; cancelling `cancel` itself aborts it
/// from outside.
pub async fn run_pipeline(
  config: &PipelineConfig,
  paths: PipelinePaths,
  sink: Box<dyn RankingSink>,
  cancel: CancellationToken,
) -> Result<PipelineReport, PipelineError> {
  let capacity = config.mailbox_capacity;
  debug!(
    capacity,
    top_n = config.top_n,
    stop_words = %paths.stop_words.display(),
    input = %paths.input.display(),
    "Starting word frequency pipeline"
  );

  // Shared by every actor in this run; an actor failure cancels it
  let run_cancel = cancel.child_token();
  let (summary_tx, summary_rx) = oneshot::channel();

  let (aggregator_address, aggregator_task) = spawn(AggregatorActor::new(), capacity, run_cancel.clone());
  let (filter_address, filter_task) = spawn(FilterActor::new(paths.stop_words), capacity, run_cancel.clone());
  let (source_address, source_task) = spawn(DataSourceActor::new(paths.input), capacity, run_cancel.clone());
  let controller = ControllerActor::new(sink, config.top_n).report_to(summary_tx);
  let (controller_address, controller_task) = spawn(controller, capacity, run_cancel.clone());

  let aggregator = AggregatorHandle::new(aggregator_address);
  let filter = FilterHandle::new(filter_address);
  let source = SourceHandle::new(source_address);
  let controller = ControllerHandle::new(controller_address);

  // The handles move into the init messages; the driver keeps none of them
  let wiring = async move {
    filter.init(aggregator).await?;
    source.init(filter).await?;
    controller.run(source).await
  };
  if let Err(e) = wiring.await {
    // The failing actor reports the cause when joined
    debug!(error = %e, "Actor stopped before wiring completed");
  }

  let tasks = vec![controller_task, source_task, filter_task, aggregator_task];
  let results = join_all(tasks.into_iter().map(|task| {
    let actor = task.actor();
    async move { (actor, task.join().await) }
  }))
  .await;

  let mut exits = Vec::with_capacity(results.len());
  let mut failure = None;
  for (actor, result) in results {
    match result {
      Ok(exit) => exits.push(exit),
      Err(source) => {
        failure.get_or_insert(PipelineError::Actor { actor, source });
      }
    }
  }
  if let Some(e) = failure {
    return Err(e);
  }

  // The controller drops the sender without reporting only when cancelled
  let summary = summary_rx.await.map_err(|_| PipelineError::Cancelled)?;

  info!(
    distinct_words = summary.distinct_words,
    lines_written = summary.lines_written,
    "Pipeline complete"
  );

  Ok(PipelineReport { summary, exits })
}
