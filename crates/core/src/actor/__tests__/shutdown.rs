//! Shutdown cascade and control forwarding, with a stand-in controller.

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use tokio_util::sync::CancellationToken;

  use crate::{
    actor::{
      __tests__::helpers::{PipelineTestContext, RUN_TIMEOUT, fake_controller, join},
      aggregator::AggregatorActor,
      filter::FilterActor,
      handle::{AggregatorHandle, FilterHandle, SourceHandle},
      mailbox::Mailbox,
      message::{Control, ControllerMessage},
      runtime::{ActorState, ActorTask, ExitReason, spawn},
      source::DataSourceActor,
    },
    ranking::RankedEntry,
  };

  struct Chain {
    source: SourceHandle,
    filter: FilterHandle,
    tasks: Vec<ActorTask>,
  }

  /// Spawn DataSource → Filter → Aggregator and send both inits.
  async fn wire(ctx: &PipelineTestContext, cancel: &CancellationToken) -> Chain {
    let (aggregator, aggregator_task) = spawn(AggregatorActor::new(), 2, cancel.clone());
    let (filter, filter_task) = spawn(FilterActor::new(ctx.stop_words.clone()), 2, cancel.clone());
    let (source, source_task) = spawn(DataSourceActor::new(ctx.input.clone()), 2, cancel.clone());

    let aggregator = AggregatorHandle::new(aggregator);
    let filter = FilterHandle::new(filter);
    let source = SourceHandle::new(source);

    filter.init(aggregator).await.unwrap();
    source.init(filter.clone()).await.unwrap();

    Chain {
      source,
      filter,
      tasks: vec![source_task, filter_task, aggregator_task],
    }
  }

  async fn recv_ranking(mailbox: &mut Mailbox<ControllerMessage>) -> Vec<RankedEntry> {
    let msg = tokio::time::timeout(RUN_TIMEOUT, mailbox.recv())
      .await
      .expect("ranking should arrive")
      .expect("controller mailbox open");
    match msg {
      ControllerMessage::RankedResult { ranking } => ranking,
      other => panic!("expected RankedResult, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_shutdown_from_source_reaches_every_actor() {
    let ctx = PipelineTestContext::new("the", "the end");
    let cancel = CancellationToken::new();
    let Chain { source, filter, tasks } = wire(&ctx, &cancel).await;
    drop(filter);

    let states: Vec<_> = tasks.iter().map(|t| (t.actor(), t.subscribe())).collect();

    source.shutdown().await.unwrap();

    let mut exits = Vec::new();
    for task in tasks {
      exits.push(join(task).await.expect("clean shutdown"));
    }

    let summary: Vec<_> = exits.iter().map(|e| (e.actor, e.processed, e.reason)).collect();
    assert_eq!(
      summary,
      vec![
        // Init + Shutdown
        ("data_source", 2, ExitReason::Shutdown),
        ("filter", 2, ExitReason::Shutdown),
        // Shutdown only
        ("aggregator", 1, ExitReason::Shutdown),
      ]
    );
    for (actor, state) in states {
      assert_eq!(*state.borrow(), ActorState::Terminated, "{} not terminated", actor);
    }
    assert!(!cancel.is_cancelled());
  }

  #[tokio::test]
  async fn test_rank_request_is_answered_to_requester() {
    let ctx = PipelineTestContext::new("a", "b a b c b");
    let cancel = CancellationToken::new();
    let Chain { source, filter, tasks } = wire(&ctx, &cancel).await;
    drop(filter);
    let (requester, mut controller_mailbox) = fake_controller(1);

    source.produce_words(requester).await.unwrap();
    let ranking = recv_ranking(&mut controller_mailbox).await;

    assert_eq!(ranking, vec![RankedEntry::new("b", 3), RankedEntry::new("c", 1)]);

    source.shutdown().await.unwrap();
    for task in tasks {
      assert_eq!(join(task).await.unwrap().reason, ExitReason::Shutdown);
    }
  }

  #[tokio::test]
  async fn test_filter_forwards_rank_without_words() {
    let ctx = PipelineTestContext::new("", "unused");
    let cancel = CancellationToken::new();
    let Chain { source, filter, tasks } = wire(&ctx, &cancel).await;
    let (requester, mut controller_mailbox) = fake_controller(1);

    filter.forward(Control::Rank { requester }).await.unwrap();
    let ranking = recv_ranking(&mut controller_mailbox).await;
    assert!(ranking.is_empty());

    drop(filter);
    source.shutdown().await.unwrap();
    for task in tasks {
      join(task).await.unwrap();
    }
  }

  #[tokio::test]
  async fn test_cancel_stops_chain_without_shutdown_message() {
    let ctx = PipelineTestContext::new("", "words");
    let cancel = CancellationToken::new();
    let Chain { source, filter, tasks } = wire(&ctx, &cancel).await;

    cancel.cancel();
    for task in tasks {
      let exit = join(task).await.unwrap();
      assert_eq!(exit.reason, ExitReason::Cancelled, "{} should be cancelled", exit.actor);
    }
    assert!(source.shutdown().await.is_err());
    assert!(filter.filter("late".to_string()).await.is_err());
  }
}
