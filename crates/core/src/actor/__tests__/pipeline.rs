//! End-to-end pipeline tests through `run_pipeline`.

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use tokio_util::sync::CancellationToken;

  use crate::{
    actor::{
      __tests__::helpers::PipelineTestContext,
      pipeline::{PipelineError, PipelinePaths},
      runtime::{ActorError, ExitReason},
    },
    config::{DEFAULT_MAILBOX_CAPACITY, MAX_TOP_N},
  };

  const TOP_N: usize = 25;

  fn words(n: usize) -> String {
    // "wa wb ... " with word i repeated i+1 times, so counts are all distinct
    let mut text = String::new();
    for i in 0..n {
      let word = format!("w{}{}", (b'a' + (i / 26) as u8) as char, (b'a' + (i % 26) as u8) as char);
      for _ in 0..=i {
        text.push_str(&word);
        text.push(' ');
      }
    }
    text
  }

  // ==========================================================================
  // Happy path
  // ==========================================================================

  #[tokio::test]
  async fn test_counts_words_and_skips_stop_words() {
    let ctx = PipelineTestContext::new("the,a,of", "The cat sat on the mat of a cat");

    let (result, lines) = ctx.run(DEFAULT_MAILBOX_CAPACITY, TOP_N).await;
    let report = result.expect("pipeline should succeed");

    assert_eq!(lines, vec!["cat - 2", "mat - 1", "on - 1", "sat - 1"]);
    assert_eq!(report.summary.distinct_words, 4);
    assert_eq!(report.summary.lines_written, 4);
    assert_eq!(report.exits.len(), 4);
    for exit in &report.exits {
      assert_eq!(exit.reason, ExitReason::Shutdown, "{} did not shut down cleanly", exit.actor);
    }
  }

  #[tokio::test]
  async fn test_punctuation_and_case_are_normalized() {
    let ctx = PipelineTestContext::new("and", "Hello, hello! HELLO... world-and_World 42");

    let (result, lines) = ctx.run(DEFAULT_MAILBOX_CAPACITY, TOP_N).await;
    result.unwrap();

    assert_eq!(lines, vec!["hello - 3", "world - 2"]);
  }

  /// Output must not depend on how much buffering the mailboxes allow.
  #[tokio::test]
  async fn test_output_identical_across_capacities() {
    let ctx = PipelineTestContext::new("the,and,of", &format!("{} the and of {}", words(30), words(5)));

    let (baseline, expected) = ctx.run(DEFAULT_MAILBOX_CAPACITY, TOP_N).await;
    baseline.unwrap();
    assert_eq!(expected.len(), TOP_N);

    for capacity in [1, 2, 3, 7] {
      let (result, lines) = ctx.run(capacity, TOP_N).await;
      result.unwrap_or_else(|e| panic!("capacity {} failed: {}", capacity, e));
      assert_eq!(lines, expected, "capacity {} changed the output", capacity);
    }
  }

  #[tokio::test]
  async fn test_word_order_does_not_change_ranking() {
    let a = PipelineTestContext::new("x", "pear apple pear fig apple pear x");
    let b = PipelineTestContext::new("x", "x apple pear fig pear apple pear");

    let (ra, la) = a.run(2, TOP_N).await;
    let (rb, lb) = b.run(2, TOP_N).await;
    ra.unwrap();
    rb.unwrap();

    assert_eq!(la, vec!["pear - 3", "apple - 2", "fig - 1"]);
    assert_eq!(la, lb);
  }

  // ==========================================================================
  // Output size
  // ==========================================================================

  #[tokio::test]
  async fn test_no_accepted_words_writes_nothing() {
    let ctx = PipelineTestContext::new("only,stop,words", "Only stop words, only STOP words.");

    let (result, lines) = ctx.run(DEFAULT_MAILBOX_CAPACITY, TOP_N).await;
    let report = result.unwrap();

    assert!(lines.is_empty());
    assert_eq!(report.summary.distinct_words, 0);
    assert_eq!(report.summary.lines_written, 0);
  }

  #[tokio::test]
  async fn test_empty_input_writes_nothing() {
    let ctx = PipelineTestContext::new("the", "");

    let (result, lines) = ctx.run(1, TOP_N).await;
    result.unwrap();
    assert!(lines.is_empty());
  }

  #[tokio::test]
  async fn test_fewer_distinct_words_than_limit() {
    let ctx = PipelineTestContext::new("", &words(10));

    let (result, lines) = ctx.run(DEFAULT_MAILBOX_CAPACITY, TOP_N).await;
    result.unwrap();

    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "waj - 10");
    assert_eq!(lines[9], "waa - 1");
  }

  #[tokio::test]
  async fn test_more_distinct_words_than_limit_is_truncated() {
    let ctx = PipelineTestContext::new("", &words(40));

    let (result, lines) = ctx.run(DEFAULT_MAILBOX_CAPACITY, TOP_N).await;
    let report = result.unwrap();

    assert_eq!(report.summary.distinct_words, 40);
    assert_eq!(lines.len(), TOP_N);
    assert_eq!(lines[0], "wbn - 40");
    assert_eq!(lines[24], "wap - 16");
  }

  #[tokio::test]
  async fn test_top_n_is_configurable() {
    let ctx = PipelineTestContext::new("", &words(10));

    let (result, lines) = ctx.run(DEFAULT_MAILBOX_CAPACITY, 3).await;
    result.unwrap();

    assert_eq!(lines, vec!["waj - 10", "wai - 9", "wah - 8"]);
  }

  #[tokio::test]
  async fn test_top_n_above_limit_is_capped() {
    let ctx = PipelineTestContext::new("", &words(40));

    let (result, lines) = ctx.run(4, 40).await;
    let report = result.unwrap();

    assert_eq!(lines.len(), MAX_TOP_N);
    assert_eq!(report.summary.lines_written, MAX_TOP_N);
    assert_eq!(lines[0], "wbn - 40");
  }

  #[tokio::test]
  async fn test_ties_are_broken_alphabetically() {
    let ctx = PipelineTestContext::new("", "delta alpha charlie bravo alpha delta");

    let (result, lines) = ctx.run(1, TOP_N).await;
    result.unwrap();

    assert_eq!(lines, vec!["alpha - 2", "delta - 2", "bravo - 1", "charlie - 1"]);
  }

  // ==========================================================================
  // Failures
  // ==========================================================================

  #[tokio::test]
  async fn test_missing_input_fails_in_data_source() {
    let ctx = PipelineTestContext::new("the", "unused");
    let paths = PipelinePaths {
      stop_words: ctx.stop_words.clone(),
      input: ctx.missing("nope.txt"),
    };

    let (result, lines) = ctx.run_with(paths, 4, TOP_N, CancellationToken::new()).await;

    match result {
      Err(PipelineError::Actor {
        actor: "data_source",
        source: ActorError::Load(_),
      }) => {}
      other => panic!("expected data_source load error, got {:?}", other),
    }
    assert!(lines.is_empty());
  }

  #[tokio::test]
  async fn test_missing_stop_words_fails_in_filter() {
    let ctx = PipelineTestContext::new("unused", "some words here");
    let paths = PipelinePaths {
      stop_words: ctx.missing("nope.txt"),
      input: ctx.input.clone(),
    };

    let (result, lines) = ctx.run_with(paths, 1, TOP_N, CancellationToken::new()).await;

    match result {
      Err(PipelineError::Actor {
        actor: "filter",
        source: ActorError::Load(_),
      }) => {}
      other => panic!("expected filter load error, got {:?}", other),
    }
    assert!(lines.is_empty());
  }

  #[tokio::test]
  async fn test_cancelled_before_start_reports_cancelled() {
    let ctx = PipelineTestContext::new("the", "the cat sat");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let (result, lines) = ctx.run_with(ctx.paths(), 4, TOP_N, cancel).await;

    assert!(matches!(result, Err(PipelineError::Cancelled)), "got {:?}", result);
    assert!(lines.is_empty());
  }
}
