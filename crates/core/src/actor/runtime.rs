//! Actor trait and processing loop
//!
//! [`spawn`] creates a mailbox, moves the actor into its own task and returns
//! the actor's [`Address`] plus an [`ActorTask`] to observe and join it.
//!
//! The loop handles exactly one message at a time. Each message is first
//! classified by the actor ([`MessageKind`]) so the loop can enforce the
//! lifecycle:
//!
//! ```text
//! Created → Initialized → Running → ShuttingDown → Terminated
//! ```
//!
//! A `Shutdown` message (or a handler returning [`Flow::Stop`]) ends the loop:
//! the mailbox is closed, anything still buffered is discarded with a warning,
//! and the actor is dropped, releasing its outbound addresses.
//!
//! A handler error cancels the shared [`CancellationToken`], so every other
//! actor in the run stops at its next receive.

use async_trait::async_trait;
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use super::mailbox::{self, Address, Mailbox, SendError};
use crate::text::LoadError;

// ============================================================================
// Actor trait
// ============================================================================

/// How the loop treats a message before dispatching it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
  /// Carries peer references; must arrive exactly once, before any work
  Init,
  /// Steady-state message
  Work,
  /// Last message the actor will ever process
  Shutdown,
}

/// What the loop should do after a handler returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
  Continue,
  /// Close the mailbox and terminate, as if a shutdown had been received
  Stop,
}

/// An isolated unit of state served by a single-consumer mailbox
#[async_trait]
pub trait Actor: Send + 'static {
  type Message: Send + 'static;

  /// Name used in logs and errors
  const NAME: &'static str;

  /// Whether the actor needs an `Init` message before it can do any work.
  /// Actors fully configured at construction start out `Initialized`.
  const REQUIRES_INIT: bool = false;

  /// Explicit per-message policy used by the loop
  fn classify(msg: &Self::Message) -> MessageKind;

  async fn handle(&mut self, msg: Self::Message, ctx: &Context<Self::Message>) -> Result<Flow, ActorError>;
}

/// Per-actor context passed to every handler invocation
#[derive(Debug)]
pub struct Context<M> {
  myself: Address<M>,
}

impl<M> Context<M> {
  /// The actor's own address, to hand out as a reply target
  pub fn address(&self) -> Address<M> {
    self.myself.clone()
  }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Lifecycle state of an actor. `Terminated` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
  Created,
  Initialized,
  Running,
  ShuttingDown,
  Terminated,
}

impl ActorState {
  /// Whether `self → next` is a legal transition.
  ///
  /// Any live state may jump straight to `Terminated` when the run is
  /// cancelled or a handler fails.
  pub fn can_advance_to(self, next: ActorState) -> bool {
    use ActorState::*;
    matches!(
      (self, next),
      (Created, Initialized)
        | (Initialized, Running)
        | (Initialized | Running, ShuttingDown)
        | (Created | Initialized | Running | ShuttingDown, Terminated)
    )
  }

  pub fn is_terminated(self) -> bool {
    self == ActorState::Terminated
  }
}

/// Tracks the state of one actor and publishes every transition
struct Lifecycle {
  actor: &'static str,
  state: ActorState,
  tx: watch::Sender<ActorState>,
}

impl Lifecycle {
  fn new(actor: &'static str, tx: watch::Sender<ActorState>) -> Self {
    Self {
      actor,
      state: ActorState::Created,
      tx,
    }
  }

  fn advance(&mut self, next: ActorState) {
    debug_assert!(
      self.state.can_advance_to(next),
      "{}: illegal transition {:?} -> {:?}",
      self.actor,
      self.state,
      next
    );
    trace!(actor = self.actor, from = ?self.state, to = ?next, "State transition");
    self.state = next;
    self.tx.send_replace(next);
  }

  /// Check a message against the current state before it is dispatched
  fn admit(&mut self, kind: MessageKind) -> Result<(), ActorError> {
    match (kind, self.state) {
      (MessageKind::Init, ActorState::Created) => Ok(()),
      (MessageKind::Init, _) => Err(ActorError::Protocol {
        actor: self.actor,
        reason: "init received more than once".to_string(),
      }),
      (_, ActorState::Created) => Err(ActorError::NotInitialized(self.actor)),
      (MessageKind::Work, ActorState::Initialized) => {
        self.advance(ActorState::Running);
        Ok(())
      }
      (MessageKind::Work, _) => Ok(()),
      (MessageKind::Shutdown, _) => {
        self.advance(ActorState::ShuttingDown);
        Ok(())
      }
    }
  }
}

// ============================================================================
// Spawning and the processing loop
// ============================================================================

/// Why an actor loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
  /// Processed its shutdown message (or stopped itself)
  Shutdown,
  /// The run was aborted through the cancellation token
  Cancelled,
}

/// Final report of an actor that ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorExit {
  pub actor: &'static str,
  /// Messages dispatched to the handler
  pub processed: u64,
  pub reason: ExitReason,
}

/// A running actor: observe its state or wait for it to end
#[derive(Debug)]
pub struct ActorTask {
  actor: &'static str,
  state: watch::Receiver<ActorState>,
  join: JoinHandle<Result<ActorExit, ActorError>>,
}

impl ActorTask {
  pub fn actor(&self) -> &'static str {
    self.actor
  }

  /// Current lifecycle state
  pub fn state(&self) -> ActorState {
    *self.state.borrow()
  }

  /// Receiver that is notified on every state transition
  pub fn subscribe(&self) -> watch::Receiver<ActorState> {
    self.state.clone()
  }

  /// Wait for the actor loop to end
  pub async fn join(self) -> Result<ActorExit, ActorError> {
    match self.join.await {
      Ok(result) => result,
      Err(e) => Err(ActorError::Join {
        actor: self.actor,
        source: e,
      }),
    }
  }
}

/// Spawn `actor` on its own task with a mailbox of `capacity` messages.
///
/// `capacity` must be at least 1.
pub fn spawn<A: Actor>(actor: A, capacity: usize, cancel: CancellationToken) -> (Address<A::Message>, ActorTask) {
  let (address, mailbox) = mailbox::channel(A::NAME, capacity);
  let (state_tx, state_rx) = watch::channel(ActorState::Created);
  let ctx = Context {
    myself: address.clone(),
  };
  let lifecycle = Lifecycle::new(A::NAME, state_tx);

  let join = tokio::spawn(run(actor, mailbox, ctx, lifecycle, cancel));

  let task = ActorTask {
    actor: A::NAME,
    state: state_rx,
    join,
  };
  (address, task)
}

/// Actor task body
async fn run<A: Actor>(
  mut actor: A,
  mut mailbox: Mailbox<A::Message>,
  ctx: Context<A::Message>,
  mut lifecycle: Lifecycle,
  cancel: CancellationToken,
) -> Result<ActorExit, ActorError> {
  info!(actor = A::NAME, "Actor started");
  if !A::REQUIRES_INIT {
    lifecycle.advance(ActorState::Initialized);
  }

  let mut processed = 0;
  let outcome = match process(&mut actor, &mut mailbox, &ctx, &mut lifecycle, &cancel, &mut processed).await {
    Err(e) if cancel.is_cancelled() => {
      // Another actor failed first; this error is only a consequence
      debug!(actor = A::NAME, error = %e, "Actor stopped after cancellation");
      Ok(ExitReason::Cancelled)
    }
    Err(e) => {
      // Peers that find this mailbox closed must already see the cancellation
      error!(actor = A::NAME, error = %e, "Actor failed, cancelling run");
      cancel.cancel();
      Err(e)
    }
    ok => ok,
  };

  mailbox.close();
  let late = mailbox.drain();
  if late > 0 {
    warn!(actor = mailbox.actor(), late, "Discarded messages sent after shutdown");
  }

  // Outbound addresses go away with the actor, after its last send completed
  drop(actor);
  drop(ctx);
  lifecycle.advance(ActorState::Terminated);

  let reason = outcome?;
  info!(actor = A::NAME, processed, ?reason, "Actor stopped");
  Ok(ActorExit {
    actor: A::NAME,
    processed,
    reason,
  })
}

/// Receive and dispatch until shutdown, cancellation or a handler error
async fn process<A: Actor>(
  actor: &mut A,
  mailbox: &mut Mailbox<A::Message>,
  ctx: &Context<A::Message>,
  lifecycle: &mut Lifecycle,
  cancel: &CancellationToken,
  processed: &mut u64,
) -> Result<ExitReason, ActorError> {
  loop {
    let msg = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(actor = A::NAME, "Actor cancelled");
            return Ok(ExitReason::Cancelled);
        }
        msg = mailbox.recv() => msg,
    };

    // The context holds an address, so the mailbox only ends once closed
    let Some(msg) = msg else {
      return Ok(ExitReason::Cancelled);
    };

    let kind = A::classify(&msg);
    lifecycle.admit(kind)?;
    *processed += 1;

    let flow = actor.handle(msg, ctx).await?;

    match (kind, flow) {
      (MessageKind::Init, _) => lifecycle.advance(ActorState::Initialized),
      (MessageKind::Shutdown, _) => return Ok(ExitReason::Shutdown),
      (MessageKind::Work, Flow::Stop) => {
        lifecycle.advance(ActorState::ShuttingDown);
        return Ok(ExitReason::Shutdown);
      }
      (MessageKind::Work, Flow::Continue) => {}
    }
  }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised inside an actor loop. Every one of them is fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
  #[error(transparent)]
  Send(#[from] SendError),
  #[error(transparent)]
  Load(#[from] LoadError),
  #[error("output error: {0}")]
  Output(#[from] std::io::Error),
  #[error("{0} received work before init")]
  NotInitialized(&'static str),
  #[error("{actor}: protocol violation: {reason}")]
  Protocol { actor: &'static str, reason: String },
  #[error("{actor} task failed: {source}")]
  Join {
    actor: &'static str,
    #[source]
    source: tokio::task::JoinError,
  },
}
