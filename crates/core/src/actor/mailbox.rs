//! Bounded mailboxes
//!
//! A mailbox is a bounded `mpsc` channel with exactly one consumer (the actor
//! loop). Senders hold an [`Address`]; when the mailbox is full, `send`
//! suspends the caller until the actor makes room. Nothing is dropped and
//! nothing is reordered.

use std::fmt;

use tokio::sync::mpsc;

/// Create a mailbox for the named actor.
///
/// `capacity` must be at least 1; configuration validation enforces this
/// before any actor is spawned.
pub fn channel<M>(actor: &'static str, capacity: usize) -> (Address<M>, Mailbox<M>) {
  let (tx, rx) = mpsc::channel(capacity);
  (Address { actor, tx }, Mailbox { actor, rx })
}

// ============================================================================
// Sending side
// ============================================================================

/// Sending half of a mailbox
///
/// Cheap to clone. Every clone feeds the same single consumer.
pub struct Address<M> {
  actor: &'static str,
  tx: mpsc::Sender<M>,
}

impl<M> fmt::Debug for Address<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Address")
      .field("actor", &self.actor)
      .field("closed", &self.tx.is_closed())
      .finish()
  }
}

impl<M> Clone for Address<M> {
  fn clone(&self) -> Self {
    Self {
      actor: self.actor,
      tx: self.tx.clone(),
    }
  }
}

impl<M> Address<M> {
  /// Enqueue a message, waiting while the mailbox is at capacity
  pub async fn send(&self, msg: M) -> Result<(), SendError> {
    self.tx.send(msg).await.map_err(|_| SendError::Closed(self.actor))
  }

  /// True once the receiving actor has closed its mailbox
  pub fn is_closed(&self) -> bool {
    self.tx.is_closed()
  }
}

// ============================================================================
// Receiving side
// ============================================================================

/// Receiving half of a mailbox, owned by the actor loop
pub struct Mailbox<M> {
  actor: &'static str,
  rx: mpsc::Receiver<M>,
}

impl<M> fmt::Debug for Mailbox<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Mailbox")
      .field("actor", &self.actor)
      .field("queued", &self.rx.len())
      .finish()
  }
}

impl<M> Mailbox<M> {
  pub fn actor(&self) -> &'static str {
    self.actor
  }

  /// Wait for the next message; `None` once closed and empty
  pub async fn recv(&mut self) -> Option<M> {
    self.rx.recv().await
  }

  /// Refuse all further sends. Messages already buffered stay readable.
  pub fn close(&mut self) {
    self.rx.close();
  }

  /// Discard whatever is still buffered, returning how many messages were
  /// dropped
  pub fn drain(&mut self) -> usize {
    let mut dropped = 0;
    while self.rx.try_recv().is_ok() {
      dropped += 1;
    }
    dropped
  }
}

// ============================================================================
// Errors
// ============================================================================

/// Error when sending to an actor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
  #[error("mailbox of {0} is closed")]
  Closed(&'static str),
}
