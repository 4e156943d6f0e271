//! Actor-based word frequency pipeline
//!
//! Components communicate only via message passing over bounded mailboxes.
//! Each actor owns its state and mutates it only inside its own loop.
//!
//! # Architecture
//!
//! - Each actor runs as a tokio task with its own event loop ([`runtime`])
//! - Mailboxes are bounded `mpsc` channels; a full mailbox blocks the sender
//! - Message payloads are moved, never shared
//! - Shutdown cascades down the chain: each actor forwards it, then closes
//!
//! # Actors
//!
//! - [`DataSourceActor`]: owns the normalized input, streams words
//! - [`FilterActor`]: owns the stop-word set, drops stop words
//! - [`AggregatorActor`]: owns the frequency table, answers ranking requests
//! - [`ControllerActor`]: drives the run, writes the ranking, starts shutdown
//!
//! ```text
//! Controller → DataSource → Filter → Aggregator
//!     ▲                                   │
//!     └────────── ranked result ──────────┘
//! ```
//!
//! See [`run_pipeline`] for wiring and [`message`] for the message types.

mod aggregator;
mod controller;
mod filter;
mod source;

pub mod handle;
pub mod mailbox;
pub mod message;
pub mod pipeline;
pub mod runtime;

#[cfg(test)]
mod __tests__;

pub use aggregator::AggregatorActor;
pub use controller::ControllerActor;
pub use filter::FilterActor;
pub use pipeline::{PipelineError, PipelinePaths, PipelineReport, run_pipeline};
pub use runtime::{Actor, ActorError, ActorExit, ActorState, ActorTask, ExitReason, spawn};
pub use source::DataSourceActor;
