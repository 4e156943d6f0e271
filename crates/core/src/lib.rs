pub mod actor;
pub mod config;
pub mod output;
pub mod ranking;
pub mod text;

pub use actor::{PipelineError, PipelinePaths, PipelineReport, run_pipeline};
pub use config::Config;
pub use tokio_util::sync::CancellationToken;
