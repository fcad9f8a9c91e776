//! Annotated VRT corpus generation.
mod pipeline;
pub mod pool;
pub mod processor;
pub mod types;

pub use pipeline::{write_failures, DocumentSummary, RunReport, VrtPipeline};
pub use pool::{Ledger, PoolConfig, TaskOutcome, WorkerPool};
pub use processor::DocumentProcessor;
