//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait,
//! implemented by the [vrt::VrtPipeline].
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod vrt;

pub use pipeline::Pipeline;
pub use vrt::VrtPipeline;
