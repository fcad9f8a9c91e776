pub mod annotators;
pub mod error;
pub mod identifiers;
pub mod io;
pub mod pipelines;
pub mod processing;
