/*! Corpus processing

Operations on already generated VRT files.
!*/
pub mod merge;

pub use merge::{merge, MergeOptions};
