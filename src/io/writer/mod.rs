/*!
# VRT writing

[vrt] serializes annotated trees into the line oriented VRT format,
[write_document] puts a document's trees at their [OutputLayout] destinations.
!*/
pub mod vrt;
mod writer_doc;

pub use writer_doc::{write_document, Destinations, OutputLayout, Written};
