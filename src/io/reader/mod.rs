/*! Source reading utilities

Listing of the source dump and decoding of its records.
!*/
mod docreader;

pub use docreader::{list_documents, read_document, INDEX_FILENAME};
