/*!
# IO utilities

Reading of the source dump and writing of the annotated per-document files.
!*/
pub mod reader;
pub mod writer;

pub use reader::{list_documents, read_document};
pub use writer::{write_document, OutputLayout};
