//! Input records and annotated output trees.
mod category;
mod date;
mod document;
mod tree;

pub use category::slugify;
pub use date::{DateParts, DatePolicy, NULL_DATE, NULL_YEAR, NULL_YEARMONTH};
pub use document::{Comment, Document, Ingredient, Rating};
pub use tree::{CommentNode, DocumentTree, RecipeNode, SentenceNode};
