/*! Annotated document trees.

A [DocumentTree] is the in-memory result of processing one [super::Document]:
a [RecipeNode] holding the document metadata and sentences,
and the [CommentNode]s of its comments.
!*/
use serde_json::Number;

use crate::annotators::Token;

use super::DateParts;

/// A tagged sentence with its corpus-wide id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceNode {
    pub id: u64,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeNode {
    pub id: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub date: DateParts,
    /// rating number as found in the record
    pub rating: Option<Number>,
    /// slugified category
    pub category: String,
    pub category_orig: String,
    pub keywords: Vec<String>,
    pub related: Vec<String>,
    pub ingredients: Vec<String>,
    pub sentences: Vec<SentenceNode>,
}

impl RecipeNode {
    /// Raw rating, `0` when missing. `4.0` stays `4.0`.
    pub fn rating_raw(&self) -> String {
        self.rating
            .as_ref()
            .map_or_else(|| "0".to_string(), Number::to_string)
    }

    /// Rating rounded to the nearest integer, `0` when missing.
    pub fn rating_int(&self) -> i64 {
        self.rating
            .as_ref()
            .and_then(Number::as_f64)
            .map_or(0, |r| r.round() as i64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub id: u64,
    /// id of the owning document
    pub parent: String,
    pub author: String,
    pub date: DateParts,
    pub datetime_orig: Option<String>,
    pub sentences: Vec<SentenceNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    pub recipe: RecipeNode,
    pub comments: Vec<CommentNode>,
}

impl DocumentTree {
    pub fn has_comments(&self) -> bool {
        !self.comments.is_empty()
    }

    /// Sentence ids of the recipe and of every comment, in document order.
    pub fn sentence_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.recipe
            .sentences
            .iter()
            .chain(self.comments.iter().flat_map(|c| c.sentences.iter()))
            .map(|s| s.id)
    }

    pub fn comment_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.comments.iter().map(|c| c.id)
    }
}
