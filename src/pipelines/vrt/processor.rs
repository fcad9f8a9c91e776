/*! Document processing.

Turns a [Document] into a [DocumentTree]:
dates are parsed, the category slugified, and the recipe text and every comment text annotated.
Sentence and comment ids are drawn from the shared [IdAllocator] as nodes are created.
!*/
use log::debug;

use crate::annotators::{Annotate, Token};
use crate::error::Error;
use crate::identifiers::IdAllocator;

use super::types::{
    slugify, Comment, CommentNode, DateParts, DatePolicy, Document, DocumentTree, RecipeNode,
    SentenceNode,
};

pub struct DocumentProcessor<'a> {
    ids: &'a IdAllocator,
    date_policy: DatePolicy,
}

impl<'a> DocumentProcessor<'a> {
    pub fn new(ids: &'a IdAllocator, date_policy: DatePolicy) -> Self {
        Self { ids, date_policy }
    }

    pub fn process<A: Annotate + ?Sized>(
        &self,
        doc: &Document,
        annotator: &A,
    ) -> Result<DocumentTree, Error> {
        let date = DateParts::parse_date(doc.date(), self.date_policy)?;

        let recipe = RecipeNode {
            id: doc.id().to_string(),
            title: doc.title().to_string(),
            url: doc.url().to_string(),
            author: doc.author().to_string(),
            date,
            rating: doc.rating_number().cloned(),
            category: slugify(doc.category()),
            category_orig: doc.category().to_string(),
            keywords: doc.keywords().to_vec(),
            related: doc.related().to_vec(),
            ingredients: doc.ingredient_names().map(String::from).collect(),
            sentences: self.sentences(annotator.segment_and_tag(doc.text())?)?,
        };

        let comments = doc
            .comments()
            .iter()
            .map(|comment| self.comment(doc.id(), comment, annotator))
            .collect::<Result<Vec<_>, Error>>()?;

        debug!(
            "document {}: {} sentences, {} comments",
            recipe.id,
            recipe.sentences.len(),
            comments.len()
        );

        Ok(DocumentTree { recipe, comments })
    }

    fn comment<A: Annotate + ?Sized>(
        &self,
        parent: &str,
        comment: &Comment,
        annotator: &A,
    ) -> Result<CommentNode, Error> {
        // the id is taken when the node is created, before annotation
        let id = self.ids.next_comment_id()?;
        let date = DateParts::parse_timestamp(comment.date(), self.date_policy)?;
        let sentences = self.sentences(annotator.segment_and_tag(comment.text())?)?;

        Ok(CommentNode {
            id,
            parent: parent.to_string(),
            author: comment.author().to_string(),
            date,
            datetime_orig: comment.date().map(String::from),
            sentences,
        })
    }

    fn sentences(&self, sentences: Vec<Vec<Token>>) -> Result<Vec<SentenceNode>, Error> {
        sentences
            .into_iter()
            .map(|tokens| {
                Ok(SentenceNode {
                    id: self.ids.next_sentence_id()?,
                    tokens,
                })
            })
            .collect()
    }
}
