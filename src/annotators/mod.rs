/*! Linguistic annotation.

An [Annotator] turns free text into tagged and lemmatized sentences.
It chains a [Tokenize] implementation with two independent tagging sources:

- a primary tagger ([Tag]) whose lemmas come from a (token, tag) keyed [Lemmatize] step,
- a secondary tagger ([TagLemma]) that provides lemmas directly.

Both outputs are reconciled by [fusion::fuse].

Annotators are built once per worker by an [AnnotatorFactory] and reused for every document
that worker handles.
!*/
pub mod fusion;
mod lexicon;
mod models;
mod tokenizer;

use crate::error::Error;

pub use fusion::OverrideTags;
pub use lexicon::{FullFormTagger, LemmaTable, Lexicon, LexiconTagger};
pub use models::{LexiconModels, LexiconModelsBuilder};
pub use tokenizer::RuleTokenizer;

/// A (surface form, part-of-speech tag, lemma) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub form: String,
    pub tag: String,
    pub lemma: String,
}

impl Token {
    pub fn new(form: &str, tag: &str, lemma: &str) -> Self {
        Self {
            form: form.to_string(),
            tag: tag.to_string(),
            lemma: lemma.to_string(),
        }
    }
}

/// Tag and lemma given by one source for one token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotation {
    pub tag: String,
    pub lemma: String,
}

impl Annotation {
    pub fn new(tag: &str, lemma: &str) -> Self {
        Self {
            tag: tag.to_string(),
            lemma: lemma.to_string(),
        }
    }
}

/// Splits text into sentences of tokens.
pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Result<Vec<Vec<String>>, Error>;
}

/// Primary tagger: one tag per token.
pub trait Tag {
    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, Error>;
}

/// Lemma lookup keyed on (token, tag).
pub trait Lemmatize {
    fn lemmatize(&self, token: &str, tag: &str) -> Option<String>;
}

/// Secondary tagger: tag and lemma per token.
pub trait TagLemma {
    fn tag_lemma(&self, tokens: &[String]) -> Result<Vec<Annotation>, Error>;
}

/// Segmentation and tagging of free text.
pub trait Annotate {
    fn segment_and_tag(&self, text: &str) -> Result<Vec<Vec<Token>>, Error>;
}

/// Loads the annotation models of one worker.
///
/// Loading is the expensive part of a worker's lifetime and happens exactly once per worker.
pub trait AnnotatorFactory: Sync {
    type Annotator: Annotate;
    fn load(&self) -> Result<Self::Annotator, Error>;
}

/// Tokenizer + primary tagger/lemmatizer + secondary tagger, fused.
pub struct Annotator {
    tokenizer: Box<dyn Tokenize>,
    primary: Box<dyn Tag>,
    lemmatizer: Box<dyn Lemmatize>,
    secondary: Box<dyn TagLemma>,
    overrides: OverrideTags,
}

impl Annotator {
    pub fn new(
        tokenizer: Box<dyn Tokenize>,
        primary: Box<dyn Tag>,
        lemmatizer: Box<dyn Lemmatize>,
        secondary: Box<dyn TagLemma>,
        overrides: OverrideTags,
    ) -> Self {
        Self {
            tokenizer,
            primary,
            lemmatizer,
            secondary,
            overrides,
        }
    }

    /// Tag a single tokenized sentence with both sources and fuse the results.
    pub fn tag_sentence(&self, tokens: &[String]) -> Result<Vec<Token>, Error> {
        // lemmas are looked up by position, so a short/long tag sequence
        // keeps its length and gets caught by fuse.
        let primary: Vec<Annotation> = self
            .primary
            .tag(tokens)?
            .into_iter()
            .enumerate()
            .map(|(idx, tag)| {
                let lemma = tokens
                    .get(idx)
                    .and_then(|token| self.lemmatizer.lemmatize(token, &tag))
                    .unwrap_or_default();
                Annotation { tag, lemma }
            })
            .collect();

        let secondary = self.secondary.tag_lemma(tokens)?;

        fusion::fuse(tokens, primary, secondary, &self.overrides)
    }
}

impl Annotate for Annotator {
    fn segment_and_tag(&self, text: &str) -> Result<Vec<Vec<Token>>, Error> {
        self.tokenizer
            .tokenize(text)?
            .iter()
            .map(|sentence| self.tag_sentence(sentence))
            .collect()
    }
}
