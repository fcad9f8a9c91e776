/*! Fusion of two tagging sources.

The primary source is trusted for tags and, generally, for lemmas.
Its lemmas are replaced by the secondary source's when they are missing
or when the primary tag belongs to [OverrideTags], a set of tags whose
primary lemmas are known to be unreliable.

Both sources must annotate the exact same token sequence.
!*/
use std::collections::HashSet;

use lazy_static::lazy_static;

use super::{Annotation, Token};
use crate::error::Error;

/// STTS tags with unreliable primary lemmas:
/// finite full verb, infinitive full verb, adverbial/predicative adjective.
pub const DEFAULT_OVERRIDE_TAGS: [&str; 3] = ["VVFIN", "VVINF", "ADJD"];

lazy_static! {
    static ref DEFAULT_OVERRIDES: HashSet<String> = DEFAULT_OVERRIDE_TAGS
        .iter()
        .map(|tag| tag.to_string())
        .collect();
}

/// Tags for which the secondary lemma wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideTags(HashSet<String>);

impl OverrideTags {
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for OverrideTags {
    fn default() -> Self {
        Self(DEFAULT_OVERRIDES.clone())
    }
}

impl<S: Into<String>> FromIterator<S> for OverrideTags {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Fuse the annotations of a single token.
pub fn fuse_one(
    form: &str,
    primary: Annotation,
    secondary: Annotation,
    overrides: &OverrideTags,
) -> Token {
    let lemma = if primary.lemma.is_empty() || overrides.contains(&primary.tag) {
        secondary.lemma
    } else {
        primary.lemma
    };

    Token {
        form: form.to_string(),
        tag: primary.tag,
        lemma,
    }
}

/// Fuse the annotations of a sentence.
///
/// Returns [Error::AnnotationMismatch] if either source does not give exactly one annotation per token.
pub fn fuse(
    tokens: &[String],
    primary: Vec<Annotation>,
    secondary: Vec<Annotation>,
    overrides: &OverrideTags,
) -> Result<Vec<Token>, Error> {
    if primary.len() != tokens.len() || secondary.len() != tokens.len() {
        return Err(Error::AnnotationMismatch {
            tokens: tokens.len(),
            primary: primary.len(),
            secondary: secondary.len(),
        });
    }

    Ok(tokens
        .iter()
        .zip(primary)
        .zip(secondary)
        .map(|((form, primary), secondary)| fuse_one(form, primary, secondary, overrides))
        .collect())
}
