/*! Lexicon based taggers and lemmatizer.

Models are plain text files, one `form<TAB>tag<TAB>lemma` entry per line.
Empty lines and lines starting with `#` are ignored.

- [LexiconTagger] tags tokens with the first tag seen for a form (exact, then lowercased),
  and guesses a tag from the token shape otherwise.
- [LemmaTable] looks lemmas up by (form, tag).
- [FullFormTagger] gives (tag, lemma) for lowercased forms and keeps the surface form as lemma for unknown ones.
!*/
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use super::{Annotation, Lemmatize, Tag, TagLemma};
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub form: String,
    pub tag: String,
    pub lemma: String,
}

/// Parsed model file.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let f = File::open(path).map_err(|e| Error::Model(format!("{:?}: {}", path, e)))?;
        let lexicon = Self::from_reader(BufReader::new(f), &path.to_string_lossy())?;
        debug!("loaded {} entries from {:?}", lexicon.entries.len(), path);
        Ok(lexicon)
    }

    /// `origin` is only used in error messages.
    pub fn from_reader<R: BufRead>(reader: R, origin: &str) -> Result<Self, Error> {
        let mut entries = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut columns = line.split('\t');
            match (columns.next(), columns.next(), columns.next(), columns.next()) {
                (Some(form), Some(tag), Some(lemma), None) if !form.is_empty() && !tag.is_empty() => {
                    entries.push(LexiconEntry {
                        form: form.to_string(),
                        tag: tag.to_string(),
                        lemma: lemma.to_string(),
                    })
                }
                _ => {
                    return Err(Error::Model(format!(
                        "{}:{}: expected form<TAB>tag<TAB>lemma, got {:?}",
                        origin,
                        idx + 1,
                        line
                    )))
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Guess a STTS tag from the token shape.
pub fn guess_tag(token: &str) -> &'static str {
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_punctuation()) {
        match token {
            "." | "!" | "?" | ";" | ":" | "..." => "$.",
            "," => "$,",
            _ => "$(",
        }
    } else if token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',' || c == '/')
    {
        "CARD"
    } else if token.chars().next().map_or(false, char::is_uppercase) {
        "NN"
    } else {
        "XY"
    }
}

/// Primary tagger.
#[derive(Debug, Default)]
pub struct LexiconTagger {
    exact: HashMap<String, String>,
    lowercase: HashMap<String, String>,
}

impl From<&Lexicon> for LexiconTagger {
    fn from(lexicon: &Lexicon) -> Self {
        let mut tagger = Self::default();
        for entry in lexicon.entries() {
            tagger
                .exact
                .entry(entry.form.clone())
                .or_insert_with(|| entry.tag.clone());
            tagger
                .lowercase
                .entry(entry.form.to_lowercase())
                .or_insert_with(|| entry.tag.clone());
        }
        tagger
    }
}

impl LexiconTagger {
    fn tag_one(&self, token: &str) -> String {
        self.exact
            .get(token)
            .or_else(|| self.lowercase.get(&token.to_lowercase()))
            .cloned()
            .unwrap_or_else(|| guess_tag(token).to_string())
    }
}

impl Tag for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, Error> {
        Ok(tokens.iter().map(|t| self.tag_one(t)).collect())
    }
}

/// (form, tag) → lemma lookup for the primary tagger.
#[derive(Debug, Default)]
pub struct LemmaTable {
    lemmas: HashMap<(String, String), String>,
}

impl From<&Lexicon> for LemmaTable {
    fn from(lexicon: &Lexicon) -> Self {
        let mut lemmas = HashMap::new();
        for entry in lexicon.entries().iter().filter(|e| !e.lemma.is_empty()) {
            lemmas
                .entry((entry.form.clone(), entry.tag.clone()))
                .or_insert_with(|| entry.lemma.clone());
            lemmas
                .entry((entry.form.to_lowercase(), entry.tag.clone()))
                .or_insert_with(|| entry.lemma.clone());
        }
        Self { lemmas }
    }
}

impl Lemmatize for LemmaTable {
    fn lemmatize(&self, token: &str, tag: &str) -> Option<String> {
        self.lemmas
            .get(&(token.to_string(), tag.to_string()))
            .or_else(|| self.lemmas.get(&(token.to_lowercase(), tag.to_string())))
            .cloned()
    }
}

/// Secondary tagger.
#[derive(Debug, Default)]
pub struct FullFormTagger {
    forms: HashMap<String, Annotation>,
}

impl From<&Lexicon> for FullFormTagger {
    fn from(lexicon: &Lexicon) -> Self {
        let mut forms = HashMap::new();
        for entry in lexicon.entries() {
            forms
                .entry(entry.form.to_lowercase())
                .or_insert_with(|| Annotation::new(&entry.tag, &entry.lemma));
        }
        Self { forms }
    }
}

impl TagLemma for FullFormTagger {
    fn tag_lemma(&self, tokens: &[String]) -> Result<Vec<Annotation>, Error> {
        Ok(tokens
            .iter()
            .map(|t| {
                self.forms
                    .get(&t.to_lowercase())
                    .cloned()
                    .unwrap_or_else(|| Annotation::new(guess_tag(t), t))
            })
            .collect())
    }
}
