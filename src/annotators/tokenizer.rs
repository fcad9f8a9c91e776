/*! Rule-based tokenizer.

Text is split into paragraphs on line breaks (empty paragraphs are dropped),
paragraphs into sentences and sentences into words following
Unicode text segmentation (UAX #29).
!*/
use unicode_segmentation::UnicodeSegmentation;

use super::Tokenize;
use crate::error::Error;

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleTokenizer;

impl RuleTokenizer {
    /// Non-empty, line-break separated paragraphs.
    pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
        text.split(|c: char| c == '\n' || c == '\r').filter(|p| !p.trim().is_empty())
    }

    fn words(sentence: &str) -> Vec<String> {
        sentence
            .split_word_bounds()
            .filter(|w| !w.trim().is_empty())
            .map(String::from)
            .collect()
    }
}

impl Tokenize for RuleTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Vec<String>>, Error> {
        Ok(Self::paragraphs(text)
            .flat_map(|paragraph| paragraph.split_sentence_bounds())
            .map(Self::words)
            .filter(|sentence| !sentence.is_empty())
            .collect())
    }
}
