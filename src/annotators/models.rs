/*! Lexicon models loading.

[LexiconModels] is the [AnnotatorFactory] used by the command line:
every worker loads its own copy of both model files.
!*/
use std::path::{Path, PathBuf};

use log::info;

use super::{
    Annotator, AnnotatorFactory, FullFormTagger, LemmaTable, Lexicon, LexiconTagger,
    OverrideTags, RuleTokenizer,
};
use crate::error::Error;

#[derive(Debug, Clone)]
pub struct LexiconModels {
    primary: PathBuf,
    fallback: PathBuf,
    overrides: OverrideTags,
}

impl LexiconModels {
    pub fn primary(&self) -> &Path {
        &self.primary
    }

    pub fn fallback(&self) -> &Path {
        &self.fallback
    }

    /// Build an [Annotator] from already loaded lexicons.
    pub fn annotator(primary: &Lexicon, fallback: &Lexicon, overrides: OverrideTags) -> Annotator {
        Annotator::new(
            Box::new(RuleTokenizer),
            Box::new(LexiconTagger::from(primary)),
            Box::new(LemmaTable::from(primary)),
            Box::new(FullFormTagger::from(fallback)),
            overrides,
        )
    }
}

impl AnnotatorFactory for LexiconModels {
    type Annotator = Annotator;

    fn load(&self) -> Result<Annotator, Error> {
        info!("loading models {:?} and {:?}", self.primary, self.fallback);
        let primary = Lexicon::from_path(&self.primary)?;
        let fallback = Lexicon::from_path(&self.fallback)?;

        Ok(Self::annotator(&primary, &fallback, self.overrides.clone()))
    }
}

/// Lexicon models builder.
pub struct LexiconModelsBuilder<'a> {
    primary: Option<&'a Path>,
    fallback: Option<&'a Path>,
    overrides: Option<OverrideTags>,
}

impl<'a> LexiconModelsBuilder<'a> {
    /// Fails if a model path is missing.
    /// Uses [OverrideTags::default] if no override tags are set.
    pub fn build(&self) -> Result<LexiconModels, Error> {
        let primary = self
            .primary
            .ok_or_else(|| Error::Custom("No primary model provided".to_string()))?;
        let fallback = self
            .fallback
            .ok_or_else(|| Error::Custom("No fallback model provided".to_string()))?;

        for path in [primary, fallback] {
            if !path.is_file() {
                return Err(Error::Model(format!("model file not found: {:?}", path)));
            }
        }

        Ok(LexiconModels {
            primary: primary.to_path_buf(),
            fallback: fallback.to_path_buf(),
            overrides: self.overrides.clone().unwrap_or_default(),
        })
    }

    pub fn primary<'b>(&'b mut self, path: &'a Path) -> &'b mut LexiconModelsBuilder<'a> {
        self.primary = Some(path);
        self
    }

    pub fn fallback<'b>(&'b mut self, path: &'a Path) -> &'b mut LexiconModelsBuilder<'a> {
        self.fallback = Some(path);
        self
    }

    pub fn overrides<'b>(&'b mut self, overrides: OverrideTags) -> &'b mut LexiconModelsBuilder<'a> {
        self.overrides = Some(overrides);
        self
    }
}

impl<'a> Default for LexiconModelsBuilder<'a> {
    fn default() -> Self {
        Self {
            primary: None,
            fallback: None,
            overrides: None,
        }
    }
}
