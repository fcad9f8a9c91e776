//! VRT generation pipeline
//!
//! The source dump is a directory tree of JSON recipe records.
//! Each record becomes a recipe VRT file and, when it has comments, a comments VRT file,
//! both placed in the same relative directory as the record, under two output roots.
//!
//! # Processing
//! 1. Records are listed (`index.dat` files are skipped).
//! 1. A [WorkerPool] of staggered workers loads the annotation models, one copy per worker.
//! 1. Each worker takes records one at a time: the record is decoded, annotated into a [DocumentTree]
//!    (drawing sentence and comment ids from the shared [IdAllocator]) and written.
//! 1. Every record gets an entry in the returned [RunReport], failed ones included.
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::annotators::AnnotatorFactory;
use crate::error::Error;
use crate::identifiers::IdAllocator;
use crate::io::writer::Written;
use crate::io::{list_documents, read_document, write_document, OutputLayout};
use crate::pipelines::pipeline::Pipeline;

use super::pool::{Ledger, PoolConfig, WorkerPool};
use super::processor::DocumentProcessor;
use super::types::{DatePolicy, DocumentTree};

/// What a successfully processed record produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub id: String,
    pub sentence_ids: Vec<u64>,
    pub comment_ids: Vec<u64>,
    pub written: Written,
}

impl DocumentSummary {
    fn new(tree: &DocumentTree, written: Written) -> Self {
        Self {
            id: tree.recipe.id.clone(),
            sentence_ids: tree.sentence_ids().collect(),
            comment_ids: tree.comment_ids().collect(),
            written,
        }
    }
}

/// Per-record outcomes of a run.
pub type RunReport = Ledger<PathBuf, DocumentSummary>;

pub struct VrtPipeline<F> {
    src: PathBuf,
    layout: OutputLayout,
    models: F,
    pool: PoolConfig,
    date_policy: DatePolicy,
    id_start: (u64, u64),
}

impl<F: AnnotatorFactory> VrtPipeline<F> {
    /// Outputs go to `dst/recipes` and `dst/comments`.
    pub fn new(src: PathBuf, dst: PathBuf, models: F) -> Self {
        let layout = OutputLayout::with_dst(&src, &dst);
        Self {
            src,
            layout,
            models,
            pool: PoolConfig::default(),
            date_policy: DatePolicy::default(),
            id_start: (0, 0),
        }
    }

    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_date_policy(mut self, date_policy: DatePolicy) -> Self {
        self.date_policy = date_policy;
        self
    }

    /// First sentence and comment ids.
    pub fn with_id_start(mut self, sentence: u64, comment: u64) -> Self {
        self.id_start = (sentence, comment);
        self
    }

    /// Decode, annotate and write a single record.
    fn process_path(
        path: &Path,
        layout: &OutputLayout,
        processor: &DocumentProcessor,
        annotator: &F::Annotator,
    ) -> Result<DocumentSummary, Error> {
        let doc = read_document(path)?;
        let dst = layout.destinations(path)?;
        let tree = processor.process(&doc, annotator)?;
        let written = write_document(&tree, &dst)?;
        Ok(DocumentSummary::new(&tree, written))
    }
}

impl<F: AnnotatorFactory> Pipeline<RunReport> for VrtPipeline<F> {
    fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn run(&self) -> Result<RunReport, Error> {
        let paths = list_documents(&self.src)?;
        info!("{} documents to process", paths.len());

        for root in [self.layout.recipes_root(), self.layout.comments_root()] {
            if !root.exists() {
                warn!("Destination {:?} does not exist. Creating", root);
                std::fs::create_dir_all(root)?;
            }
        }

        let ids = IdAllocator::starting_at(self.id_start.0, self.id_start.1);
        let processor = DocumentProcessor::new(&ids, self.date_policy);
        let pool = WorkerPool::new(self.pool)?;

        let report = pool.run(&self.models, paths, |annotator, path| {
            let result = Self::process_path(path, &self.layout, &processor, annotator);
            if let Err(e) = &result {
                error!("{:?}: {}", path, e);
            }
            result
        })?;

        let (sentences, comments) = ids.issued();
        info!(
            "done: {} documents written, {} failed, {} sentence ids and {} comment ids issued",
            report.successes().count(),
            report.failures().count(),
            sentences,
            comments
        );
        Ok(report)
    }
}

/// Write one `path<TAB>error` line per failed record.
pub fn write_failures<W: Write>(report: &RunReport, w: &mut W) -> Result<usize, Error> {
    let mut count = 0;
    for (path, e) in report.failures() {
        writeln!(w, "{}\t{}", path.display(), e)?;
        count += 1;
    }
    Ok(count)
}
