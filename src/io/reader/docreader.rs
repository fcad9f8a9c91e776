/*! Source dump reading.

The dump is a directory tree of JSON records, one per file,
plus `index.dat` files that are not records.
!*/
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;
use crate::pipelines::vrt::types::Document;

/// Name of the per-directory index files to skip.
pub const INDEX_FILENAME: &str = "index.dat";

/// List every record file below `src`, sorted.
pub fn list_documents(src: &Path) -> Result<Vec<PathBuf>, Error> {
    if !src.is_dir() {
        return Err(Error::Custom(format!(
            "source has to be a directory: {:?}",
            src
        )));
    }

    let src_str = src
        .to_str()
        .ok_or_else(|| Error::Custom(format!("Could not parse path {:?}", src)))?;
    let pattern = format!("{}/**/*", glob::Pattern::escape(src_str));

    let mut paths = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_file() && path.file_name().map_or(false, |f| f != INDEX_FILENAME) {
            paths.push(path);
        }
    }
    paths.sort();

    debug!("found {} documents in {:?}", paths.len(), src);
    Ok(paths)
}

/// Read and decode a single record. A leading UTF-8 BOM is ignored.
pub fn read_document(path: &Path) -> Result<Document, Error> {
    let content = std::fs::read_to_string(path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    Ok(serde_json::from_str(content)?)
}
