/*! Corpus merging

Sequential concatenation of per-document files into a single corpus file.

Files are taken in path order. With `trim`, the first and last line of every file
(the enclosing root element) are dropped, so that only the inner elements remain.
The result can be gzip compressed.
!*/
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::{write::GzEncoder, Compression};
use log::{debug, info};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// only files whose name ends with this are merged
    pub extension: String,
    pub trim: bool,
    pub compress: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            extension: ".vrt".to_string(),
            trim: false,
            compress: false,
        }
    }
}

/// List files below `src` ending with `extension`, `exclude` left out.
fn list_files(src: &Path, extension: &str, exclude: &Path) -> Result<Vec<PathBuf>, Error> {
    let src_str = src
        .to_str()
        .ok_or_else(|| Error::Custom(format!("Could not parse path {:?}", src)))?;
    let pattern = format!("{}/**/*", glob::Pattern::escape(src_str));
    let exclude = exclude.canonicalize().ok();

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let matches = path
            .file_name()
            .and_then(|f| f.to_str())
            .map_or(false, |f| f.ends_with(extension));
        if !matches || !path.is_file() {
            continue;
        }
        if exclude.is_some() && path.canonicalize().ok() == exclude {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

fn merge_into<W: Write>(files: &[PathBuf], w: &mut W, trim: bool) -> Result<(), Error> {
    for path in files {
        debug!("merging {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        let lines: Vec<&str> = content.lines().collect();

        let lines = match (trim, lines.len()) {
            (false, _) => &lines[..],
            (true, n) if n >= 2 => &lines[1..n - 1],
            (true, _) => &[],
        };
        for line in lines {
            writeln!(w, "{}", line)?;
        }
    }
    Ok(())
}

/// Merge every matching file below `src` into `dst`.
///
/// Output is gzip compressed if asked to, or if `dst` ends with `.gz`.
/// Returns the number of merged files.
pub fn merge(src: &Path, dst: &Path, options: &MergeOptions) -> Result<usize, Error> {
    if !src.is_dir() {
        return Err(Error::Custom(format!(
            "source has to be a directory: {:?}",
            src
        )));
    }

    let files = list_files(src, &options.extension, dst)?;
    info!("merging {} files from {:?} into {:?}", files.len(), src, dst);

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let out = BufWriter::new(File::create(dst)?);

    let compress = options.compress || dst.extension().map_or(false, |ext| ext == "gz");
    if compress {
        let mut enc = GzEncoder::new(out, Compression::default());
        merge_into(&files, &mut enc, options.trim)?;
        enc.finish()?.flush()?;
    } else {
        let mut out = out;
        merge_into(&files, &mut out, options.trim)?;
        out.flush()?;
    }

    Ok(files.len())
}
