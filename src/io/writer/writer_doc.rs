/*! Per-document output files.

Every source file `<src>/<dir>/<name>.json` yields
`<recipes>/<dir>/<name>.vrt` and, if the document has comments,
`<comments>/<dir>/<name>_comments.vrt`.

Files are serialized into temporary files next to their destination and
only renamed once both are complete, so a failed document never leaves a
file at a destination path.
!*/
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use super::vrt;
use crate::error::Error;
use crate::pipelines::vrt::types::DocumentTree;

/// Destination roots.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    src: PathBuf,
    recipes: PathBuf,
    comments: PathBuf,
}

/// Destination files of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub recipe: PathBuf,
    pub comments: PathBuf,
}

impl OutputLayout {
    pub fn new(src: &Path, recipes: &Path, comments: &Path) -> Self {
        Self {
            src: src.to_path_buf(),
            recipes: recipes.to_path_buf(),
            comments: comments.to_path_buf(),
        }
    }

    /// `<dst>/recipes` and `<dst>/comments`.
    pub fn with_dst(src: &Path, dst: &Path) -> Self {
        Self::new(src, &dst.join("recipes"), &dst.join("comments"))
    }

    pub fn recipes_root(&self) -> &Path {
        &self.recipes
    }

    pub fn comments_root(&self) -> &Path {
        &self.comments
    }

    /// Compute the destination files of the source file at `path`.
    pub fn destinations(&self, path: &Path) -> Result<Destinations, Error> {
        let relative = path.strip_prefix(&self.src).map_err(|_| {
            Error::Custom(format!("{:?} is not in source folder {:?}", path, self.src))
        })?;
        let dir = relative.parent().unwrap_or_else(|| Path::new(""));

        // name up to the first dot
        let stem = relative
            .file_name()
            .and_then(|f| f.to_str())
            .and_then(|f| f.split('.').next())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Custom(format!("Couldn't extract file stem from {:?}", path)))?;

        Ok(Destinations {
            recipe: self.recipes.join(dir).join(format!("{}.vrt", stem)),
            comments: self.comments.join(dir).join(format!("{}_comments.vrt", stem)),
        })
    }
}

/// Files actually written for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub recipe: PathBuf,
    pub comments: Option<PathBuf>,
}

/// Serialize into a temporary file in `dst`'s directory.
fn stage<F>(dst: &Path, serialize: F) -> Result<NamedTempFile, Error>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<(), Error>,
{
    let dir = dst
        .parent()
        .ok_or_else(|| Error::Custom(format!("no parent directory for {:?}", dst)))?;
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut w = BufWriter::new(&mut tmp);
        serialize(&mut w)?;
        w.flush()?;
    }
    Ok(tmp)
}

/// Write both trees of a document to their destinations.
pub fn write_document(tree: &DocumentTree, dst: &Destinations) -> Result<Written, Error> {
    let recipe = stage(&dst.recipe, |w| vrt::write_recipe(w, &tree.recipe))?;
    let comments = if tree.has_comments() {
        Some(stage(&dst.comments, |w| {
            vrt::write_comments(w, &tree.comments)
        })?)
    } else {
        None
    };

    recipe.persist(&dst.recipe)?;
    if let Some(comments) = comments {
        if let Err(e) = comments.persist(&dst.comments) {
            // don't leave half of a document behind
            let _ = fs::remove_file(&dst.recipe);
            return Err(e.into());
        }
    }

    debug!("wrote {:?}", dst.recipe);
    Ok(Written {
        recipe: dst.recipe.clone(),
        comments: tree.has_comments().then(|| dst.comments.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotators::Token;
    use crate::pipelines::vrt::types::{CommentNode, DateParts, RecipeNode, SentenceNode};

    fn tree(n_comments: u64) -> DocumentTree {
        DocumentTree {
            recipe: RecipeNode {
                id: "1".to_string(),
                title: "t".to_string(),
                url: String::new(),
                author: "a".to_string(),
                date: DateParts::null(),
                rating: None,
                category: "c".to_string(),
                category_orig: "c".to_string(),
                keywords: vec![],
                related: vec![],
                ingredients: vec![],
                sentences: vec![SentenceNode {
                    id: 0,
                    tokens: vec![Token::new("Salz", "NN", "Salz")],
                }],
            },
            comments: (0..n_comments)
                .map(|id| CommentNode {
                    id,
                    parent: "1".to_string(),
                    author: "b".to_string(),
                    date: DateParts::null(),
                    datetime_orig: None,
                    sentences: vec![],
                })
                .collect(),
        }
    }

    #[test]
    fn destinations() {
        let layout = OutputLayout::with_dst(Path::new("/data/dump"), Path::new("/out"));
        let d = layout
            .destinations(Path::new("/data/dump/a/b/123.recipe.json"))
            .unwrap();
        assert_eq!(d.recipe, PathBuf::from("/out/recipes/a/b/123.vrt"));
        assert_eq!(d.comments, PathBuf::from("/out/comments/a/b/123_comments.vrt"));

        let d = layout.destinations(Path::new("/data/dump/9.json")).unwrap();
        assert_eq!(d.recipe, PathBuf::from("/out/recipes/9.vrt"));

        assert!(layout.destinations(Path::new("/elsewhere/9.json")).is_err());
    }

    #[test]
    fn write_with_comments() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::with_dst(Path::new("src"), dir.path());
        let dst = layout.destinations(Path::new("src/x/1.json")).unwrap();

        let written = write_document(&tree(2), &dst).unwrap();
        assert_eq!(written.comments.as_ref(), Some(&dst.comments));

        let recipe = fs::read_to_string(&dst.recipe).unwrap();
        assert!(recipe.starts_with("<recipe title=\"t\" id=\"1\""));
        assert!(recipe.contains("Salz\tNN\tSalz\n"));

        let comments = fs::read_to_string(&dst.comments).unwrap();
        assert!(comments.starts_with("<comments>\n<comment id=\"c0\""));
        assert!(comments.ends_with("</comments>\n"));

        // only the two destination files are left
        assert_eq!(fs::read_dir(dir.path().join("recipes/x")).unwrap().count(), 1);
        assert_eq!(fs::read_dir(dir.path().join("comments/x")).unwrap().count(), 1);
    }

    #[test]
    fn failed_comments_removes_recipe() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::with_dst(Path::new("src"), dir.path());
        let dst = layout.destinations(Path::new("src/x/1.json")).unwrap();

        // a directory in the way makes the rename fail
        fs::create_dir_all(&dst.comments).unwrap();

        assert!(write_document(&tree(1), &dst).is_err());
        assert!(!dst.recipe.exists());

        // no temporary files left behind
        let recipes_dir = dst.recipe.parent().unwrap();
        assert_eq!(fs::read_dir(recipes_dir).unwrap().count(), 0);
        let comments_dir: Vec<PathBuf> = fs::read_dir(dst.comments.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(comments_dir, vec![dst.comments.clone()]);
    }

    #[test]
    fn no_comments_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::with_dst(Path::new("src"), dir.path());
        let dst = layout.destinations(Path::new("src/1.json")).unwrap();

        let written = write_document(&tree(0), &dst).unwrap();
        assert_eq!(written.comments, None);
        assert!(dst.recipe.is_file());
        assert!(!dst.comments.exists());
        assert!(!dir.path().join("comments").exists());
    }
}
