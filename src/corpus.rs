//! Reference corpus collaborator: walks a directory of `.txt` files and
//! hands the indexer `(doc_id, text)` pairs plus the document map.
//!
//! This is a convenience implementation of the `Corpus` contract the indexer
//! depends on, not part of the core indexing algorithm — callers with a
//! different source of documents (a database, a network fetch) can build
//! their own iterator and doc map instead of using this module.

use crate::error::{IndexError, Result};
use crate::trie::DocId;
use log::warn;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source of documents for `Indexer::build`: an iterator of `(doc_id, text)`
/// results plus the opaque doc-id -> path map to persist alongside the trie
/// and statistics. Expressed as a trait so the core never depends on how
/// documents reach it or where the doc-map data comes from.
pub trait Corpus {
    type Documents: Iterator<Item = Result<(DocId, String)>>;

    /// The document-id -> opaque path map, using the same id assignment
    /// `into_documents` yields. Treated as inert cargo by the indexer: it is
    /// written verbatim, never interpreted.
    fn doc_map(&self) -> HashMap<DocId, String>;

    /// Consume into the `(doc_id, text)` iterator the indexer drives.
    fn into_documents(self) -> Self::Documents;
}

/// A directory of `.txt` files, assigned ascending document ids in sorted
/// path order. Doc id `1` is the lexicographically-first `.txt` file.
pub struct FsCorpus {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl FsCorpus {
    /// Walk `root` and collect every `.txt` file, sorted by relative path.
    pub fn scan(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut files: Vec<PathBuf> = WalkDir::new(&root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("txt"))
            .collect();
        files.sort();

        Ok(Self { root, files })
    }
}

impl Corpus for FsCorpus {
    type Documents = Box<dyn Iterator<Item = Result<(DocId, String)>>>;

    /// The doc id -> relative path map for this corpus, in the same
    /// assignment `into_documents` will use.
    fn doc_map(&self) -> HashMap<DocId, String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let doc_id = (i + 1) as DocId;
                let relative = path
                    .strip_prefix(&self.root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .into_owned();
                (doc_id, relative)
            })
            .collect()
    }

    /// Consume this corpus into the `(doc_id, text)` iterator the indexer
    /// expects. A file that cannot be opened is reported as a skipped
    /// document rather than aborting the whole build.
    fn into_documents(self) -> Self::Documents {
        Box::new(
            self.files
                .into_iter()
                .enumerate()
                .map(|(i, path)| read_document((i + 1) as DocId, path)),
        )
    }
}

fn read_document(doc_id: DocId, path: PathBuf) -> Result<(DocId, String)> {
    match fs::read(&path) {
        Ok(bytes) => Ok((doc_id, String::from_utf8_lossy(&bytes).into_owned())),
        Err(err) => {
            warn!("failed to read {path:?}: {err}");
            Err(IndexError::CorpusRead {
                doc_id,
                reason: err.to_string(),
            })
        }
    }
}
