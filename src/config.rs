//! Index build/load configuration
//!
//! Bundles the three artifact paths shared by the indexer and the retriever.

use std::path::{Path, PathBuf};

/// Paths to the three artifacts a build produces and a load consumes.
#[derive(Debug, Clone)]
pub struct IndexPaths {
    /// Pre-order text serialization of the radix trie.
    pub trie_path: PathBuf,

    /// JSON map of term to `{mu, sigma, df}`.
    pub stats_path: PathBuf,

    /// JSON map of document id to opaque path string.
    pub docmap_path: PathBuf,

    /// Skip the up-to-date check and rebuild unconditionally.
    pub force_rebuild: bool,
}

impl IndexPaths {
    /// Place all three artifacts under `dir`, using their conventional file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            trie_path: dir.join("inverted_index.txt"),
            stats_path: dir.join("global_stats.json"),
            docmap_path: dir.join("doc_id_map.json"),
            force_rebuild: false,
        }
    }

    /// All three artifacts exist on disk. Existence alone does not mean they
    /// parse — a prior build that crashed mid-write can leave a truncated or
    /// malformed file behind; the indexer's restart check also attempts to
    /// parse each one before treating the index as up to date.
    pub fn artifacts_exist(&self) -> bool {
        self.trie_path.exists() && self.stats_path.exists() && self.docmap_path.exists()
    }
}
