//! Query-time front end: loads the three build artifacts and answers
//! Boolean searches ranked by z-score.

use crate::config::IndexPaths;
use crate::error::Result;
use crate::query::{evaluate, query_terms, to_postfix, tokenize};
use crate::ranker::rank;
use crate::stats::StatsTable;
use crate::trie::{DocId, Trie};
use log::{error, info};

/// A loaded, queryable index.
///
/// Construction can fail if any artifact is missing or malformed. Once
/// built, `search` never fails: an unknown term, an unbalanced query, and a
/// genuine miss all surface identically as an empty result list, matching
/// the core's "no error channel at query time" contract.
pub struct Retriever {
    trie: Trie,
    stats: StatsTable,
}

impl Retriever {
    /// Load the trie and statistics artifacts from `paths`. The document map
    /// is not needed for search and is not loaded here.
    pub fn load(paths: &IndexPaths) -> Result<Self> {
        let trie_file = std::fs::File::open(&paths.trie_path)?;
        let trie = Trie::deserialize(std::io::BufReader::new(trie_file))?;
        let stats = StatsTable::load(&paths.stats_path)?;

        info!("retriever loaded from {:?}", paths.trie_path);
        Ok(Self { trie, stats })
    }

    /// Evaluate a Boolean query and return matching document ids ordered by
    /// descending mean z-score, ties broken by ascending document id.
    pub fn search(&self, query: &str) -> Vec<DocId> {
        let tokens = tokenize(query);
        let postfix = to_postfix(&tokens);
        let candidates = match evaluate(&postfix, &self.trie) {
            Ok(docs) => docs,
            Err(err) => {
                error!("query evaluation failed for {query:?}: {err}");
                return Vec::new();
            }
        };

        let terms = query_terms(&tokens);
        rank(&candidates, &terms, &self.trie, &self.stats)
    }
}
