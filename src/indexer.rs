//! Drives a single pass over a corpus: tokenize, populate the trie and the
//! statistics accumulator, finalize, and persist all three build artifacts.

use crate::config::IndexPaths;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::stats::StatsTable;
use crate::trie::{DocId, Trie};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};

/// Summary of a completed (or skipped) build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub documents_indexed: u32,
    pub documents_skipped: u32,
    pub terms_indexed: u32,
}

/// Build the trie, statistics table, and document map, and persist all
/// three to the paths in `paths`.
///
/// If `paths.force_rebuild` is false and all three artifacts already exist
/// *and parse successfully*, the build is skipped entirely. A prior build
/// that crashed mid-write leaves a truncated or malformed artifact behind;
/// that is treated the same as a missing one and triggers a full rebuild,
/// rather than being served indefinitely.
pub fn build(corpus: impl Corpus, paths: &IndexPaths) -> Result<IndexStats> {
    if !paths.force_rebuild && artifacts_are_valid(paths) {
        info!(
            "index artifacts already present and valid at {:?}, skipping rebuild",
            paths.trie_path
        );
        return Ok(IndexStats::default());
    }

    let doc_map = corpus.doc_map();

    let mut trie = Trie::new();
    let mut stats = StatsTable::new();
    let mut documents_indexed = 0u32;
    let mut documents_skipped = 0u32;

    for item in corpus.into_documents() {
        match item {
            Err(err) => {
                documents_skipped += 1;
                warn!("skipping unreadable document: {err}");
            }
            Ok((doc_id, text)) => {
                for (term, tf) in tokenize(&text) {
                    trie.insert(&term, doc_id, tf);
                    stats.observe(&term, tf);
                }
                documents_indexed += 1;
                if documents_indexed % 200 == 0 {
                    debug!("indexed {documents_indexed} documents...");
                }
            }
        }
    }

    stats.finalize();

    trie.serialize(BufWriter::new(File::create(&paths.trie_path)?))?;
    stats.persist(&paths.stats_path)?;
    serde_json::to_writer(BufWriter::new(File::create(&paths.docmap_path)?), &doc_map)?;

    let terms_indexed = count_terms(&stats);
    info!(
        "build complete: {documents_indexed} documents indexed, {documents_skipped} skipped, {terms_indexed} distinct terms"
    );

    Ok(IndexStats {
        documents_indexed,
        documents_skipped,
        terms_indexed,
    })
}

/// All three artifacts exist on disk and each one actually parses. A file
/// that merely exists but is truncated or malformed (the documented
/// "partial files are undefined" outcome of a build that failed midway)
/// does not count as valid and falls through to a full rebuild.
fn artifacts_are_valid(paths: &IndexPaths) -> bool {
    if !paths.artifacts_exist() {
        return false;
    }

    let trie_ok = File::open(&paths.trie_path)
        .map(BufReader::new)
        .map(Trie::deserialize)
        .is_ok_and(|r| r.is_ok());
    let stats_ok = StatsTable::load(&paths.stats_path).is_ok();
    let docmap_ok = load_doc_map(&paths.docmap_path).is_ok();

    trie_ok && stats_ok && docmap_ok
}

/// Lowercase and split into maximal runs of ASCII letters, counting
/// occurrences per term within this one document.
fn tokenize(text: &str) -> HashMap<String, u32> {
    let lowered = text.to_lowercase();
    let mut freqs = HashMap::new();
    let mut current = String::new();

    let mut flush = |current: &mut String, freqs: &mut HashMap<String, u32>| {
        if !current.is_empty() {
            *freqs.entry(std::mem::take(current)).or_insert(0) += 1;
        }
    };

    for ch in lowered.chars() {
        if ch.is_ascii_lowercase() {
            current.push(ch);
        } else {
            flush(&mut current, &mut freqs);
        }
    }
    flush(&mut current, &mut freqs);

    freqs
}

fn count_terms(stats: &StatsTable) -> u32 {
    // StatsTable does not expose term enumeration (query-time API is exact
    // lookup only), so the indexer keeps its own tally via this helper,
    // re-deriving the count from the just-finalized table.
    stats.term_count()
}

pub fn load_doc_map(path: impl AsRef<std::path::Path>) -> Result<HashMap<DocId, String>> {
    let file = File::open(path)?;
    let map = serde_json::from_reader(BufReader::new(file))?;
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;
    use std::io::Write;

    /// A fixed in-memory corpus, for tests that don't need `FsCorpus`.
    struct FixedCorpus {
        docs: Vec<Result<(DocId, String)>>,
        doc_map: HashMap<DocId, String>,
    }

    impl Corpus for FixedCorpus {
        type Documents = std::vec::IntoIter<Result<(DocId, String)>>;

        fn doc_map(&self) -> HashMap<DocId, String> {
            self.doc_map.clone()
        }

        fn into_documents(self) -> Self::Documents {
            self.docs.into_iter()
        }
    }

    fn fixed(docs: Vec<Result<(DocId, String)>>, doc_map: HashMap<DocId, String>) -> FixedCorpus {
        FixedCorpus { docs, doc_map }
    }

    #[test]
    fn tokenizes_worked_example_doc1() {
        let freqs = tokenize("The blue car and the blue house, blue.");
        assert_eq!(freqs.get("the"), Some(&2));
        assert_eq!(freqs.get("blue"), Some(&3));
        assert_eq!(freqs.get("car"), Some(&1));
        assert_eq!(freqs.get("and"), Some(&1));
        assert_eq!(freqs.get("house"), Some(&1));
    }

    #[test]
    fn digits_and_punctuation_are_separators() {
        let freqs = tokenize("a1b c2d e-f g.h");
        assert_eq!(freqs.get("a"), Some(&1));
        assert_eq!(freqs.get("b"), Some(&1));
        assert_eq!(freqs.get("c"), Some(&1));
        assert_eq!(freqs.get("d"), Some(&1));
        assert_eq!(freqs.get("e"), Some(&1));
        assert_eq!(freqs.get("f"), Some(&1));
    }

    #[test]
    fn build_writes_three_artifacts_and_reports_counts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IndexPaths::in_dir(dir.path());

        let docs = vec![
            Ok((1u32, "The blue car and the blue house, blue.".to_string())),
            Ok((2u32, "The red car is fast. Another red car.".to_string())),
        ];
        let mut doc_map = HashMap::new();
        doc_map.insert(1u32, "d1.txt".to_string());
        doc_map.insert(2u32, "d2.txt".to_string());

        let report = build(fixed(docs, doc_map.clone()), &paths).unwrap();
        assert_eq!(report.documents_indexed, 2);
        assert_eq!(report.documents_skipped, 0);
        assert!(paths.trie_path.exists());
        assert!(paths.stats_path.exists());
        assert!(paths.docmap_path.exists());

        let loaded = load_doc_map(&paths.docmap_path).unwrap();
        assert_eq!(loaded, doc_map);
    }

    #[test]
    fn build_skips_unreadable_documents() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IndexPaths::in_dir(dir.path());

        let docs: Vec<Result<(DocId, String)>> = vec![
            Ok((1, "hello world".to_string())),
            Err(IndexError::CorpusRead {
                doc_id: 2,
                reason: "permission denied".to_string(),
            }),
        ];

        let report = build(fixed(docs, HashMap::new()), &paths).unwrap();
        assert_eq!(report.documents_indexed, 1);
        assert_eq!(report.documents_skipped, 1);
    }

    #[test]
    fn existing_artifacts_skip_rebuild_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = IndexPaths::in_dir(dir.path());

        let docs = vec![Ok((1u32, "hello".to_string()))];
        build(fixed(docs, HashMap::new()), &paths).unwrap();

        let skipped = build(
            fixed(vec![Ok((1u32, "hello".to_string()))], HashMap::new()),
            &paths,
        )
        .unwrap();
        assert_eq!(skipped, IndexStats::default());

        paths.force_rebuild = true;
        let rebuilt = build(
            fixed(vec![Ok((1u32, "hello world".to_string()))], HashMap::new()),
            &paths,
        )
        .unwrap();
        assert_eq!(rebuilt.documents_indexed, 1);
    }

    #[test]
    fn corrupted_trie_artifact_triggers_full_rebuild_instead_of_skipping() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IndexPaths::in_dir(dir.path());

        let docs = vec![Ok((1u32, "hello world".to_string()))];
        build(fixed(docs, HashMap::new()), &paths).unwrap();

        // Simulate a crash mid-write: truncate the trie file to a single
        // malformed line.
        let mut f = File::create(&paths.trie_path).unwrap();
        f.write_all(b"not-enough-fields\n").unwrap();
        drop(f);

        let docs = vec![Ok((1u32, "hello world again".to_string()))];
        let report = build(fixed(docs, HashMap::new()), &paths).unwrap();
        assert_eq!(
            report.documents_indexed, 1,
            "a corrupted artifact must not be treated as up to date"
        );
    }
}
