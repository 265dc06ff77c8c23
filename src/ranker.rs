//! Ranks a Boolean result set by mean per-term z-score.

use crate::stats::{z_score, StatsTable};
use crate::trie::{DocId, Trie};
use std::collections::HashSet;

/// Score and order `candidates` by the mean z-score of `query_terms` each
/// document actually contains. Documents with zero matching query terms are
/// dropped — this is a defensive backstop: with only AND/OR in the query
/// language a candidate always contains at least one query term, but the
/// ranker does not assume it.
///
/// Ties are broken by ascending document id, for reproducible ordering.
pub fn rank(
    candidates: &HashSet<DocId>,
    query_terms: &HashSet<String>,
    trie: &Trie,
    stats: &StatsTable,
) -> Vec<DocId> {
    let mut scored: Vec<(f64, DocId)> = candidates
        .iter()
        .filter_map(|&doc_id| relevance(doc_id, query_terms, trie, stats).map(|r| (r, doc_id)))
        .collect();

    scored.sort_by(|(score_a, id_a), (score_b, id_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap()
            .then_with(|| id_a.cmp(id_b))
    });

    scored.into_iter().map(|(_, doc_id)| doc_id).collect()
}

fn relevance(
    doc_id: DocId,
    query_terms: &HashSet<String>,
    trie: &Trie,
    stats: &StatsTable,
) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0u32;

    for term in query_terms {
        let tf = trie
            .lookup(term)
            .iter()
            .find(|p| p.doc_id == doc_id)
            .map(|p| p.term_freq);

        if let Some(tf) = tf {
            if tf > 0 {
                total += z_score(tf, stats.stats(term));
                count += 1;
            }
        }
    }

    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}
