//! Corpus-wide term statistics used for z-score ranking.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Finalized per-term statistics, as persisted in the stats file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermStats {
    pub mu: f64,
    pub sigma: f64,
    pub df: u32,
}

/// Build-time accumulator for one term: document frequency, sum of term
/// frequencies, and sum of squared term frequencies.
#[derive(Debug, Default, Clone, Copy)]
struct RawAccumulator {
    df: u32,
    sum_tf: u64,
    sum_tf2: u64,
}

impl RawAccumulator {
    fn observe(&mut self, tf: u32) {
        self.df += 1;
        self.sum_tf += tf as u64;
        self.sum_tf2 += (tf as u64) * (tf as u64);
    }

    fn finalize(self) -> TermStats {
        let df = self.df;
        let mu = self.sum_tf as f64 / df as f64;
        let variance = self.sum_tf2 as f64 / df as f64 - mu * mu;
        let sigma = variance.max(0.0).sqrt();
        TermStats { mu, sigma, df }
    }
}

/// Accumulates raw per-term frequency statistics during a build, then
/// finalizes and serves them as an immutable lookup table.
#[derive(Debug, Default)]
pub struct StatsTable {
    raw: HashMap<String, RawAccumulator>,
    finalized: HashMap<String, TermStats>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `(term, tf)` occurrence in a single document. Must be
    /// called exactly once per distinct `(term, document)` pair, mirroring
    /// the trie's insert contract.
    pub fn observe(&mut self, term: &str, tf: u32) {
        self.raw.entry(term.to_string()).or_default().observe(tf);
    }

    /// Compute mu/sigma for every observed term. Idempotent: safe to call
    /// once after the build pass completes.
    pub fn finalize(&mut self) {
        self.finalized = self
            .raw
            .iter()
            .map(|(term, acc)| (term.clone(), acc.finalize()))
            .collect();
    }

    /// Look up a term's finalized statistics.
    pub fn stats(&self, term: &str) -> Option<TermStats> {
        self.finalized.get(term).copied()
    }

    /// Number of distinct terms with finalized statistics.
    pub fn term_count(&self) -> u32 {
        self.finalized.len() as u32
    }

    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), &self.finalized)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let finalized: HashMap<String, TermStats> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self {
            raw: HashMap::new(),
            finalized,
        })
    }
}

/// z-score of a term frequency against its corpus-wide mean and standard
/// deviation. Missing statistics and a degenerate (zero) standard deviation
/// both fall back to a defined, non-panicking value.
pub fn z_score(tf: u32, stats: Option<TermStats>) -> f64 {
    match stats {
        None => 0.0,
        Some(TermStats { mu, sigma, .. }) if sigma <= 0.0 => {
            if tf as f64 > mu {
                1.0
            } else {
                0.0
            }
        }
        Some(TermStats { mu, sigma, .. }) => (tf as f64 - mu) / sigma,
    }
}
