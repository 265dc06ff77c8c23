//! textdex: a self-contained Boolean text search engine.
//!
//! A compact radix trie holds the inverted index; a small query pipeline
//! turns a Boolean expression into a postfix token stream and evaluates it
//! against the trie's posting lists; a z-score ranker orders the resulting
//! document ids by how unusually often each query term occurs in them
//! relative to the rest of the corpus.
//!
//! ## Layout
//! - [`trie`]: the radix trie and its pre-order text serialization.
//! - [`stats`]: corpus-wide term statistics (mean/standard deviation of
//!   term frequency) and the z-score function.
//! - [`query`]: lexer, shunting-yard parser, and postfix evaluator.
//! - [`ranker`]: orders a Boolean result set by mean query-term z-score.
//! - [`indexer`]: drives one build pass over a corpus into the three
//!   on-disk artifacts.
//! - [`corpus`]: `FsCorpus`, the reference filesystem corpus collaborator.
//! - [`retriever`]: loads those artifacts and answers searches.
//! - [`config`]: [`IndexPaths`], the shared build/load configuration.
//! - [`error`]: the crate's unified error type.

pub mod config;
pub mod corpus;
pub mod error;
pub mod indexer;
pub mod query;
pub mod ranker;
pub mod retriever;
pub mod stats;
pub mod trie;

pub use config::IndexPaths;
pub use corpus::{Corpus, FsCorpus};
pub use error::{IndexError, Result};
pub use indexer::{build as build_index, load_doc_map, IndexStats};
pub use query::{evaluate, query_terms, to_postfix, tokenize, Token};
pub use ranker::rank;
pub use retriever::Retriever;
pub use stats::{z_score, StatsTable, TermStats};
pub use trie::{DocId, Posting, TermFreq, Trie};
