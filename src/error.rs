//! Error types for the search engine core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed trie file: {0}")]
    TrieFormat(String),

    #[error("could not read document {doc_id}: {reason}")]
    CorpusRead { doc_id: u32, reason: String },

    #[error("malformed query: {0}")]
    MalformedQuery(String),
}
