pub mod error;
pub mod index;
pub mod postings;
pub mod search;
pub mod source;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use error::{IndexError, Result};
pub use index::{build_index, IndexBuilder, SearchIndex};
pub use postings::{insert_last_occurrence, PostingsList};
pub use search::{Hit, Source, TOP_K};
pub use source::{build_from_files, FileSource, MemorySource, TokenSource};
pub use tokenizer::{normalize, NoiseWords};

/// A document name exactly as listed in the manifest.
pub type DocId = String;
/// A normalized, lower-case word eligible for indexing.
pub type Keyword = String;

/// One keyword's frequency in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub document: DocId,
    pub frequency: u32,
}

impl Occurrence {
    pub fn new(document: impl Into<DocId>, frequency: u32) -> Self {
        Self { document: document.into(), frequency }
    }
}

impl std::fmt::Display for Occurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.document, self.frequency)
    }
}
