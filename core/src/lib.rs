pub mod aggregate;
pub mod error;
pub mod index;
pub mod query;
pub mod source;
pub mod stats;
pub mod tokenizer;

pub use aggregate::{combine, rank, score};
pub use error::{Result, SearchError};
pub use index::{
    Corpus, DocumentId, DocumentMatch, IndexBuilder, InvertedIndex, LineFrequencies, LineNo,
};
pub use query::TermPattern;
pub use stats::IndexStats;
