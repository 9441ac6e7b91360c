use crate::index::InvertedIndex;
use serde::Serialize;

/// Corpus-wide counts derived from a built index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub files_indexed: usize,
    pub unique_terms: usize,
    pub total_terms: u64,
    pub average_terms_per_file: u64,
    pub smallest_file: Option<String>,
    pub largest_file: Option<String>,
}

impl IndexStats {
    pub fn from_index(index: &InvertedIndex) -> Self {
        let files_indexed = index.num_documents();
        let total_terms: u64 = index.documents().map(|(_, n)| n).sum();
        let average_terms_per_file = if files_indexed == 0 {
            0
        } else {
            total_terms / files_indexed as u64
        };

        let mut smallest: Option<(&str, u64)> = None;
        let mut largest: Option<(&str, u64)> = None;
        // documents() iterates in id order, so strict comparisons keep the first id on ties.
        for (id, n) in index.documents() {
            if smallest.map_or(true, |(_, s)| n < s) { smallest = Some((id, n)); }
            if largest.map_or(true, |(_, l)| n > l) { largest = Some((id, n)); }
        }

        IndexStats {
            files_indexed,
            unique_terms: index.num_terms(),
            total_terms,
            average_terms_per_file,
            smallest_file: smallest.map(|(id, _)| id.to_string()),
            largest_file: largest.map(|(id, _)| id.to_string()),
        }
    }
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Number of files indexed - {}", self.files_indexed)?;
        writeln!(f, "Number of unique words - {}", self.unique_terms)?;
        writeln!(f, "Total amount of words - {}", self.total_terms)?;
        writeln!(f, "Average words per file - {}", self.average_terms_per_file)?;
        writeln!(f, "Smallest file - {}", self.smallest_file.as_deref().unwrap_or("-"))?;
        write!(f, "Largest file - {}", self.largest_file.as_deref().unwrap_or("-"))
    }
}
