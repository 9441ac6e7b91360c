use serde::Serialize;
use std::collections::{btree_map, BTreeMap, HashMap};

pub type DocumentId = String;
/// 1-based line number within a document.
pub type LineNo = u32;

/// Per-line occurrence counts for one term (or one query) within one document.
///
/// Lines that never matched are absent; a stored count is always at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LineFrequencies(BTreeMap<LineNo, u32>);

impl LineFrequencies {
    pub fn new() -> Self { Self::default() }

    /// Count one more occurrence on `line`.
    pub fn record(&mut self, line: LineNo) {
        self.add(line, 1);
    }

    pub(crate) fn add(&mut self, line: LineNo, count: u32) {
        if count == 0 { return; }
        *self.0.entry(line).or_insert(0) += count;
    }

    pub fn get(&self, line: LineNo) -> Option<u32> { self.0.get(&line).copied() }

    /// Lines in ascending order.
    pub fn lines(&self) -> impl Iterator<Item = LineNo> + '_ { self.0.keys().copied() }

    pub fn iter(&self) -> impl Iterator<Item = (LineNo, u32)> + '_ {
        self.0.iter().map(|(l, c)| (*l, *c))
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Sum of all occurrence counts.
    pub fn score(&self) -> u64 {
        self.0.values().map(|&c| u64::from(c)).sum()
    }
}

impl FromIterator<(LineNo, u32)> for LineFrequencies {
    fn from_iter<I: IntoIterator<Item = (LineNo, u32)>>(iter: I) -> Self {
        let mut freqs = LineFrequencies::new();
        for (line, count) in iter {
            freqs.add(line, count);
        }
        freqs
    }
}

impl<'a> IntoIterator for &'a LineFrequencies {
    type Item = (&'a LineNo, &'a u32);
    type IntoIter = btree_map::Iter<'a, LineNo, u32>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// One document together with the line frequencies relevant to a term or query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMatch {
    pub document: DocumentId,
    pub lines: LineFrequencies,
}

impl DocumentMatch {
    pub fn new(document: impl Into<DocumentId>, lines: LineFrequencies) -> Self {
        Self { document: document.into(), lines }
    }

    pub fn score(&self) -> u64 { self.lines.score() }
}

/// Tokenized documents keyed by id, each an ordered list of lines of tokens.
pub type Corpus = BTreeMap<DocumentId, Vec<Vec<String>>>;

/// Term -> documents containing it, with per-line counts.
///
/// Built once by [`InvertedIndex::build`] or [`IndexBuilder::finish`] and read-only afterwards.
/// Every posting list holds at most one entry per document, sorted by document id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<DocumentMatch>>,
    /// Token count per document, including documents with no tokens.
    documents: BTreeMap<DocumentId, u64>,
}

impl InvertedIndex {
    pub fn build<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = (DocumentId, Vec<Vec<String>>)>,
    {
        let mut builder = IndexBuilder::new();
        for (id, lines) in documents {
            builder.add_document(id, &lines);
        }
        builder.finish()
    }

    /// Posting list for an already normalized term.
    pub fn postings(&self, term: &str) -> Option<&[DocumentMatch]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn num_documents(&self) -> usize { self.documents.len() }

    /// Documents in id order with their token counts.
    pub fn documents(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.documents.iter().map(|(id, n)| (id.as_str(), *n))
    }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }
}

/// Working state for one index build.
///
/// Records are keyed by (term, document) so a term seen again in the same document merges into its
/// existing record. Nothing is exposed until [`IndexBuilder::finish`] freezes it.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    records: HashMap<String, BTreeMap<DocumentId, LineFrequencies>>,
    documents: BTreeMap<DocumentId, u64>,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    /// Add a document's tokenized lines; line numbers are assigned from position starting at 1.
    ///
    /// Adding the same id twice merges into the same records.
    pub fn add_document(&mut self, id: impl Into<DocumentId>, lines: &[Vec<String>]) {
        let id = id.into();
        let mut tokens_seen = 0u64;
        for (idx, line) in lines.iter().enumerate() {
            let line_no = (idx + 1) as LineNo;
            for token in line {
                let term = token.to_lowercase();
                if term.is_empty() { continue; }
                tokens_seen += 1;
                let per_doc = self.records.entry(term).or_default();
                match per_doc.get_mut(&id) {
                    Some(freqs) => freqs.record(line_no),
                    None => {
                        let mut freqs = LineFrequencies::new();
                        freqs.record(line_no);
                        per_doc.insert(id.clone(), freqs);
                    }
                }
            }
        }
        *self.documents.entry(id).or_insert(0) += tokens_seen;
    }

    pub fn finish(self) -> InvertedIndex {
        let postings = self
            .records
            .into_iter()
            .map(|(term, per_doc)| {
                let list = per_doc
                    .into_iter()
                    .map(|(document, lines)| DocumentMatch { document, lines })
                    .collect();
                (term, list)
            })
            .collect();
        InvertedIndex { postings, documents: self.documents }
    }
}
