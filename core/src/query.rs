//! The three query forms over a built [`InvertedIndex`].
//!
//! Exact lookup tells "term never indexed" (`None`) apart from a result list. Conjunctive and
//! pattern lookups always return a list, possibly empty; there is no separate "not found" for them.

use crate::aggregate::combine;
use crate::error::{Result, SearchError};
use crate::index::{DocumentMatch, InvertedIndex, LineFrequencies};
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeMap, HashMap};

impl InvertedIndex {
    /// Documents containing `term`, compared case-insensitively.
    ///
    /// Returns `None` when the term was never indexed.
    pub fn lookup_exact(&self, term: &str) -> Option<Vec<DocumentMatch>> {
        self.postings(&term.to_lowercase()).map(<[DocumentMatch]>::to_vec)
    }

    /// Documents containing every one of `terms`, with the line frequencies of all terms merged.
    ///
    /// An empty term list, or any term absent from the index, yields an empty result.
    pub fn lookup_all<S: AsRef<str>>(&self, terms: &[S]) -> Vec<DocumentMatch> {
        let mut distinct: Vec<String> = Vec::with_capacity(terms.len());
        for term in terms {
            let term = term.as_ref().to_lowercase();
            if !distinct.contains(&term) {
                distinct.push(term);
            }
        }
        if distinct.is_empty() {
            return Vec::new();
        }

        let lists: Vec<&[DocumentMatch]> = distinct
            .iter()
            .map(|t| self.postings(t).unwrap_or(&[]))
            .collect();

        // Each list holds a document at most once, so reaching the term count means every
        // term is present.
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for list in &lists {
            for m in list.iter() {
                *seen.entry(m.document.as_str()).or_insert(0) += 1;
            }
        }
        let mut qualifying: Vec<&str> = seen
            .into_iter()
            .filter(|(_, n)| *n == distinct.len())
            .map(|(doc, _)| doc)
            .collect();
        qualifying.sort_unstable();

        qualifying
            .into_iter()
            .map(|doc| {
                let records = lists.iter().filter_map(|list| find_document(list, doc));
                DocumentMatch::new(doc, combine(records))
            })
            .collect()
    }

    /// Documents containing any term that fully matches the regular expression `pattern`.
    ///
    /// Matching ignores case. Line frequencies of all matching terms are merged per document.
    ///
    /// Case is folded by the regex engine, not by lowercasing the pattern text first. The two
    /// differ for characters whose lowercase form is longer than the original (`İ` lowercases
    /// to `i̇`), which a case-insensitive match does not treat as equal.
    pub fn lookup_pattern(&self, pattern: &str) -> Result<Vec<DocumentMatch>> {
        let matcher = TermPattern::regex(pattern)?;
        Ok(self.lookup_matching(&matcher))
    }

    /// Like [`lookup_pattern`](Self::lookup_pattern) with shell-style `*` and `?` wildcards.
    pub fn lookup_wildcard(&self, pattern: &str) -> Result<Vec<DocumentMatch>> {
        let matcher = TermPattern::wildcard(pattern)?;
        Ok(self.lookup_matching(&matcher))
    }

    pub fn lookup_matching(&self, pattern: &TermPattern) -> Vec<DocumentMatch> {
        let mut grouped: BTreeMap<&str, Vec<&LineFrequencies>> = BTreeMap::new();
        for term in self.terms().filter(|t| pattern.matches(t)) {
            for m in self.postings(term).unwrap_or(&[]) {
                grouped.entry(m.document.as_str()).or_default().push(&m.lines);
            }
        }
        grouped
            .into_iter()
            .map(|(doc, records)| DocumentMatch::new(doc, combine(records)))
            .collect()
    }
}

fn find_document<'a>(list: &'a [DocumentMatch], doc: &str) -> Option<&'a LineFrequencies> {
    list.binary_search_by(|m| m.document.as_str().cmp(doc))
        .ok()
        .map(|i| &list[i].lines)
}

/// A compiled whole-term pattern.
#[derive(Debug, Clone)]
pub struct TermPattern {
    source: String,
    regex: Regex,
}

impl TermPattern {
    /// Compile a regular expression that must match an entire term.
    pub fn regex(pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{pattern})$");
        let regex = RegexBuilder::new(&anchored)
            .case_insensitive(true)
            .build()
            .map_err(|source| SearchError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { source: pattern.to_string(), regex })
    }

    /// `*` matches any run of characters, `?` exactly one; everything else is literal.
    pub fn wildcard(pattern: &str) -> Result<Self> {
        let mut translated = String::with_capacity(pattern.len() * 2);
        for ch in pattern.chars() {
            match ch {
                '*' => translated.push_str(".*"),
                '?' => translated.push('.'),
                _ => translated.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
            }
        }
        let mut compiled = Self::regex(&translated)?;
        compiled.source = pattern.to_string();
        Ok(compiled)
    }

    pub fn as_str(&self) -> &str { &self.source }

    pub fn matches(&self, term: &str) -> bool { self.regex.is_match(term) }
}
