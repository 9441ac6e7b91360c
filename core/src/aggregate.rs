use crate::index::{DocumentMatch, LineFrequencies};
use std::cmp::Reverse;

/// Merge several line-frequency records into one.
///
/// The result holds every line present in any input, with the counts for that line summed.
/// Order of the inputs does not matter.
pub fn combine<'a, I>(records: I) -> LineFrequencies
where
    I: IntoIterator<Item = &'a LineFrequencies>,
{
    let mut merged = LineFrequencies::new();
    for record in records {
        for (line, count) in record.iter() {
            merged.add(line, count);
        }
    }
    merged
}

/// Total number of occurrences in a record, used to rank results.
pub fn score(record: &LineFrequencies) -> u64 {
    record.score()
}

/// Order matches by score, highest first; equal scores fall back to document id.
pub fn rank(matches: &mut [DocumentMatch]) {
    matches.sort_by(|a, b| {
        Reverse(a.score())
            .cmp(&Reverse(b.score()))
            .then_with(|| a.document.cmp(&b.document))
    });
}
