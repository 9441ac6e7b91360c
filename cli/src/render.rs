use serde::Serialize;
use std::io::{self, Write};
use wordindex_core::{rank, DocumentMatch, LineFrequencies};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Hit<'a> {
    document: &'a str,
    score: u64,
    lines: &'a LineFrequencies,
}

/// Print matches best first, at most `limit` of them.
pub fn write_matches<W: Write>(
    out: &mut W,
    mut matches: Vec<DocumentMatch>,
    limit: Option<usize>,
    format: Format,
) -> io::Result<()> {
    rank(&mut matches);
    let shown = &matches[..limit.unwrap_or(matches.len()).min(matches.len())];
    match format {
        Format::Json => {
            let hits: Vec<Hit> = shown
                .iter()
                .map(|m| Hit { document: &m.document, score: m.score(), lines: &m.lines })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &hits)?;
            writeln!(out)
        }
        Format::Text => {
            if shown.is_empty() {
                return writeln!(out, "No matches");
            }
            for m in shown {
                writeln!(out, "{} - score: {}", m.document, m.score())?;
                for (line, count) in m.lines.iter() {
                    writeln!(out, "Line {line}, occurrences - {count}")?;
                }
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

/// Exact lookups keep "never indexed" apart from an empty list.
pub fn write_exact<W: Write>(
    out: &mut W,
    found: Option<Vec<DocumentMatch>>,
    limit: Option<usize>,
    format: Format,
) -> io::Result<()> {
    match (found, format) {
        (Some(matches), _) => write_matches(out, matches, limit, format),
        (None, Format::Json) => writeln!(out, "null"),
        (None, Format::Text) => writeln!(out, "Provided word wasn't found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DocumentMatch> {
        vec![
            DocumentMatch::new("a.txt", [(3, 1)].into_iter().collect()),
            DocumentMatch::new("b.txt", [(2, 2), (1, 1)].into_iter().collect()),
        ]
    }

    fn render(matches: Vec<DocumentMatch>, limit: Option<usize>, format: Format) -> String {
        let mut out = Vec::new();
        write_matches(&mut out, matches, limit, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_is_ranked_with_sorted_lines() {
        let text = render(sample(), None, Format::Text);
        assert_eq!(
            text,
            "b.txt - score: 3\nLine 1, occurrences - 1\nLine 2, occurrences - 2\n\n\
             a.txt - score: 1\nLine 3, occurrences - 1\n\n"
        );
        assert_eq!(render(Vec::new(), None, Format::Text), "No matches\n");
    }

    #[test]
    fn json_respects_limit() {
        let text = render(sample(), Some(1), Format::Json);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["document"], "b.txt");
        assert_eq!(arr[0]["score"], 3);
        assert_eq!(arr[0]["lines"]["2"], 2);
    }

    #[test]
    fn missing_term_message() {
        let mut out = Vec::new();
        write_exact(&mut out, None, None, Format::Text).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Provided word wasn't found\n");
    }
}
