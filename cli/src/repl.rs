use crate::render::{write_exact, write_matches, Format};
use anyhow::Result;
use std::io::{BufRead, Write};
use wordindex_core::tokenizer::parse_query_terms;
use wordindex_core::{IndexStats, InvertedIndex};

const HELP: &str = "Commands:
  exact <word>            documents containing the word
  all <w1>, <w2>, ...     documents containing every word
  pattern <regex>         documents with a word fully matching the regex
  wildcard <glob>         same, with * and ? wildcards
  stats                   corpus statistics
  help                    this message
  exit | quit             leave";

/// Read commands from `input` until end of input or `exit`, answering each against `index`.
pub fn run<R: BufRead, W: Write>(
    index: &InvertedIndex,
    input: R,
    out: &mut W,
    limit: Option<usize>,
) -> Result<()> {
    writeln!(out, "{}", IndexStats::from_index(index))?;
    write!(out, "> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((c, rest)) => (c, rest.trim()),
            None => (line, ""),
        };
        match command {
            "" => {}
            "exit" | "quit" => return Ok(()),
            "help" => writeln!(out, "{HELP}")?,
            "stats" => writeln!(out, "{}", IndexStats::from_index(index))?,
            "exact" if !arg.is_empty() => {
                write_exact(out, index.lookup_exact(arg), limit, Format::Text)?
            }
            "all" if !arg.is_empty() => {
                let matches = index.lookup_all(&parse_query_terms(arg));
                write_matches(out, matches, limit, Format::Text)?
            }
            "pattern" | "wildcard" if !arg.is_empty() => {
                let found = if command == "pattern" {
                    index.lookup_pattern(arg)
                } else {
                    index.lookup_wildcard(arg)
                };
                match found {
                    Ok(matches) => write_matches(out, matches, limit, Format::Text)?,
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
            "exact" | "all" | "pattern" | "wildcard" => {
                writeln!(out, "Usage: {command} <argument>")?
            }
            other => writeln!(out, "Illegal input {other:?}, try again (type help)")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordindex_core::tokenizer::tokenize_text;

    fn session(script: &str) -> String {
        let index = InvertedIndex::build([
            ("a.txt".to_string(), tokenize_text("the cat sat\nthe cat ran")),
            ("b.txt".to_string(), tokenize_text("a dog\nworld")),
        ]);
        let mut out = Vec::new();
        run(&index, script.as_bytes(), &mut out, None).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn answers_each_query_form() {
        let script = "exact CAT\nall cat, dog\npattern wor.*\nwildcard d?g\nexit\nexact cat\n";
        let out = session(script);
        let cat = "a.txt - score: 2\nLine 1, occurrences - 1\nLine 2, occurrences - 1\n";
        assert!(out.contains(cat));
        assert!(out.contains("No matches\n"));
        assert!(out.contains("b.txt - score: 1\nLine 2, occurrences - 1\n"));
        assert!(out.contains("b.txt - score: 1\nLine 1, occurrences - 1\n"));
        // Nothing after exit is answered.
        assert_eq!(out.matches("a.txt - score").count(), 1);
    }

    #[test]
    fn reports_bad_input_and_keeps_going() {
        let out = session("frobnicate\nexact\npattern (\nexact fish\n");
        assert!(out.contains("Illegal input \"frobnicate\""));
        assert!(out.contains("Usage: exact <argument>"));
        assert!(out.contains("invalid pattern \"(\""));
        assert!(out.contains("Provided word wasn't found"));
    }

    #[test]
    fn prints_statistics_banner() {
        let out = session("");
        assert!(out.starts_with("Number of files indexed - 2\n"));
    }
}
