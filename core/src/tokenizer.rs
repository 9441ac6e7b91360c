/// Characters that separate words within a line.
pub const DEFAULT_DELIMITERS: &[char] = &[',', '.', '!', '?', ' '];

/// Splits lines on a fixed delimiter set and lowercases the pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    delimiters: Vec<char>,
}

impl Default for Tokenizer {
    fn default() -> Self { Self::with_delimiters(DEFAULT_DELIMITERS.iter().copied()) }
}

impl Tokenizer {
    pub fn with_delimiters<I: IntoIterator<Item = char>>(delimiters: I) -> Self {
        Self { delimiters: delimiters.into_iter().collect() }
    }

    pub fn delimiters(&self) -> &[char] { &self.delimiters }

    pub fn tokenize_line(&self, line: &str) -> Vec<String> {
        line.split(self.delimiters.as_slice())
            .filter(|piece| !piece.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    /// One token list per line. Blank lines stay as empty lists so positions match line numbers.
    pub fn tokenize_text(&self, text: &str) -> Vec<Vec<String>> {
        split_lines(text).into_iter().map(|line| self.tokenize_line(line)).collect()
    }
}

/// Split on `\n`, `\r\n` or a lone `\r`. A terminator at the very end does not open an extra line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(&['\r', '\n'][..]) {
            Some(i) => {
                lines.push(&rest[..i]);
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Tokenize a single line with the default delimiters.
pub fn tokenize_line(line: &str) -> Vec<String> {
    Tokenizer::default().tokenize_line(line)
}

/// Tokenize every line of `text` with the default delimiters.
pub fn tokenize_text(text: &str) -> Vec<Vec<String>> {
    Tokenizer::default().tokenize_text(text)
}

/// Split the terms of a conjunctive query typed by a user: commas and/or whitespace separate terms.
pub fn parse_query_terms(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
