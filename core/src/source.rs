//! Directory-backed document source: finds the text files directly inside a directory and turns
//! each into tokenized lines keyed by file name.

use crate::error::{Result, SearchError};
use crate::index::Corpus;
use crate::tokenizer::Tokenizer;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// File extension without the dot, compared exactly.
    pub extension: String,
    pub tokenizer: Tokenizer,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { extension: "txt".into(), tokenizer: Tokenizer::default() }
    }
}

impl SourceOptions {
    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self { extension: extension.into(), ..Self::default() }
    }
}

/// Files with the configured extension directly inside `dir`, sorted by path.
///
/// Symlinks are followed; a dangling link is an error rather than a skipped file.
pub fn discover(dir: &Path, options: &SourceOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
            SearchError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let p = entry.path();
        if p.extension().and_then(|s| s.to_str()) == Some(options.extension.as_str()) {
            tracing::debug!(path = %p.display(), "discovered document");
            files.push(p.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

pub fn read_document(path: &Path, tokenizer: &Tokenizer) -> Result<Vec<Vec<String>>> {
    let text = fs::read_to_string(path).map_err(|e| SearchError::io(path, e))?;
    Ok(tokenizer.tokenize_text(&text))
}

/// Read and tokenize every discovered file. Any unreadable file fails the whole load.
pub fn load_corpus(dir: &Path, options: &SourceOptions) -> Result<Corpus> {
    let mut corpus = Corpus::new();
    for path in discover(dir, options)? {
        let id = document_id(&path);
        let lines = read_document(&path, &options.tokenizer)?;
        corpus.insert(id, lines);
    }
    Ok(corpus)
}

fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
