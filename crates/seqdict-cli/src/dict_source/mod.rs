//! Plain-text word lists.
//!
//! One entry per line: the key's tokens separated by whitespace, then an
//! optional tab and value. Without a value the key text itself is stored.
//! Blank lines and lines starting with `#` are skipped.

use std::fs;
use std::io;
use std::path::Path;

use seqdict_core::TrieMap;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Split text into tokens on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

pub fn parse_word_list(content: &str) -> Result<TrieMap<String, String>, SourceError> {
    let mut trie = TrieMap::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let (key_text, value) = match line.split_once('\t') {
            Some((k, v)) => (k, v.trim().to_string()),
            None => (line, line.split_whitespace().collect::<Vec<_>>().join(" ")),
        };
        let key = tokenize(key_text);
        trie.put(&key, value).map_err(|e| SourceError::Parse {
            line: idx + 1,
            reason: e.to_string(),
        })?;
    }
    debug!(entries = trie.len(), nodes = trie.node_count(), "word list loaded");
    Ok(trie)
}

pub fn load_word_list(path: &Path) -> Result<TrieMap<String, String>, SourceError> {
    let content = fs::read_to_string(path)?;
    parse_word_list(&content)
}
