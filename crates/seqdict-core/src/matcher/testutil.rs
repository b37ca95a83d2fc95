use crate::trie::TrieMap;

pub(crate) fn toks(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

/// Dictionary with nested and overlapping keys.
pub(crate) fn cats_dict() -> TrieMap<String, String> {
    let mut trie = TrieMap::new();
    for key in [
        "a white cat",
        "a white hat",
        "a black cat",
        "a black cat climbed on the sofa",
        "white",
    ] {
        trie.put(&toks(key), key.to_string()).unwrap();
    }
    trie
}

/// Dictionary of same-length phrases for approximate matching.
pub(crate) fn hats_dict() -> TrieMap<String, String> {
    let mut trie = TrieMap::new();
    for key in [
        "a white cat",
        "a white hat",
        "a black cat",
        "a black hat",
        "a colored hat",
    ] {
        trie.put(&toks(key), key.to_string()).unwrap();
    }
    trie
}

pub(crate) fn joined<T: AsRef<str>>(key: &[T]) -> String {
    key.iter().map(|t| t.as_ref()).collect::<Vec<_>>().join(" ")
}
