use std::path::Path;

use seqdict_core::TrieMap;

use crate::dict_source::{load_word_list, tokenize};

pub(crate) fn open(dict_file: &str) -> TrieMap<String, String> {
    die!(
        load_word_list(Path::new(dict_file)),
        "Error loading word list: {}"
    )
}

pub fn info(dict_file: &str) {
    let dict = open(dict_file);
    let max_len = dict.keys().map(|k| k.len()).max().unwrap_or(0);
    println!("entries:     {}", dict.len());
    println!("nodes:       {}", dict.node_count());
    println!("longest key: {max_len} tokens");
}

pub fn lookup(dict_file: &str, key: &str) {
    let dict = open(dict_file);
    match dict.get(&tokenize(key)) {
        Some(value) => println!("{value}"),
        None => {
            eprintln!("not found: {key}");
            std::process::exit(1);
        }
    }
}

pub fn prefix(dict_file: &str, prefix: &str, n: usize) {
    let dict = open(dict_file);
    let tokens = tokenize(prefix);
    let mut count = 0;
    for (key, value) in dict.predict(&tokens).take(n) {
        println!("{}\t{}", key.join(" "), value);
        count += 1;
    }
    if count == 0 {
        eprintln!("no keys start with: {prefix}");
    }
}
