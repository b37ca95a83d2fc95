use std::collections::BTreeSet;

use crate::matcher::testutil::{cats_dict, hats_dict, joined, toks};
use crate::matcher::{ApproxMatch, ClosestOptions, EditCost, Matcher};
use crate::trie::TrieMap;

fn opts() -> ClosestOptions {
    ClosestOptions {
        combine_matches: false,
        keep_all_alternatives: true,
        max_cost: None,
        max_expansions: 100_000,
    }
}

fn summary(results: &[ApproxMatch<String, String>]) -> Vec<(String, u32)> {
    results.iter().map(|m| (joined(&m.key), m.cost)).collect()
}

fn tier(results: &[ApproxMatch<String, String>], cost: u32) -> BTreeSet<String> {
    results
        .iter()
        .filter(|m| m.cost == cost)
        .map(|m| joined(&m.key))
        .collect()
}

#[test]
fn test_closest_best_two() {
    let dict = hats_dict();
    let matcher = Matcher::new(&dict);
    let results = matcher.find_closest_matches_with(&toks("the black hat"), 2, &opts());

    assert_eq!(
        summary(&results),
        vec![
            ("a black hat".to_string(), 1),
            ("a black cat".to_string(), 2),
        ]
    );
    assert_eq!(results[0].span(), 0..3);
    assert_eq!(results[0].value.as_deref(), Some("a black hat"));
    assert!(!results[0].is_composite());
}

#[test]
fn test_closest_cost_tiers() {
    let dict = hats_dict();
    let matcher = Matcher::new(&dict);
    let results = matcher.find_closest_matches_with(&toks("the black"), 5, &opts());

    assert_eq!(results.len(), 5);
    let costs: Vec<u32> = results.iter().map(|m| m.cost).collect();
    assert_eq!(costs, vec![2, 2, 3, 3, 3]);
    assert_eq!(
        tier(&results, 2),
        BTreeSet::from(["a black cat".to_string(), "a black hat".to_string()])
    );
    assert_eq!(
        tier(&results, 3),
        BTreeSet::from([
            "a colored hat".to_string(),
            "a white cat".to_string(),
            "a white hat".to_string(),
        ])
    );
    for m in &results {
        assert_eq!(m.span(), 0..2);
    }
}

#[test]
fn test_closest_exact_match_costs_zero() {
    let dict = hats_dict();
    let matcher = Matcher::new(&dict);
    let results = matcher.find_closest_matches_with(&toks("a white cat"), 3, &opts());

    assert_eq!(results[0].cost, 0);
    assert!(results[0].is_exact());
    assert_eq!(joined(&results[0].key), "a white cat");
    assert!(results[1..].iter().all(|m| m.cost >= 1));
}

#[test]
fn test_closest_no_zero_cost_without_exact_match() {
    let dict = hats_dict();
    let matcher = Matcher::new(&dict);
    let results = matcher.find_closest_matches_with(&toks("a white"), 5, &opts());
    assert!(results.iter().all(|m| m.cost > 0));
}

#[test]
fn test_closest_input_shorter_than_keys() {
    let dict = hats_dict();
    let matcher = Matcher::new(&dict);
    let results = matcher.find_closest_matches_with(&toks("cat"), 2, &opts());

    assert_eq!(results.len(), 2);
    for m in &results {
        assert_eq!(m.cost, 2);
        assert_eq!(m.key.last().map(String::as_str), Some("cat"));
    }
}

#[test]
fn test_closest_results_are_distinct_and_sorted() {
    let dict = cats_dict();
    let matcher = Matcher::new(&dict);
    let results = matcher.find_closest_matches_with(&toks("a white cat sat"), 10, &opts());

    assert_eq!(results.len(), dict.len());
    let keys: BTreeSet<String> = results.iter().map(|m| joined(&m.key)).collect();
    assert_eq!(keys.len(), results.len());
    assert!(results.windows(2).all(|w| w[0].cost <= w[1].cost));
}

#[test]
fn test_closest_k_zero_and_empty_inputs() {
    let dict = hats_dict();
    let matcher = Matcher::new(&dict);
    assert!(matcher
        .find_closest_matches_with(&toks("a white cat"), 0, &opts())
        .is_empty());
    assert!(matcher
        .find_closest_matches_with(&[], 3, &opts())
        .is_empty());

    let empty: TrieMap<String, String> = TrieMap::new();
    let matcher = Matcher::new(&empty);
    assert!(matcher
        .find_closest_matches_with(&toks("a white cat"), 3, &opts())
        .is_empty());
}

#[test]
fn test_closest_max_cost() {
    let dict = hats_dict();
    let matcher = Matcher::new(&dict);
    let results =
        matcher.find_closest_matches_with(&toks("the black"), 5, &opts().max_cost(Some(2)));
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|m| m.cost <= 2));

    let none = matcher.find_closest_matches_with(&toks("the dog"), 5, &opts().max_cost(Some(1)));
    assert!(none.is_empty());
}

#[test]
fn test_closest_expansion_cap_returns_partial() {
    let dict = hats_dict();
    let matcher = Matcher::new(&dict);
    let results =
        matcher.find_closest_matches_with(&toks("the black"), 5, &opts().max_expansions(1));
    assert!(results.len() < 5);
}

#[test]
fn test_closest_default_options() {
    let dict = hats_dict();
    let matcher = Matcher::new(&dict);
    let results = matcher.find_closest_matches(&toks("the black hat"), 1);
    assert_eq!(summary(&results), vec![("a black hat".to_string(), 1)]);
}

/// Substitutions cost more than an insertion plus a deletion.
struct NoSubstitution;

impl EditCost<String> for NoSubstitution {
    fn substitution(&self, input: &String, key: &String) -> u32 {
        if input == key {
            0
        } else {
            5
        }
    }

    fn insertion(&self, _input: &String) -> u32 {
        1
    }

    fn deletion(&self, _key: &String) -> u32 {
        1
    }
}

#[test]
fn test_closest_custom_cost_model() {
    let dict = hats_dict();
    let matcher = Matcher::with_cost(&dict, NoSubstitution);
    let results = matcher.find_closest_matches_with(&toks("the black hat"), 2, &opts());

    // Skip "the" and drop "a" instead of substituting.
    assert_eq!(summary(&results)[0], ("a black hat".to_string(), 2));
    assert_eq!(results[1].cost, 4);
}

#[test]
fn test_closest_char_tokens() {
    let dict: TrieMap<char, &str> = ["kitten", "sitting", "mitten", "bitter"]
        .into_iter()
        .map(|w| (w.chars().collect::<Vec<_>>(), w))
        .collect();
    let matcher = Matcher::new(&dict);
    let input: Vec<char> = "sitten".chars().collect();
    let results = matcher.find_closest_matches_with(&input, 4, &opts());

    let by_word: Vec<(&str, u32)> = results
        .iter()
        .filter_map(|m| m.value.map(|v| (v, m.cost)))
        .collect();
    assert_eq!(by_word.len(), 4);
    // kitten and mitten are one substitution away; sitting and bitter two.
    assert_eq!(by_word[0].1, 1);
    assert_eq!(by_word[1].1, 1);
    assert_eq!(by_word[2].1, 2);
    assert_eq!(by_word[3].1, 2);
}
