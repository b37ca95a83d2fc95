//! Property-based tests for the trie and matcher.
//!
//! Random dictionaries over a four-token alphabet keep collisions, shared
//! prefixes and nested keys frequent. Results are checked against brute
//! force.

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use crate::matcher::{ClosestOptions, Matcher};
use crate::trie::TrieMap;

fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..4, 1..5)
}

fn arb_dict() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(arb_key(), 1..10)
}

fn arb_input() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..4, 0..9)
}

#[derive(Debug, Clone)]
enum Op {
    Put(Vec<u8>, u32),
    Remove(Vec<u8>),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (arb_key(), any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => arb_key().prop_map(Op::Remove),
    ]
}

fn build(keys: &[Vec<u8>]) -> TrieMap<u8, usize> {
    let mut trie = TrieMap::new();
    for (i, k) in keys.iter().enumerate() {
        trie.put(k, i).unwrap();
    }
    trie
}

fn levenshtein(a: &[u8], b: &[u8]) -> u32 {
    let mut row: Vec<u32> = (0..=b.len() as u32).collect();
    for (i, x) in a.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i as u32 + 1;
        for (j, y) in b.iter().enumerate() {
            let cur = row[j + 1];
            row[j + 1] = (prev + u32::from(x != y)).min(row[j] + 1).min(cur + 1);
            prev = cur;
        }
    }
    row[b.len()]
}

fn closest_opts(combine: bool) -> ClosestOptions {
    ClosestOptions {
        combine_matches: combine,
        keep_all_alternatives: true,
        max_cost: None,
        max_expansions: 1_000_000,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_trie_matches_model(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut trie: TrieMap<u8, u32> = TrieMap::new();
        let mut model: BTreeMap<Vec<u8>, u32> = BTreeMap::new();
        for op in ops {
            match op {
                Op::Put(k, v) => {
                    let prev = trie.put(&k, v).unwrap();
                    prop_assert_eq!(prev, model.insert(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(trie.remove(&k), model.remove(&k));
                }
            }
            prop_assert_eq!(trie.len(), model.len());
        }
        for (k, v) in &model {
            prop_assert_eq!(trie.get(k), Some(v));
        }
        let mut keys: Vec<Vec<u8>> = trie.keys().collect();
        keys.sort();
        let expected: Vec<Vec<u8>> = model.keys().cloned().collect();
        prop_assert_eq!(keys, expected);

        // No dead branches: every non-root node lies on a stored key's path.
        let mut prefixes: HashSet<Vec<u8>> = HashSet::new();
        for k in model.keys() {
            for i in 1..=k.len() {
                prefixes.insert(k[..i].to_vec());
            }
        }
        prop_assert_eq!(trie.node_count(), prefixes.len() + 1);
    }

    #[test]
    fn prop_find_all_matches_brute_force(keys in arb_dict(), input in arb_input()) {
        let trie = build(&keys);
        let matcher = Matcher::new(&trie);
        let found: Vec<(usize, usize)> = matcher
            .find_all_matches(&input)
            .iter()
            .map(|m| (m.start, m.end))
            .collect();
        let mut expected = Vec::new();
        for i in 0..input.len() {
            for j in i + 1..=input.len() {
                if trie.contains(&input[i..j]) {
                    expected.push((i, j));
                }
            }
        }
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_non_overlapping_and_tiling(keys in arb_dict(), input in arb_input()) {
        let trie = build(&keys);
        let matcher = Matcher::new(&trie);

        let greedy = matcher.find_non_overlapping(&input);
        for w in greedy.windows(2) {
            prop_assert!(w[0].end <= w[1].start);
        }
        for m in &greedy {
            prop_assert!(trie.contains(&m.key));
            prop_assert_eq!(&m.key[..], &input[m.start..m.end]);
        }

        let segments = matcher.segment(&input);
        prop_assert_eq!(segments[0].start, 0);
        prop_assert_eq!(segments.last().map(|m| m.end), Some(input.len()));
        for w in segments.windows(2) {
            prop_assert_eq!(w[0].end, w[1].start);
            // Gaps are maximal.
            prop_assert!(!(w[0].is_gap() && w[1].is_gap()));
        }
        let matched: Vec<(usize, usize)> = segments
            .iter()
            .filter(|m| !m.is_gap())
            .map(|m| (m.start, m.end))
            .collect();
        let greedy_spans: Vec<(usize, usize)> = greedy.iter().map(|m| (m.start, m.end)).collect();
        prop_assert_eq!(matched, greedy_spans);
    }

    #[test]
    fn prop_closest_matches_brute_force(keys in arb_dict(), input in arb_input(), k in 1usize..6) {
        let trie = build(&keys);
        let matcher = Matcher::new(&trie);
        let results = matcher.find_closest_matches_with(&input, k, &closest_opts(false));
        if input.is_empty() {
            prop_assert!(results.is_empty());
            return Ok(());
        }

        let mut distances: Vec<u32> = trie.keys().map(|key| levenshtein(&input, &key)).collect();
        distances.sort_unstable();
        distances.truncate(k);
        let costs: Vec<u32> = results.iter().map(|m| m.cost).collect();
        prop_assert_eq!(costs, distances);

        let mut seen = HashSet::new();
        for m in &results {
            prop_assert_eq!(m.cost, levenshtein(&input, &m.key));
            prop_assert_eq!(m.cost == 0, m.key == input);
            prop_assert!(seen.insert(m.key.clone()));
        }
    }

    #[test]
    fn prop_best_cover_is_optimal(keys in arb_dict(), input in prop::collection::vec(0u8..4, 1..8)) {
        let trie = build(&keys);
        let matcher = Matcher::new(&trie);
        let results = matcher.find_closest_matches_with(&input, 3, &closest_opts(true));
        prop_assert!(!results.is_empty());

        // dp[j] = cheapest cover of input[..j].
        let n = input.len();
        let all_keys: Vec<Vec<u8>> = trie.keys().collect();
        let mut dp = vec![u32::MAX; n + 1];
        dp[0] = 0;
        for j in 1..=n {
            for i in 0..j {
                if dp[i] == u32::MAX {
                    continue;
                }
                let edge = all_keys.iter().map(|key| levenshtein(&input[i..j], key)).min().unwrap_or(u32::MAX);
                dp[j] = dp[j].min(dp[i].saturating_add(edge));
            }
        }
        prop_assert_eq!(results[0].cost, dp[n]);

        for w in results.windows(2) {
            prop_assert!(w[0].cost <= w[1].cost);
        }
        for m in &results {
            prop_assert_eq!(m.span(), 0..n);
            if m.components.is_empty() {
                prop_assert_eq!(m.cost, levenshtein(&input, &m.key));
                continue;
            }
            let mut pos = 0;
            let mut total = 0;
            for c in &m.components {
                prop_assert_eq!(c.start, pos);
                prop_assert!(c.end > c.start);
                total += levenshtein(&input[c.start..c.end], &c.key);
                pos = c.end;
            }
            prop_assert_eq!(pos, n);
            prop_assert_eq!(total, m.cost);
        }
    }
}
