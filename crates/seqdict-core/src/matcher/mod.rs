//! Exact and approximate matching of stored keys inside token sequences.
//!
//! A `Matcher` borrows a built `TrieMap` and answers four kinds of queries:
//! all occurrences, greedy non-overlapping occurrences, full segmentation,
//! and k-best approximate matches under an edit-cost model, optionally
//! combining several entries to cover the input.

mod cost;
mod cover;
mod exact;
mod search;
#[cfg(test)]
pub(crate) mod testutil;
mod types;

#[cfg(test)]
mod tests;

use std::hash::Hash;

use tracing::{debug, debug_span};

use crate::settings::settings;
use crate::trie::TrieMap;

pub use cost::{EditCost, UnitCost};
pub use types::{ApproxMatch, Match};

use search::{best_first, EndMode, SearchParams};

/// Options for [`Matcher::find_closest_matches_with`].
///
/// `Default` reads the global [`settings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosestOptions {
    /// Combine several entries into covers of the whole input.
    pub combine_matches: bool,
    /// Keep covers that spell the same key sequence at the same cost.
    pub keep_all_alternatives: bool,
    /// Discard matches costing more than this.
    pub max_cost: Option<u32>,
    /// Upper bound on settled search states per query.
    pub max_expansions: usize,
}

impl Default for ClosestOptions {
    fn default() -> Self {
        let s = settings();
        Self {
            combine_matches: s.cover.combine_matches,
            keep_all_alternatives: s.cover.keep_all_alternatives,
            max_cost: s.search.max_cost,
            max_expansions: s.search.max_expansions,
        }
    }
}

impl ClosestOptions {
    pub fn combine_matches(mut self, yes: bool) -> Self {
        self.combine_matches = yes;
        self
    }

    pub fn keep_all_alternatives(mut self, yes: bool) -> Self {
        self.keep_all_alternatives = yes;
        self
    }

    pub fn max_cost(mut self, max_cost: Option<u32>) -> Self {
        self.max_cost = max_cost;
        self
    }

    pub fn max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}

/// Read-only query interface over a built trie.
pub struct Matcher<'t, T, V, C = UnitCost> {
    trie: &'t TrieMap<T, V>,
    cost: C,
}

impl<'t, T, V> Matcher<'t, T, V, UnitCost> {
    pub fn new(trie: &'t TrieMap<T, V>) -> Self {
        Self {
            trie,
            cost: UnitCost,
        }
    }
}

impl<'t, T, V, C> Matcher<'t, T, V, C> {
    /// Matcher with a custom edit-cost model for approximate queries.
    pub fn with_cost(trie: &'t TrieMap<T, V>, cost: C) -> Self {
        Self { trie, cost }
    }

    pub fn trie(&self) -> &'t TrieMap<T, V> {
        self.trie
    }
}

impl<'t, T, V, C> Matcher<'t, T, V, C>
where
    T: Eq + Hash + Clone,
    V: Clone,
    C: EditCost<T>,
{
    /// The `k` stored keys closest to `input` under the edit-cost model,
    /// cheapest first, using default [`ClosestOptions`].
    pub fn find_closest_matches(&self, input: &[T], k: usize) -> Vec<ApproxMatch<T, V>> {
        self.find_closest_matches_with(input, k, &ClosestOptions::default())
    }

    /// The `k` cheapest approximate matches of `input`.
    ///
    /// Without `combine_matches`, each result is one stored key aligned
    /// against the whole input. With it, results are covers: sequences of
    /// entries whose spans tile the input, priced by their total cost.
    pub fn find_closest_matches_with(
        &self,
        input: &[T],
        k: usize,
        opts: &ClosestOptions,
    ) -> Vec<ApproxMatch<T, V>> {
        let _span = debug_span!(
            "find_closest_matches",
            k,
            len = input.len(),
            combine = opts.combine_matches
        )
        .entered();
        if k == 0 || input.is_empty() || self.trie.is_empty() {
            return Vec::new();
        }

        if opts.combine_matches {
            let oversample = settings().cover.oversample;
            return cover::k_best_covers(self.trie, &self.cost, input, k, opts, oversample);
        }

        let params = SearchParams {
            start: 0,
            mode: EndMode::Whole,
            per_end: k,
            cost_limit: opts.max_cost,
            budget: opts.max_expansions,
        };
        let outcome = best_first(self.trie, &self.cost, input, &params);
        let n = input.len();
        let results: Vec<ApproxMatch<T, V>> = outcome
            .hits
            .into_iter()
            .map(|hit| ApproxMatch {
                key: self.trie.key_at(hit.node),
                value: self.trie.value_at(hit.node).cloned(),
                start: 0,
                end: n,
                cost: hit.cost,
                components: Vec::new(),
            })
            .collect();

        debug!(
            result_count = results.len(),
            expansions = outcome.expansions,
            truncated = outcome.truncated,
            best_cost = results.first().map(|m| m.cost)
        );
        results
    }
}
