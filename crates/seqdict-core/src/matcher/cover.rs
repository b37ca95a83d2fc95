use std::collections::HashSet;
use std::hash::Hash;

use tracing::{debug, debug_span};

use super::cost::EditCost;
use super::search::{best_first, EndMode, Hit, SearchParams};
use super::{ApproxMatch, ClosestOptions, Match};
use crate::trie::TrieMap;

/// One entry in the top-K list of a position: accumulated cost, the edge
/// that reached the position, and the `(position, rank)` it continues from.
#[derive(Clone, Copy)]
struct KEntry {
    cost: u32,
    edge: usize,
    prev: Option<(usize, usize)>,
}

/// k lowest-cost covers of `input`, as k-shortest paths over the implicit
/// DAG whose edge `i -> j` is an approximate match of `input[i..j]`.
///
/// The DAG is explored in passes under a total-cost limit that starts at 0
/// and grows geometrically. A pass that completes has seen every cover
/// within its limit, so its ranking is exact; the search stops once a pass
/// fills the result list or nothing beyond the limit remains. If the
/// expansion budget runs out mid-pass, the last completed pass is returned,
/// which may hold fewer than k covers but never a costlier one in place of
/// a cheaper one.
pub(crate) fn k_best_covers<T, V, C>(
    trie: &TrieMap<T, V>,
    cost_fn: &C,
    input: &[T],
    k: usize,
    opts: &ClosestOptions,
    oversample: usize,
) -> Vec<ApproxMatch<T, V>>
where
    T: Eq + Hash + Clone,
    V: Clone,
    C: EditCost<T>,
{
    let n = input.len();
    let _span = debug_span!("cover_search", k, n).entered();
    if n == 0 || k == 0 {
        return Vec::new();
    }
    let cap = if opts.keep_all_alternatives {
        k
    } else {
        k.saturating_mul(oversample.max(1))
    };

    let mut budget = opts.max_expansions;
    let mut limit = 0u32;
    let mut passes = 0usize;
    let mut results = Vec::new();
    loop {
        passes += 1;
        let Some(pass) = cover_pass(trie, cost_fn, input, cap, limit, &mut budget) else {
            debug!(limit, "cover search budget exhausted");
            break;
        };
        results = collect_covers(trie, input, &pass, k, opts.keep_all_alternatives);
        if pass.lists[n].len() >= cap || results.len() >= k {
            break;
        }
        let Some(next) = pass.next_limit else {
            break;
        };
        let mut next = next.max(limit.saturating_mul(2));
        if let Some(max) = opts.max_cost {
            if limit >= max {
                break;
            }
            next = next.min(max);
        }
        limit = next;
    }

    debug!(
        result_count = results.len(),
        passes,
        limit,
        best_cost = results.first().map(|m| m.cost)
    );
    results
}

/// Edges and top-K lists found under one total-cost limit.
struct CoverPass {
    edges: Vec<Hit>,
    lists: Vec<Vec<KEntry>>,
    /// Cheapest total cost seen above the limit; `None` if nothing was cut.
    next_limit: Option<u32>,
}

impl CoverPass {
    fn note_clipped(&mut self, total: u32, limit: u32) {
        if total > limit {
            self.next_limit = Some(self.next_limit.map_or(total, |c| c.min(total)));
        }
    }
}

/// One left-to-right pass over the positions, keeping only paths whose total
/// cost is at most `limit`.
///
/// Every reachable position runs one best-first search for keys starting
/// there and relaxes the hits into the top-K lists of their end positions.
/// Because all edges point forward, a position's list is final by the time
/// it is expanded. Returns `None` if the budget runs out.
fn cover_pass<T, V, C>(
    trie: &TrieMap<T, V>,
    cost_fn: &C,
    input: &[T],
    cap: usize,
    limit: u32,
    budget: &mut usize,
) -> Option<CoverPass>
where
    T: Eq + Hash + Clone,
    C: EditCost<T>,
{
    let n = input.len();
    let mut pass = CoverPass {
        edges: Vec::new(),
        lists: vec![Vec::new(); n + 1],
        next_limit: None,
    };
    pass.lists[0].push(KEntry {
        cost: 0,
        edge: usize::MAX,
        prev: None,
    });

    for pos in 0..n {
        let Some(head) = pass.lists[pos].first() else {
            continue;
        };
        let base = head.cost;
        let Some(cost_limit) = edge_cost_limit(&pass.lists[n], cap, limit, base) else {
            continue;
        };

        let params = SearchParams {
            start: pos,
            mode: EndMode::Any,
            per_end: cap,
            cost_limit: Some(cost_limit),
            budget: *budget,
        };
        let outcome = best_first(trie, cost_fn, input, &params);
        *budget = budget.saturating_sub(outcome.expansions);
        if outcome.truncated {
            return None;
        }
        if let Some(cost) = outcome.clipped {
            pass.note_clipped(base.saturating_add(cost), limit);
        }

        for hit in outcome.hits {
            let edge = pass.edges.len();
            pass.edges.push(hit);
            for rank in 0..pass.lists[pos].len() {
                let total = pass.lists[pos][rank].cost.saturating_add(hit.cost);
                if total > limit {
                    pass.note_clipped(total, limit);
                    break;
                }
                let entry = KEntry {
                    cost: total,
                    edge,
                    prev: Some((pos, rank)),
                };
                // Ranks are sorted, so once one is rejected the rest are too.
                if !insert_top_k(&mut pass.lists[hit.end], cap, entry) {
                    break;
                }
            }
        }
    }
    Some(pass)
}

/// Largest edge cost out of a position reached at `base` that can still
/// produce a cover within `limit`.
///
/// Once the final list is full, only covers cheaper than its last entry
/// can enter it. `None` when nothing from this position can.
fn edge_cost_limit(last_list: &[KEntry], cap: usize, limit: u32, base: u32) -> Option<u32> {
    let mut bound = limit;
    if last_list.len() >= cap {
        if let Some(last) = last_list.last() {
            if base >= last.cost {
                return None;
            }
            bound = bound.min(last.cost);
        }
    }
    bound.checked_sub(base)
}

/// Backtrace the finished list into at most `k` results, collapsing covers
/// with the same key and cost unless every alternative is kept.
fn collect_covers<T, V>(
    trie: &TrieMap<T, V>,
    input: &[T],
    pass: &CoverPass,
    k: usize,
    keep_all: bool,
) -> Vec<ApproxMatch<T, V>>
where
    T: Eq + Hash + Clone,
    V: Clone,
{
    let n = input.len();
    let mut results: Vec<ApproxMatch<T, V>> = Vec::new();
    let mut seen: HashSet<(Vec<T>, u32)> = HashSet::new();
    for (rank, entry) in pass.lists[n].iter().enumerate() {
        if results.len() >= k {
            break;
        }
        let path = backtrace(&pass.lists, &pass.edges, n, rank);
        let m = build_match(trie, input, &path, entry.cost);
        if keep_all || seen.insert((m.key.clone(), m.cost)) {
            results.push(m);
        }
    }
    results
}

/// Insert into a top-K list kept in ascending cost order, bounded at `k`.
/// Equal costs keep insertion order. Returns false if the entry was rejected.
fn insert_top_k(list: &mut Vec<KEntry>, k: usize, entry: KEntry) -> bool {
    let pos = list.partition_point(|e| e.cost <= entry.cost);
    if pos >= k {
        return false;
    }
    list.insert(pos, entry);
    if list.len() > k {
        list.pop();
    }
    true
}

/// Reconstruct the edges of the path ending at `(end, rank)`, in input order.
fn backtrace(top_k: &[Vec<KEntry>], edges: &[Hit], end: usize, rank: usize) -> Vec<(usize, Hit)> {
    let mut path = Vec::new();
    let mut cur = (end, rank);
    loop {
        let entry = &top_k[cur.0][cur.1];
        match entry.prev {
            Some(prev) => {
                path.push((prev.0, edges[entry.edge]));
                cur = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

fn build_match<T, V>(
    trie: &TrieMap<T, V>,
    input: &[T],
    path: &[(usize, Hit)],
    cost: u32,
) -> ApproxMatch<T, V>
where
    T: Eq + Hash + Clone,
    V: Clone,
{
    let end = input.len();
    if let [(start, hit)] = path {
        return ApproxMatch {
            key: trie.key_at(hit.node),
            value: trie.value_at(hit.node).cloned(),
            start: *start,
            end,
            cost,
            components: Vec::new(),
        };
    }
    let components: Vec<Match<T, V>> = path
        .iter()
        .map(|&(start, hit)| Match {
            key: trie.key_at(hit.node),
            value: trie.value_at(hit.node).cloned(),
            start,
            end: hit.end,
        })
        .collect();
    let key = components.iter().flat_map(|m| m.key.iter().cloned()).collect();
    ApproxMatch {
        key,
        value: None,
        start: 0,
        end,
        cost,
        components,
    }
}
