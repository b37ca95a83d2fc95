use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use tracing::{debug, trace};

use super::cost::EditCost;
use crate::trie::{NodeId, TrieMap};

type QueueEntry = Reverse<(u32, u64, NodeId, usize)>;

/// Where a search may stop consuming input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EndMode {
    /// Keys must absorb every token from `start` to the end of the input.
    Whole,
    /// Keys may end at any position after `start`.
    Any,
}

/// A stored key reached at input position `end` with minimal `cost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hit {
    pub node: NodeId,
    pub end: usize,
    pub cost: u32,
}

pub(crate) struct SearchOutcome {
    pub hits: Vec<Hit>,
    /// Number of settled states.
    pub expansions: usize,
    /// True when the expansion budget ran out before the search finished.
    pub truncated: bool,
    /// Cheapest state dropped by `cost_limit`, if any.
    pub clipped: Option<u32>,
}

/// Parameters of a single best-first search anchored at `start`.
pub(crate) struct SearchParams {
    pub start: usize,
    pub mode: EndMode,
    /// Hits kept per end position (`Whole` has a single end position).
    pub per_end: usize,
    /// States costlier than this are never queued.
    pub cost_limit: Option<u32>,
    pub budget: usize,
}

/// Best-first search over `(node, position)` states.
///
/// Transitions from `(node, pos)` at cost `c`:
/// - substitution: `(child, pos + 1)` at `c + substitution(input[pos], edge)`
/// - deletion:     `(child, pos)`     at `c + deletion(edge)`
/// - insertion:    `(node, pos + 1)`  at `c + insertion(input[pos])`
///
/// The queue is ordered by `(cost, discovery sequence)`, so each state is
/// settled once at its minimal cost and hits come out in non-decreasing cost
/// with ties in discovery order. The search stops as soon as every end
/// position holds `per_end` hits, which means no state costlier than the
/// last accepted hit is ever expanded.
pub(crate) fn best_first<T, V, C>(
    trie: &TrieMap<T, V>,
    cost_fn: &C,
    input: &[T],
    params: &SearchParams,
) -> SearchOutcome
where
    T: Eq + Hash + Clone,
    C: EditCost<T>,
{
    let n = input.len();
    let start = params.start;
    let mut outcome = SearchOutcome {
        hits: Vec::new(),
        expansions: 0,
        truncated: false,
        clipped: None,
    };
    if start > n || params.per_end == 0 {
        return outcome;
    }

    // Number of end positions that can receive hits.
    let end_slots = match params.mode {
        EndMode::Whole => 1,
        EndMode::Any => n - start,
    };
    if end_slots == 0 {
        return outcome;
    }
    let mut per_end_count: Vec<usize> = vec![0; n + 1];
    let mut saturated = 0usize;

    let mut best: HashMap<(NodeId, usize), u32> = HashMap::new();
    let mut heap: BinaryHeap<QueueEntry> = BinaryHeap::new();
    let mut seq: u64 = 0;
    let mut clipped: Option<u32> = None;

    let within = |cost: u32| params.cost_limit.map_or(true, |limit| cost <= limit);
    let mut push = |heap: &mut BinaryHeap<QueueEntry>,
                    best: &mut HashMap<(NodeId, usize), u32>,
                    node: NodeId,
                    pos: usize,
                    cost: u32| {
        if !within(cost) {
            clipped = Some(clipped.map_or(cost, |c| c.min(cost)));
            return;
        }
        match best.entry((node, pos)) {
            Entry::Occupied(mut e) => {
                if cost >= *e.get() {
                    return;
                }
                e.insert(cost);
            }
            Entry::Vacant(e) => {
                e.insert(cost);
            }
        }
        heap.push(Reverse((cost, seq, node, pos)));
        seq += 1;
    };

    push(&mut heap, &mut best, NodeId::ROOT, start, 0);

    while let Some(Reverse((cost, _, node, pos))) = heap.pop() {
        if best.get(&(node, pos)).is_some_and(|&b| b < cost) {
            continue; // stale entry
        }
        if outcome.expansions >= params.budget {
            outcome.truncated = true;
            debug!(start, budget = params.budget, "search budget exhausted");
            break;
        }
        outcome.expansions += 1;

        let accepts_end = match params.mode {
            EndMode::Whole => pos == n,
            EndMode::Any => pos > start,
        };
        if accepts_end
            && trie.value_at(node).is_some()
            && per_end_count[pos] < params.per_end
        {
            trace!(?node, pos, cost, "hit");
            outcome.hits.push(Hit {
                node,
                end: pos,
                cost,
            });
            per_end_count[pos] += 1;
            if per_end_count[pos] == params.per_end {
                saturated += 1;
                if saturated == end_slots {
                    break;
                }
            }
        }

        let token = input.get(pos);
        for (edge, child) in trie.children(node) {
            if let Some(tok) = token {
                let c = cost.saturating_add(cost_fn.substitution(tok, edge));
                push(&mut heap, &mut best, child, pos + 1, c);
            }
            let c = cost.saturating_add(cost_fn.deletion(edge));
            push(&mut heap, &mut best, child, pos, c);
        }
        if let Some(tok) = token {
            let c = cost.saturating_add(cost_fn.insertion(tok));
            push(&mut heap, &mut best, node, pos + 1, c);
        }
    }

    outcome.clipped = clipped;
    outcome
}
