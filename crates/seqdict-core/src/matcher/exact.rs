use std::hash::Hash;
use std::ops::Range;

use tracing::{debug, debug_span};

use super::{Match, Matcher};
use crate::trie::NodeId;

/// Clamp `range` to `[0, len]`, yielding an empty range for inverted input.
fn clamp(range: Range<usize>, len: usize) -> (usize, usize) {
    let end = range.end.min(len);
    let start = range.start.min(end);
    (start, end)
}

impl<'t, T, V, C> Matcher<'t, T, V, C>
where
    T: Eq + Hash + Clone,
    V: Clone,
{
    /// Every occurrence of every stored key, overlapping and nested ones
    /// included, ordered by start and then by end.
    pub fn find_all_matches(&self, input: &[T]) -> Vec<Match<T, V>> {
        self.find_all_matches_in(input, 0..input.len())
    }

    /// [`find_all_matches`](Self::find_all_matches) restricted to `range`.
    /// Spans stay relative to `input`.
    pub fn find_all_matches_in(&self, input: &[T], range: Range<usize>) -> Vec<Match<T, V>> {
        let (start, end) = clamp(range, input.len());
        let _span = debug_span!("find_all_matches", start, end).entered();

        // One cursor per anchor position, advanced in lock-step with the scan.
        let mut cursors: Vec<(usize, NodeId)> = Vec::new();
        let mut matches = Vec::new();
        for pos in start..end {
            cursors.push((pos, NodeId::ROOT));
            let token = &input[pos];
            cursors.retain_mut(|(_, node)| match self.trie.child(*node, token) {
                Some(next) => {
                    *node = next;
                    true
                }
                None => false,
            });
            for &(anchor, node) in &cursors {
                if let Some(value) = self.trie.value_at(node) {
                    matches.push(Match {
                        key: input[anchor..pos + 1].to_vec(),
                        value: Some(value.clone()),
                        start: anchor,
                        end: pos + 1,
                    });
                }
            }
        }
        // Emitted by end; reorder by (start, end). The sort is stable.
        matches.sort_by_key(|m| (m.start, m.end));

        debug!(match_count = matches.len());
        matches
    }

    /// Greedy left-to-right scan keeping the longest key at each position.
    pub fn find_non_overlapping(&self, input: &[T]) -> Vec<Match<T, V>> {
        self.find_non_overlapping_in(input, 0..input.len())
    }

    pub fn find_non_overlapping_in(&self, input: &[T], range: Range<usize>) -> Vec<Match<T, V>> {
        let (start, end) = clamp(range, input.len());
        let _span = debug_span!("find_non_overlapping", start, end).entered();
        let matches = self.greedy_scan(input, start, end, false);
        debug!(match_count = matches.len());
        matches
    }

    /// Like [`find_non_overlapping`](Self::find_non_overlapping), plus a
    /// value-less segment for every gap, so the spans tile the input.
    pub fn segment(&self, input: &[T]) -> Vec<Match<T, V>> {
        self.segment_in(input, 0..input.len())
    }

    pub fn segment_in(&self, input: &[T], range: Range<usize>) -> Vec<Match<T, V>> {
        let (start, end) = clamp(range, input.len());
        let _span = debug_span!("segment", start, end).entered();
        if start == end {
            return vec![Match {
                key: Vec::new(),
                value: None,
                start,
                end,
            }];
        }
        let segments = self.greedy_scan(input, start, end, true);
        debug!(segment_count = segments.len());
        segments
    }

    /// Longest stored key starting at `pos` and ending no later than `end`,
    /// as `(key end, value)`.
    pub fn longest_match_at(&self, input: &[T], pos: usize, end: usize) -> Option<(usize, &'t V)> {
        let end = end.min(input.len());
        let mut node = NodeId::ROOT;
        let mut longest = None;
        for (i, token) in input.iter().enumerate().take(end).skip(pos) {
            match self.trie.child(node, token) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(value) = self.trie.value_at(node) {
                longest = Some((i + 1, value));
            }
        }
        longest
    }

    fn greedy_scan(&self, input: &[T], start: usize, end: usize, with_gaps: bool) -> Vec<Match<T, V>> {
        let mut out = Vec::new();
        let mut gap_start = start;
        let mut pos = start;
        while pos < end {
            let Some((key_end, value)) = self.longest_match_at(input, pos, end) else {
                pos += 1;
                continue;
            };
            if with_gaps && gap_start < pos {
                out.push(gap(input, gap_start, pos));
            }
            out.push(Match {
                key: input[pos..key_end].to_vec(),
                value: Some(value.clone()),
                start: pos,
                end: key_end,
            });
            pos = key_end;
            gap_start = key_end;
        }
        if with_gaps && gap_start < end {
            out.push(gap(input, gap_start, end));
        }
        out
    }
}

fn gap<T: Clone, V>(input: &[T], start: usize, end: usize) -> Match<T, V> {
    Match {
        key: input[start..end].to_vec(),
        value: None,
        start,
        end,
    }
}
