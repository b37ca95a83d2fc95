//! Token-sequence dictionary and matcher.
//!
//! [`TrieMap`] stores non-empty token sequences as keys. [`Matcher`] finds
//! their exact and approximate occurrences in longer sequences.

pub mod matcher;
pub mod settings;
pub mod trie;

pub use matcher::{ApproxMatch, ClosestOptions, EditCost, Match, Matcher, UnitCost};
pub use trie::{TrieError, TrieMap};
