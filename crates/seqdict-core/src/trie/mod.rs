//! Sequence-keyed trie dictionary.
//!
//! `TrieMap` maps non-empty token sequences to values. Nodes live in an
//! arena and are addressed by `NodeId`; each node records its parent and
//! incoming token so keys can be rebuilt from any node. Children keep
//! insertion order, which makes iteration deterministic.

mod iter;

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

pub use iter::{Iter, Keys, Values};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    #[error("invalid key: keys must contain at least one token")]
    InvalidKey,
    #[error("trie is full: node ids exhausted")]
    CapacityExceeded,
}

/// Index of a node in the trie arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }

    /// `None` once the arena outgrows the `u32` id space.
    fn from_index(index: usize) -> Option<NodeId> {
        u32::try_from(index).ok().map(NodeId)
    }
}

#[derive(Debug, Clone)]
struct Node<T, V> {
    /// Token on the edge from the parent; `None` for the root and free slots.
    token: Option<T>,
    parent: Option<NodeId>,
    value: Option<V>,
    index: HashMap<T, NodeId>,
    /// Children in insertion order.
    children: Vec<NodeId>,
}

impl<T, V> Node<T, V> {
    fn vacant() -> Self {
        Self {
            token: None,
            parent: None,
            value: None,
            index: HashMap::new(),
            children: Vec::new(),
        }
    }
}

/// A map from token sequences to values.
#[derive(Debug, Clone)]
pub struct TrieMap<T, V> {
    nodes: Vec<Node<T, V>>,
    free: Vec<NodeId>,
    len: usize,
}

impl<T, V> Default for TrieMap<T, V> {
    fn default() -> Self {
        Self {
            nodes: vec![Node::vacant()],
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<T: Eq + Hash + Clone, V> TrieMap<T, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Insert `value` under `key`, returning the previous value if any.
    pub fn put(&mut self, key: &[T], value: V) -> Result<Option<V>, TrieError> {
        if key.is_empty() {
            return Err(TrieError::InvalidKey);
        }
        let mut cur = NodeId::ROOT;
        for token in key {
            cur = match self.child(cur, token) {
                Some(next) => next,
                None => match self.attach(cur, token.clone()) {
                    Some(next) => next,
                    None => {
                        self.prune_from(cur);
                        return Err(TrieError::CapacityExceeded);
                    }
                },
            };
        }
        let prev = self.nodes[cur.index()].value.replace(value);
        if prev.is_none() {
            self.len += 1;
        }
        Ok(prev)
    }

    /// Insert every entry in order. Stops at the first failing entry; entries
    /// before it remain inserted.
    pub fn put_all<K, I>(&mut self, entries: I) -> Result<(), TrieError>
    where
        K: AsRef<[T]>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.put(key.as_ref(), value)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &[T]) -> Option<&V> {
        let id = self.find(key)?;
        self.nodes[id.index()].value.as_ref()
    }

    pub fn get_mut(&mut self, key: &[T]) -> Option<&mut V> {
        let id = self.find(key)?;
        self.nodes[id.index()].value.as_mut()
    }

    pub fn contains(&self, key: &[T]) -> bool {
        self.get(key).is_some()
    }

    /// True if some stored key starts with `prefix`. The empty prefix
    /// matches any non-empty trie.
    pub fn contains_prefix(&self, prefix: &[T]) -> bool {
        match self.find(prefix) {
            Some(id) => id != NodeId::ROOT || !self.is_empty(),
            None => false,
        }
    }

    /// Remove `key`, pruning ancestors left without a value or children.
    pub fn remove(&mut self, key: &[T]) -> Option<V> {
        let id = self.find(key)?;
        if id == NodeId::ROOT {
            return None;
        }
        let prev = self.nodes[id.index()].value.take()?;
        self.len -= 1;
        self.prune_from(id);
        Some(prev)
    }

    /// Detach `start` and its ancestors for as long as they hold no value
    /// and have no children.
    fn prune_from(&mut self, start: NodeId) {
        let mut cur = start;
        while cur != NodeId::ROOT {
            let node = &self.nodes[cur.index()];
            if node.value.is_some() || !node.children.is_empty() {
                break;
            }
            let parent = node.parent.unwrap_or(NodeId::ROOT);
            self.detach(cur);
            cur = parent;
        }
    }

    /// Every stored key that is a prefix of `input`, shortest first, as
    /// `(key length, value)`.
    pub fn common_prefix_search(&self, input: &[T]) -> Vec<(usize, &V)> {
        let mut hits = Vec::new();
        let mut cur = NodeId::ROOT;
        for (i, token) in input.iter().enumerate() {
            match self.child(cur, token) {
                Some(next) => cur = next,
                None => break,
            }
            if let Some(v) = self.value_at(cur) {
                hits.push((i + 1, v));
            }
        }
        hits
    }

    /// All entries in pre-order.
    pub fn iter(&self) -> Iter<'_, T, V> {
        Iter::new(self, NodeId::ROOT, Vec::new())
    }

    /// All keys in pre-order. Each call starts a fresh traversal.
    pub fn keys(&self) -> Keys<'_, T, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, T, V> {
        Values::new(self.iter())
    }

    /// Entries whose key starts with `prefix`, in pre-order.
    pub fn predict(&self, prefix: &[T]) -> Iter<'_, T, V> {
        match self.find(prefix) {
            Some(id) => Iter::new(self, id, prefix.to_vec()),
            None => Iter::empty(self),
        }
    }

    // --- node-level access for the matcher ---

    pub(crate) fn child(&self, id: NodeId, token: &T) -> Option<NodeId> {
        self.nodes[id.index()].index.get(token).copied()
    }

    /// Children of `id` in insertion order, with their edge tokens.
    pub(crate) fn children(&self, id: NodeId) -> impl Iterator<Item = (&T, NodeId)> + '_ {
        self.nodes[id.index()].children.iter().filter_map(move |&c| {
            let token = self.nodes[c.index()].token.as_ref()?;
            Some((token, c))
        })
    }

    pub(crate) fn value_at(&self, id: NodeId) -> Option<&V> {
        self.nodes[id.index()].value.as_ref()
    }

    pub(crate) fn token_at(&self, id: NodeId) -> Option<&T> {
        self.nodes[id.index()].token.as_ref()
    }

    pub(crate) fn has_children(&self, id: NodeId) -> bool {
        !self.nodes[id.index()].children.is_empty()
    }

    /// Rebuild the key spelled by the path from the root to `id`.
    pub(crate) fn key_at(&self, id: NodeId) -> Vec<T> {
        let mut key = Vec::new();
        let mut cur = id;
        while let Some(token) = self.nodes[cur.index()].token.as_ref() {
            key.push(token.clone());
            match self.nodes[cur.index()].parent {
                Some(parent) => cur = parent,
                None => break,
            }
        }
        key.reverse();
        key
    }

    fn find(&self, key: &[T]) -> Option<NodeId> {
        key.iter()
            .try_fold(NodeId::ROOT, |cur, token| self.child(cur, token))
    }

    fn attach(&mut self, parent: NodeId, token: T) -> Option<NodeId> {
        let node = Node {
            token: Some(token.clone()),
            parent: Some(parent),
            ..Node::vacant()
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                let id = NodeId::from_index(self.nodes.len())?;
                self.nodes.push(node);
                id
            }
        };
        let p = &mut self.nodes[parent.index()];
        p.index.insert(token, id);
        p.children.push(id);
        Some(id)
    }

    fn detach(&mut self, id: NodeId) {
        let node = std::mem::replace(&mut self.nodes[id.index()], Node::vacant());
        if let (Some(parent), Some(token)) = (node.parent, node.token) {
            let p = &mut self.nodes[parent.index()];
            p.index.remove(&token);
            p.children.retain(|&c| c != id);
        }
        self.free.push(id);
    }
}

impl<T, V, K> FromIterator<(K, V)> for TrieMap<T, V>
where
    T: Eq + Hash + Clone,
    K: AsRef<[T]>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = TrieMap::new();
        trie.extend(iter);
        trie
    }
}

impl<T, V, K> Extend<(K, V)> for TrieMap<T, V>
where
    T: Eq + Hash + Clone,
    K: AsRef<[T]>,
{
    /// Entries that `put` rejects are skipped.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if let Err(err) = self.put(key.as_ref(), value) {
                debug!(%err, "skipping entry");
            }
        }
    }
}
