use std::hash::Hash;

use super::{NodeId, TrieMap};

/// Lazy pre-order traversal over `(key, &value)` pairs.
///
/// The stack holds `(node, key length at node)`; `prefix` is truncated and
/// extended as the walk moves between branches, so each step costs only the
/// tokens that change.
pub struct Iter<'a, T, V> {
    trie: &'a TrieMap<T, V>,
    stack: Vec<(NodeId, usize)>,
    prefix: Vec<T>,
    base_len: usize,
}

impl<'a, T: Eq + Hash + Clone, V> Iter<'a, T, V> {
    pub(super) fn new(trie: &'a TrieMap<T, V>, start: NodeId, prefix: Vec<T>) -> Self {
        let base_len = prefix.len();
        Self {
            trie,
            stack: vec![(start, base_len)],
            prefix,
            base_len,
        }
    }

    pub(super) fn empty(trie: &'a TrieMap<T, V>) -> Self {
        Self {
            trie,
            stack: Vec::new(),
            prefix: Vec::new(),
            base_len: 0,
        }
    }
}

impl<T: Clone, V> Clone for Iter<'_, T, V> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie,
            stack: self.stack.clone(),
            prefix: self.prefix.clone(),
            base_len: self.base_len,
        }
    }
}

impl<'a, T: Eq + Hash + Clone, V> Iterator for Iter<'a, T, V> {
    type Item = (Vec<T>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, len)) = self.stack.pop() {
            if len == self.base_len {
                self.prefix.truncate(len);
            } else {
                self.prefix.truncate(len - 1);
                if let Some(token) = self.trie.token_at(id) {
                    self.prefix.push(token.clone());
                }
            }

            let children: Vec<NodeId> = self.trie.children(id).map(|(_, c)| c).collect();
            self.stack
                .extend(children.into_iter().rev().map(|c| (c, len + 1)));

            if let Some(value) = self.trie.value_at(id) {
                return Some((self.prefix.clone(), value));
            }
        }
        None
    }
}

/// Keys of a [`TrieMap`] in pre-order.
pub struct Keys<'a, T, V> {
    inner: Iter<'a, T, V>,
}

impl<'a, T, V> Keys<'a, T, V> {
    pub(super) fn new(inner: Iter<'a, T, V>) -> Self {
        Self { inner }
    }
}

impl<T: Clone, V> Clone for Keys<'_, T, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T: Eq + Hash + Clone, V> Iterator for Keys<'a, T, V> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// Values of a [`TrieMap`] in key pre-order.
pub struct Values<'a, T, V> {
    inner: Iter<'a, T, V>,
}

impl<'a, T, V> Values<'a, T, V> {
    pub(super) fn new(inner: Iter<'a, T, V>) -> Self {
        Self { inner }
    }
}

impl<T: Clone, V> Clone for Values<'_, T, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T: Eq + Hash + Clone, V> Iterator for Values<'a, T, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}
