/// Edit operation costs for approximate matching.
///
/// Costs are non-negative, which keeps best-first search exact: a state is
/// never reached more cheaply after it has been settled.
pub trait EditCost<T> {
    /// Align input token `input` with trie edge token `key`.
    fn substitution(&self, input: &T, key: &T) -> u32;
    /// Skip an input token without moving in the trie.
    fn insertion(&self, input: &T) -> u32;
    /// Follow a trie edge without consuming input.
    fn deletion(&self, key: &T) -> u32;
}

/// Levenshtein costs: every edit costs 1, equal tokens align for free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitCost;

impl<T: PartialEq> EditCost<T> for UnitCost {
    fn substitution(&self, input: &T, key: &T) -> u32 {
        u32::from(input != key)
    }

    fn insertion(&self, _input: &T) -> u32 {
        1
    }

    fn deletion(&self, _key: &T) -> u32 {
        1
    }
}

impl<T, C: EditCost<T> + ?Sized> EditCost<T> for &C {
    fn substitution(&self, input: &T, key: &T) -> u32 {
        (**self).substitution(input, key)
    }

    fn insertion(&self, input: &T) -> u32 {
        (**self).insertion(input)
    }

    fn deletion(&self, key: &T) -> u32 {
        (**self).deletion(key)
    }
}
