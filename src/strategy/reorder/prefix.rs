use std::{borrow::Cow, fmt};

use crate::{
    error::ReorderError,
    reorder::{CompiledOrdering, Pattern, Slot, TestReorder},
    test::TestItem,
};

/// Unit tests first, then unmatched tests, then integration and ui tests.
pub const DEFAULT_PREFIX_ORDERING: &[Slot] = &[
    Slot::pattern("unit"),
    Slot::Unmatched,
    Slot::pattern("integration"),
    Slot::pattern("ui"),
];

/// The longest common prefix of `a` and `b`.
///
/// Compares character by character, so the result never ends inside a
/// multi-byte character.
pub fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or(a.len().min(b.len()));
    &a[..end]
}

/// The prefix shared by every identifier of the batch.
///
/// Reduces [`common_prefix`] left to right. An empty batch has an empty
/// prefix.
pub fn batch_common_prefix<'a>(mut node_ids: impl Iterator<Item = &'a str>) -> &'a str {
    let Some(first) = node_ids.next() else {
        return "";
    };
    node_ids.fold(first, |prefix, node_id| common_prefix(prefix, node_id))
}

impl Pattern for Cow<'static, str> {
    fn matches(&self, target: &str) -> bool {
        target.starts_with(self.as_ref())
    }
}

/// Reorders tests by literal prefixes of the varying part of their
/// identifiers.
///
/// The varying part is what is left of an identifier once the prefix common
/// to the whole batch is removed. For `test_other.py` and `test_unit.py`
/// those are `other.py` and `unit.py`, so a `unit` pattern matches the
/// second one.
#[derive(Debug, Clone)]
pub struct PrefixReorder {
    ordering: CompiledOrdering<Cow<'static, str>>,
}

impl PrefixReorder {
    pub fn new(slots: &[Slot]) -> Result<Self, ReorderError> {
        let ordering = CompiledOrdering::compile(slots, |pattern| {
            Ok(Cow::Owned(pattern.to_owned()))
        })?;
        Ok(Self { ordering })
    }

    pub fn ordering(&self) -> &CompiledOrdering<Cow<'static, str>> {
        &self.ordering
    }
}

impl Default for PrefixReorder {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX_ORDERING).expect("default prefix ordering should compile")
    }
}

impl TestReorder for PrefixReorder {
    fn reorder<T: TestItem>(&self, items: &mut [T]) {
        if items.is_empty() {
            return;
        }

        // Every identifier starts with the prefix, so its length is a char
        // boundary in all of them.
        let prefix_len = batch_common_prefix(items.iter().map(TestItem::node_id)).len();
        tracing::debug!(
            tests = items.len(),
            prefix_len,
            ordering = %self.ordering,
            "reordering tests by prefix"
        );

        self.ordering
            .sort_by_rank(items, |node_id| node_id.get(prefix_len..).unwrap_or(node_id));
    }
}

impl fmt::Display for PrefixReorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prefix ordering {}", self.ordering)
    }
}
