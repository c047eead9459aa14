use std::fmt;

use regex::Regex;

use crate::{
    error::ReorderError,
    reorder::{CompiledOrdering, Pattern, Slot, TestReorder},
    test::TestItem,
};

/// Unit tests first, then unmatched tests, then integration and ui tests.
///
/// Each word must start the identifier or follow a `/`, optionally preceded
/// by `test_`. That matches `tests/unit/...`, `test_unit.py`,
/// `app/tests/unit/...`, `tests/test_unit` and `unit`, but neither `some_unit`
/// nor `abc_test_unit`.
pub const DEFAULT_REGEX_ORDERING: &[Slot] = &[
    Slot::pattern(r"(^|.*/)(test_)?unit"),
    Slot::Unmatched,
    Slot::pattern(r"(^|.*/)(test_)?integration"),
    Slot::pattern(r"(^|.*/)(test_)?ui"),
];

/// A regular expression that has to match at the start of its target.
///
/// The match does not have to span the whole target. The leftmost match is
/// the one starting earliest, so the pattern matches at the start exactly
/// when its leftmost match starts at 0.
#[derive(Debug, Clone)]
pub struct AnchoredRegex(Regex);

impl AnchoredRegex {
    pub fn new(pattern: &str) -> Result<Self, ReorderError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| ReorderError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            })
    }
}

impl Pattern for AnchoredRegex {
    fn matches(&self, target: &str) -> bool {
        self.0.find(target).is_some_and(|m| m.start() == 0)
    }
}

/// Reorders tests by regular expressions matched against their full
/// identifiers.
#[derive(Debug, Clone)]
pub struct RegexReorder {
    ordering: CompiledOrdering<AnchoredRegex>,
}

impl RegexReorder {
    pub fn new(slots: &[Slot]) -> Result<Self, ReorderError> {
        let ordering = CompiledOrdering::compile(slots, AnchoredRegex::new)?;
        Ok(Self { ordering })
    }

    pub fn ordering(&self) -> &CompiledOrdering<AnchoredRegex> {
        &self.ordering
    }
}

impl Default for RegexReorder {
    fn default() -> Self {
        Self::new(DEFAULT_REGEX_ORDERING).expect("default regex ordering should compile")
    }
}

impl TestReorder for RegexReorder {
    fn reorder<T: TestItem>(&self, items: &mut [T]) {
        if items.is_empty() {
            return;
        }

        tracing::debug!(
            tests = items.len(),
            ordering = %self.ordering,
            "reordering tests by regex"
        );
        self.ordering.sort_by_rank(items, |node_id| node_id);
    }
}

impl fmt::Display for RegexReorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "regex ordering {}", self.ordering)
    }
}
