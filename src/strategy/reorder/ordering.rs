use std::{borrow::Cow, fmt};

use crate::{error::ReorderError, test::TestItem};

/// One slot of an ordering list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A pattern, interpreted as a literal prefix or a regular expression
    /// depending on the strategy it is compiled for.
    Pattern(Cow<'static, str>),

    /// The bucket for tests no pattern matched.
    Unmatched,
}

impl Slot {
    /// The command line token standing for [`Slot::Unmatched`].
    pub const UNMATCHED_TOKEN: &'static str = "*";

    pub const fn pattern(pattern: &'static str) -> Self {
        Self::Pattern(Cow::Borrowed(pattern))
    }

    /// Translate a command line token, `*` marks the unmatched bucket.
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        match token == Self::UNMATCHED_TOKEN {
            true => Self::Unmatched,
            false => Self::Pattern(Cow::Owned(token)),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Pattern(pattern) => f.write_str(pattern),
            Slot::Unmatched => f.write_str(Self::UNMATCHED_TOKEN),
        }
    }
}

/// Something a [`CompiledOrdering`] can test a match target against.
pub trait Pattern {
    fn matches(&self, target: &str) -> bool;
}

/// An ordering list, validated and compiled into matchers.
///
/// Ranks are the positions the patterns had in the list. They are
/// not renumbered, so the ranks in use may have gaps. Only their relative
/// order carries meaning.
#[derive(Debug, Clone)]
pub struct CompiledOrdering<P> {
    slots: Vec<Slot>,
    patterns: Vec<(P, usize)>,
    unmatched: usize,
}

impl<P> CompiledOrdering<P> {
    /// Validate `slots` and compile every pattern with `compile_pattern`.
    ///
    /// Fails with [`ReorderError::EmptyOrdering`] for an empty list
    /// and with [`ReorderError::MissingUnmatchedMarker`] if no slot is
    /// [`Slot::Unmatched`]. An empty pattern would match every test and is
    /// rejected with [`ReorderError::EmptyPattern`]. If the marker appears
    /// more than once, the first one decides the rank of unmatched tests and
    /// the others are skipped.
    pub fn compile<F>(slots: &[Slot], mut compile_pattern: F) -> Result<Self, ReorderError>
    where
        F: FnMut(&str) -> Result<P, ReorderError>,
    {
        if slots.is_empty() {
            return Err(ReorderError::EmptyOrdering);
        }

        let unmatched = slots
            .iter()
            .position(|slot| matches!(slot, Slot::Unmatched))
            .ok_or(ReorderError::MissingUnmatchedMarker)?;

        let patterns = slots
            .iter()
            .enumerate()
            .filter_map(|(rank, slot)| match slot {
                Slot::Pattern(pattern) => Some((pattern, rank)),
                Slot::Unmatched => None,
            })
            .map(|(pattern, rank)| match pattern.is_empty() {
                true => Err(ReorderError::EmptyPattern { position: rank }),
                false => compile_pattern(pattern).map(|pattern| (pattern, rank)),
            })
            .collect::<Result<Vec<_>, ReorderError>>()?;

        tracing::debug!(
            ordering = %DisplaySlots(slots),
            patterns = patterns.len(),
            unmatched,
            "compiled test ordering"
        );

        Ok(Self {
            slots: slots.to_vec(),
            patterns,
            unmatched,
        })
    }

    /// The slots this ordering was compiled from.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The rank of tests no pattern matches.
    pub fn unmatched_rank(&self) -> usize {
        self.unmatched
    }
}

impl<P: Pattern> CompiledOrdering<P> {
    /// Rank of the first pattern matching `target`, in list order.
    pub fn rank(&self, target: &str) -> usize {
        self.patterns
            .iter()
            .find(|(pattern, _)| pattern.matches(target))
            .map(|(_, rank)| *rank)
            .unwrap_or(self.unmatched)
    }

    /// Stable-sort `items` by the rank of whatever `target` extracts from
    /// each item's identifier.
    pub(crate) fn sort_by_rank<T, F>(&self, items: &mut [T], target: F)
    where
        T: TestItem,
        F: Fn(&str) -> &str,
    {
        // Ranks are computed once per item, the sort itself is stable.
        items.sort_by_cached_key(|item| {
            let node_id = item.node_id();
            let rank = self.rank(target(node_id));
            tracing::trace!(node_id, rank, "classified test");
            rank
        });
    }
}

impl<P> fmt::Display for CompiledOrdering<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", DisplaySlots(&self.slots))
    }
}

pub(crate) struct DisplaySlots<'s>(pub &'s [Slot]);

impl fmt::Display for DisplaySlots<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{slot}")?;
        }
        f.write_str("]")
    }
}
