//! Test reordering for kireorder.
//!
//! A reorder strategy rearranges an already collected slice of tests into
//! priority buckets. Every test is classified exactly once by matching its
//! identifier against an ordered list of patterns, and the slice is then
//! stable-sorted by the rank of the bucket it landed in. Tests within the same
//! bucket keep their discovery order.
//!
//! The list of patterns is an ordering list, a slice of [`Slot`]s.
//! Exactly one slot is [`Slot::Unmatched`], which marks where tests go that
//! no pattern matched. Orderings are compiled once, up front, into a
//! [`CompiledOrdering`], so a bad ordering is rejected before any test is
//! touched.
//!
//! Two matching modes exist:
//! - [`PrefixReorder`] strips the prefix all identifiers of a batch share and
//!   checks whether the rest starts with a literal pattern
//! - [`RegexReorder`] matches regular expressions anchored at the start of the
//!   full identifier
//!
//! Patterns are tried in list order and the first match wins. They
//! are not required to be disjoint, so an earlier pattern shadows a later one
//! for identifiers both would match.
//!
//! Implement [`TestReorder`] to define a reorder strategy.

use crate::test::TestItem;

mod ordering;
pub use ordering::*;

mod no;
pub use no::*;

mod prefix;
pub use prefix::*;

mod regex;
pub use self::regex::*;

/// A strategy for rearranging collected tests before they are run.
///
/// Reordering happens in place and only changes the order of `items`, never
/// their content. It cannot fail: anything that could go wrong with the
/// ordering has to be caught while the strategy is constructed.
pub trait TestReorder {
    fn reorder<T: TestItem>(&self, items: &mut [T]);
}

impl<R: TestReorder> TestReorder for Option<R> {
    fn reorder<T: TestItem>(&self, items: &mut [T]) {
        if let Some(reorder) = self {
            reorder.reorder(items);
        }
    }
}

impl<R: TestReorder + ?Sized> TestReorder for &R {
    fn reorder<T: TestItem>(&self, items: &mut [T]) {
        R::reorder(self, items)
    }
}
