use crate::{reorder::TestReorder, test::TestItem};

/// A [`TestReorder`] that keeps the discovery order.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NoReorder;

impl NoReorder {
    pub fn new() -> Self {
        Self
    }
}

impl TestReorder for NoReorder {
    fn reorder<T: TestItem>(&self, _: &mut [T]) {}
}
