use crate::test::{Test, TestItem};

pub fn collected(node_ids: &[&'static str]) -> Vec<Test> {
    node_ids.iter().copied().map(Test::from).collect()
}

pub fn node_ids<T: TestItem>(items: &[T]) -> Vec<&str> {
    items.iter().map(TestItem::node_id).collect()
}
