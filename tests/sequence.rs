use saphyr_tree::{node, CollectionStyle, Node, Sequence, Tag};

#[test]
fn push_insert_and_remove() {
    let mut seq = Sequence::new();
    seq.push("a");
    seq.push(2);
    assert!(seq.insert(0, "first"));
    assert!(seq.insert(3, "last"));
    assert!(!seq.insert(9, "nowhere"));

    let texts: Vec<&str> = seq.iter().filter_map(Node::as_str).collect();
    assert_eq!(texts, ["first", "a", "2", "last"]);

    assert_eq!(seq.remove(1), Some(Node::from("a")));
    assert_eq!(seq.remove(10), None);
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.pop(), Some(Node::from("last")));
    assert_eq!(seq.last(), Some(&Node::from(2)));
}

#[test]
fn sequence_node_edits_through_views() {
    let mut doc = node!(["a", "b"]);
    if let Some(seq) = doc.as_sequence_mut() {
        seq.push("c");
        seq.remove(0);
    }
    assert_eq!(doc, node!(["b", "c"]));

    if let Some(item) = doc.get_mut(1) {
        *item = Node::from("z");
    }
    assert_eq!(doc[1].as_str(), Some("z"));
}

#[test]
fn positions_out_of_range_are_absent() {
    let doc = node!([1, 2, 3]);
    assert_eq!(doc.get(2).and_then(Node::as_i64), Some(3));
    assert!(doc.get(3).is_none());
    assert!(doc[3].is_null());
    assert!(doc["key"].is_null());
}

#[test]
fn equality_is_ordered_and_ignores_presentation() {
    let a = Node::sequence(vec![Node::from(1), Node::from(2)], Tag::Implicit, CollectionStyle::Flow);
    let b = Node::sequence(
        vec![Node::from(1), Node::from(2)],
        Tag::explicit("!!seq"),
        CollectionStyle::Block,
    );
    assert_eq!(a, b);
    assert_ne!(a, node!([2, 1]));
    assert_ne!(a, node!([1, 2, 3]));
}

#[test]
fn copies_are_independent() {
    let original = node!(["x", ["y"]]);
    let mut copy = original.clone();
    if let Some(inner) = copy.get_mut(1).and_then(Node::as_sequence_mut) {
        inner.push("added");
    }
    assert_eq!(original[1].as_sequence().map(|s| s.len()), Some(1));
    assert_eq!(copy[1].as_sequence().map(|s| s.len()), Some(2));
}

#[test]
fn retain_truncate_and_iterate() {
    let mut seq: Sequence = (1..=10).collect();
    seq.retain(|n| n.as_i64().is_some_and(|v| v % 3 == 0));
    assert_eq!(seq.iter().filter_map(Node::as_i64).collect::<Vec<_>>(), [3, 6, 9]);

    seq.truncate(2);
    for item in &mut seq {
        *item = Node::from(item.as_i64().unwrap_or_default() * 2);
    }
    let doubled: Vec<i64> = seq.into_iter().filter_map(|n| n.as_i64()).collect();
    assert_eq!(doubled, [6, 12]);
}
