use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use saphyr_tree::{node, CollectionStyle, Mapping, Node, Pair, Tag};

fn digest(node: &Node) -> u64 {
    let mut hasher = DefaultHasher::new();
    node.hash(&mut hasher);
    hasher.finish()
}

fn key_order(node: &Node) -> Vec<String> {
    node.as_mapping()
        .unwrap()
        .keys()
        .filter_map(|k| k.as_str().map(str::to_owned))
        .collect()
}

#[test]
fn reassigning_a_key_keeps_its_position() {
    let mut doc = Node::Mapping(Mapping::new());
    doc.set("k1", Some(Node::from("v1")));
    doc.set("k2", Some(Node::from("v2")));
    let previous = doc.set("k1", Some(Node::from("v3")));

    assert_eq!(previous, Some(Node::from("v1")));
    assert_eq!(key_order(&doc), ["k1", "k2"]);
    assert_eq!(doc["k1"].as_str(), Some("v3"));
}

#[test]
fn removing_and_re_adding_moves_the_key_last() {
    let mut doc = node!({"k1" => "v1", "k2" => "v2"});
    let removed = doc.set("k1", None);
    assert_eq!(removed, Some(Node::from("v1")));
    assert!(doc.get("k1").is_none());

    doc.set("k1", Some(Node::from("v1")));
    assert_eq!(key_order(&doc), ["k2", "k1"]);
}

#[test]
fn equality_and_hash_ignore_order_tag_and_style() {
    let ab = node!({"a" => 1, "b" => [true, "x"]});
    let ba = node!({"b" => [true, "x"], "a" => 1});
    assert_eq!(ab, ba);
    assert_eq!(digest(&ab), digest(&ba));

    let Node::Mapping(map) = ab.clone() else {
        unreachable!()
    };
    let tagged = Node::mapping(
        map.pairs().to_vec(),
        Tag::explicit("!!map"),
        CollectionStyle::Flow,
    );
    assert_eq!(tagged, ab);
    assert_eq!(digest(&tagged), digest(&ab));

    let different = node!({"a" => 1, "b" => ["x", true]});
    assert_ne!(ab, different);
}

#[test]
fn scalar_keys_compare_by_text() {
    let mut map = Mapping::new();
    map.insert(1, "int key");
    // The literal 1 is stored as the text "1", so the string key is the same key.
    assert_eq!(map.get("1").and_then(Node::as_str), Some("int key"));
    assert_eq!(map.get(&1_i64).and_then(Node::as_str), Some("int key"));
    assert!(map.get("01").is_none());
}

#[test]
fn nan_keys_are_found_and_compare_equal() -> anyhow::Result<()> {
    let mut map = Mapping::new();
    map.insert(f64::NAN, "not a number");
    assert_eq!(map.get(".nan").and_then(Node::as_str), Some("not a number"));
    assert!(map.contains_key(&Node::from(f64::NAN)));

    let doc = saphyr_tree::from_str("{.nan: not a number}")?;
    assert_eq!(doc[".nan"].as_str(), Some("not a number"));
    assert!(doc[".nan"].as_f64().is_some_and(f64::is_nan));

    let built = Node::Mapping(map);
    assert_eq!(built, doc);
    assert_eq!(digest(&built), digest(&doc));
    Ok(())
}

#[test]
fn float_keys_differ_by_spelling() -> anyhow::Result<()> {
    let doc = saphyr_tree::from_str("{1.0: short, 1.00: long}")?;
    let map = doc.as_mapping().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(doc["1.0"].as_str(), Some("short"));
    assert_eq!(doc["1.00"].as_str(), Some("long"));
    assert_ne!(node!({"1.0" => "v"}), node!({"1.00" => "v"}));
    Ok(())
}

#[test]
fn compound_keys_are_looked_up_structurally() {
    let mut map = Mapping::new();
    map.insert(node!(["x", "y"]), "pair");
    map.insert(node!({"k" => "v"}), "map");

    let doc = Node::Mapping(map);
    assert_eq!(doc[node!(["x", "y"])].as_str(), Some("pair"));
    assert_eq!(doc.get(node!({"k" => "v"})).and_then(Node::as_str), Some("map"));
    assert!(doc.get(node!(["y", "x"])).is_none());
}

#[test]
fn remove_keeps_the_remaining_order_and_lookups() {
    let mut map: Mapping = vec![("a", 1), ("b", 2), ("c", 3), ("d", 4)].into_iter().collect();
    assert_eq!(map.remove("b"), Some(Node::from(2)));
    assert_eq!(map.remove("b"), None);

    assert_eq!(map.get("c").and_then(Node::as_i64), Some(3));
    assert_eq!(map.get("d").and_then(Node::as_i64), Some(4));
    let keys: Vec<&str> = map.keys().filter_map(Node::as_str).collect();
    assert_eq!(keys, ["a", "c", "d"]);
}

#[test]
fn retain_filters_pairs() {
    let mut map: Mapping = (1..=6).map(|i| (i, i * 10)).collect();
    map.retain(|_, v| v.as_i64().is_some_and(|v| v % 20 == 0));
    let values: Vec<i64> = map.values().filter_map(Node::as_i64).collect();
    assert_eq!(values, [20, 40, 60]);
    assert!(map.contains_key(&4_i64));
    assert!(!map.contains_key(&3_i64));
}

#[test]
fn iteration_is_double_ended_and_sized() {
    let map: Mapping = vec![("x", 1), ("y", 2), ("z", 3)].into_iter().collect();
    assert_eq!(map.iter().len(), 3);
    let last = map.iter().next_back().map(|(k, _)| k.as_str());
    assert_eq!(last, Some(Some("z")));
    assert_eq!(map.first().and_then(|(k, _)| k.as_str()), Some("x"));
    assert_eq!(map.last().and_then(|(_, v)| v.as_i64()), Some(3));

    let owned: Vec<(Node, Node)> = map.into_iter().collect();
    assert_eq!(owned[1], (Node::from("y"), Node::from(2)));
}

#[test]
fn values_can_be_mutated_in_place() {
    let mut map: Mapping = vec![("a", 1), ("b", 2)].into_iter().collect();
    for value in map.values_mut() {
        *value = Node::from(value.as_i64().unwrap_or_default() + 100);
    }
    if let Some(v) = map.get_mut("a") {
        *v = Node::from("replaced");
    }
    assert_eq!(map.get("a").and_then(Node::as_str), Some("replaced"));
    assert_eq!(map.get("b").and_then(Node::as_i64), Some(102));
}

#[test]
fn from_parts_keeps_first_position_last_value() {
    let map = Mapping::from_parts(
        vec![Pair::new("a", 1), Pair::new("b", 2), Pair::new("a", 3)],
        Tag::Implicit,
        CollectionStyle::Block,
    );
    assert_eq!(map.len(), 2);
    assert_eq!(map.first().and_then(|(_, v)| v.as_i64()), Some(3));
    assert_eq!(map.style, CollectionStyle::Block);
}

#[test]
fn missing_lookups_never_panic() {
    let doc = node!({"a" => [1]});
    assert!(doc.get("missing").is_none());
    assert!(doc["missing"].is_null());
    assert!(doc["a"]["not a mapping"].is_null());
    assert!(doc.get(0).is_none());

    let mut scalar = Node::from("x");
    assert_eq!(scalar.set("k", Some(Node::from(1))), None);
    assert_eq!(scalar, Node::from("x"));
}

#[test]
fn extend_and_clear() {
    let mut map = Mapping::new();
    map.extend(vec![("a", "1"), ("b", "2")]);
    map.extend(vec![("a", "3")]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a").and_then(Node::as_str), Some("3"));
    map.clear();
    assert!(map.is_empty());
    assert!(map.get("a").is_none());
}
