#![no_main]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use libfuzzer_sys::fuzz_target;
use saphyr_tree::Node;

fn digest(node: &Node) -> u64 {
    let mut hasher = DefaultHasher::new();
    node.hash(&mut hasher);
    hasher.finish()
}

// Walk every node: typed accessors, lookups and equality must never panic.
fn walk(node: &Node) {
    let _ = node.as_bool();
    let _ = node.as_i64();
    let _ = node.as_f64();
    let _ = node.as_timestamp();
    let _ = node.as_binary();
    let _ = node.resolved_tag();
    let _ = &node["key"];
    let _ = &node[0];
    match node {
        Node::Scalar(_) => {}
        Node::Sequence(seq) => seq.iter().for_each(walk),
        Node::Mapping(map) => {
            for (key, value) in map {
                assert_eq!(map.get(key), Some(value));
                walk(key);
                walk(value);
            }
        }
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(docs) = saphyr_tree::from_multiple(text) else {
        return;
    };
    for doc in &docs {
        walk(doc);
        let copy = doc.clone();
        assert_eq!(&copy, doc);
        assert_eq!(digest(&copy), digest(doc));
        let _ = serde_json::to_string(doc);
    }
});
