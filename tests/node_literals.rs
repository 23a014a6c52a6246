use saphyr_tree::{node, CollectionStyle, Mapping, Node, ScalarStyle, Sequence, Tag};

#[test]
fn literals_become_implicit_scalars() {
    let cases: Vec<(Node, &str)> = vec![
        (Node::from(true), "true"),
        (Node::from(false), "false"),
        (Node::from(42), "42"),
        (Node::from(-7_i64), "-7"),
        (Node::from(u64::MAX), "18446744073709551615"),
        (Node::from(0.0), "0.0"),
        (Node::from(1.5_f64), "1.5"),
        (Node::from(f64::NEG_INFINITY), "-.inf"),
        (Node::from("text"), "text"),
        (Node::from('x'), "x"),
    ];
    for (node, text) in cases {
        assert_eq!(node.as_str(), Some(text));
        assert_eq!(node.tag(), &Tag::Implicit);
        assert_eq!(node.scalar_style(), Some(ScalarStyle::Any));
    }
}

#[test]
fn literals_read_back_as_their_type() {
    assert_eq!(Node::from(true).as_bool(), Some(true));
    assert_eq!(Node::from(-12).as_i64(), Some(-12));
    assert_eq!(Node::from(2.25).as_f64(), Some(2.25));
    assert_eq!(Node::from("plain").as_str(), Some("plain"));
    assert!(Node::from(f64::NAN).as_f64().is_some_and(f64::is_nan));
}

#[test]
fn default_node_is_null() {
    let node = Node::default();
    assert!(node.is_null());
    assert_eq!(node, Node::null());
}

#[test]
fn vectors_and_iterators_build_sequences() {
    let from_vec = Node::from(vec![1, 2, 3]);
    let collected: Node = (1..=3).collect();
    assert_eq!(from_vec, collected);
    assert_eq!(from_vec.collection_style(), Some(CollectionStyle::Any));
    assert_eq!(from_vec.array::<u8>(), vec![1, 2, 3]);
}

#[test]
fn pairs_build_mappings_in_order() {
    let node: Node = vec![("b", 1), ("a", 2)].into_iter().collect();
    let keys: Vec<&str> = node
        .as_mapping()
        .unwrap()
        .keys()
        .filter_map(Node::as_str)
        .collect();
    assert_eq!(keys, ["b", "a"]);
}

#[test]
fn node_macro_nests() {
    let built = node!({
        "servers" => [{"host" => "a", "port" => 80}, {"host" => "b", "port" => 81}],
        "empty" => [],
        "none" => {},
    });
    assert_eq!(built["servers"][1]["port"].as_u64(), Some(81));
    assert_eq!(built["empty"].as_sequence().map(|s| s.len()), Some(0));
    assert!(built["none"].as_mapping().is_some_and(Mapping::is_empty));

    let mut expected = Mapping::new();
    expected.insert("host", "a");
    expected.insert("port", 80);
    assert_eq!(built["servers"][0], Node::Mapping(expected));
}

#[test]
fn explicit_constructors_keep_tag_and_style() {
    let scalar = Node::scalar("12", Tag::explicit("!!str"), ScalarStyle::SingleQuoted);
    assert_eq!(scalar.tag(), &Tag::Explicit("!!str".to_owned()));
    assert_eq!(scalar.scalar_style(), Some(ScalarStyle::SingleQuoted));

    let seq = Node::sequence(vec![Node::from(1)], Tag::Implicit, CollectionStyle::Flow);
    assert_eq!(seq.collection_style(), Some(CollectionStyle::Flow));
    assert_eq!(seq, Node::Sequence(Sequence::from(vec![Node::from(1)])));
}

#[test]
fn set_tag_keeps_content() {
    let mut node = Node::from("aGk=");
    node.set_tag(Tag::explicit("tag:yaml.org,2002:binary"));
    assert_eq!(node.as_str(), Some("aGk="));
    assert_eq!(node.as_binary(), Some(b"hi".to_vec()));
}

#[test]
fn count_includes_keys_and_self() {
    let tree = node!({"a" => [1, 2], "b" => "c"});
    // mapping + (a + seq + 1 + 2) + (b + c)
    assert_eq!(tree.count(), 7);
}

struct Endpoint {
    host: &'static str,
    port: u16,
}

#[test]
fn macro_accepts_arbitrary_expressions() {
    let endpoint = Endpoint { host: "db", port: 5432 };
    let doc = node!({
        "offsets" => [-1, -2 * 3, 1 + 1],
        "host" => endpoint.host,
        endpoint.port.to_string() => "by port",
        "nested" => [[-0.5], {"k" => !true}],
        "empty" => [],
    });

    assert_eq!(doc["offsets"].array::<i64>(), [-1, -6, 2]);
    assert_eq!(doc["host"].as_str(), Some("db"));
    assert_eq!(doc["5432"].as_str(), Some("by port"));
    assert_eq!(doc["nested"][0][0].as_f64(), Some(-0.5));
    assert_eq!(doc["nested"][1]["k"].as_bool(), Some(false));
    assert_eq!(doc["empty"].as_sequence().map(|s| s.len()), Some(0));
    assert_eq!(node!([-1]), node!([Node::from(-1)]));
}
