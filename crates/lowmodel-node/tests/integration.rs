use lowmodel_canonical::Pairs;
use lowmodel_node::{DecodeError, FromNode, Mark, Node, NodeKind, Tree};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn load(source: &str) -> (Tree, lowmodel_node::NodeId) {
    let mut tree = Tree::new();
    let root = tree.load_str(source).unwrap();
    (tree, root)
}

#[test]
fn test_pairs_decode_preserves_document_order() {
    let (tree, root) = load("zeta: 1\nalpha: 2\nmid: 3\n");
    let pairs = Pairs::<String, i64>::from_node(&tree, root).unwrap();
    let keys: Vec<&str> = pairs.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    assert_eq!(pairs.get("alpha"), Some(&2));
}

#[test]
fn test_pairs_decode_then_json_encode_keeps_order() {
    let (tree, root) = load(r#"{"k3": "c", "k1": "a", "k2": "b"}"#);
    let pairs = Pairs::<String, Value>::from_node(&tree, root).unwrap();
    assert_eq!(
        serde_json::to_string(&pairs).unwrap(),
        r#"{"k3":"c","k1":"a","k2":"b"}"#
    );
}

#[test]
fn test_pairs_decode_rejects_sequence() {
    let (tree, root) = load("- a\n- b\n");
    let err = Pairs::<String, String>::from_node(&tree, root).unwrap_err();
    match err {
        DecodeError::UnexpectedKind {
            expected, found, mark,
        } => {
            assert_eq!(expected, NodeKind::Mapping);
            assert_eq!(found, NodeKind::Sequence);
            assert_eq!(mark.line, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pairs_decode_rejects_odd_children() {
    let mut tree = Tree::new();
    let map = tree.push(Node::mapping(Mark::new(4, 2)));
    let key = tree.push(Node::scalar("dangling", Mark::new(4, 3)));
    tree.append_child(map, key);

    let err = Pairs::<String, String>::from_node(&tree, map).unwrap_err();
    assert!(matches!(err, DecodeError::OddChildren { count: 1, .. }));
    assert_eq!(err.mark(), Mark::new(4, 2));
}

#[test]
fn test_pairs_decode_reports_value_failure() {
    let (tree, root) = load("a: 1\nb: {c: 2}\n");
    let err = Pairs::<String, String>::from_node(&tree, root).unwrap_err();
    assert!(matches!(err, DecodeError::Value(_)));
    assert_eq!(err.mark().line, 2);
}

#[test]
fn test_alias_decodes_like_anchor() {
    let (tree, root) = load("base: &b\n  x: 1\n  y: [true, ~]\ncopy: *b\n");
    let pairs = Pairs::<String, Value>::from_node(&tree, root).unwrap();
    assert_eq!(pairs.get("base"), pairs.get("copy"));
    assert_eq!(pairs.get("copy"), Some(&json!({"x": 1, "y": [true, null]})));
}

#[test]
fn test_scalar_resolution() {
    let (tree, root) = load("i: 42\nh: 0x1f\nf: 1.5\ns: '42'\nb: false\nn: ~\ninf: .inf\nw: hello\n");
    let pairs = Pairs::<String, Value>::from_node(&tree, root).unwrap();
    assert_eq!(pairs.get("i"), Some(&json!(42)));
    assert_eq!(pairs.get("h"), Some(&json!(31)));
    assert_eq!(pairs.get("f"), Some(&json!(1.5)));
    assert_eq!(pairs.get("s"), Some(&json!("42")));
    assert_eq!(pairs.get("b"), Some(&json!(false)));
    assert_eq!(pairs.get("n"), Some(&Value::Null));
    assert_eq!(pairs.get("inf"), Some(&json!(".inf")));
    assert_eq!(pairs.get("w"), Some(&json!("hello")));
}

#[test]
fn test_scalar_resolution_edge_cases() {
    let (tree, root) = load("o: 0o17
p: +7
e: 1e3
neg: -2
empty:
q: ''
nan: .nan
yes: True
");
    let pairs = Pairs::<String, Value>::from_node(&tree, root).unwrap();
    assert_eq!(pairs.get("o"), Some(&json!(15)));
    assert_eq!(pairs.get("p"), Some(&json!(7)));
    assert_eq!(pairs.get("e"), Some(&json!(1000.0)));
    assert_eq!(pairs.get("neg"), Some(&json!(-2)));
    assert_eq!(pairs.get("empty"), Some(&Value::Null));
    assert_eq!(pairs.get("q"), Some(&json!("")));
    assert_eq!(pairs.get("nan"), Some(&json!(".nan")));
    assert_eq!(pairs.get("yes"), Some(&json!("True")));
}

const ALIAS_FAN_OUT: &str = "\
a: &a [x, x, x, x, x, x, x, x, x, x]
b: &b [*a, *a, *a, *a, *a, *a, *a, *a, *a, *a]
c: &c [*b, *b, *b, *b, *b, *b, *b, *b, *b, *b]
d: &d [*c, *c, *c, *c, *c, *c, *c, *c, *c, *c]
e: &e [*d, *d, *d, *d, *d, *d, *d, *d, *d, *d]
";

#[test]
fn test_alias_fan_out_is_bounded() {
    let (tree, root) = load(ALIAS_FAN_OUT);
    let (_, e) = tree.find_key("e", root).unwrap();
    let err = Value::from_node(&tree, e).unwrap_err();
    assert!(matches!(err, DecodeError::TooManyAliases { .. }));
    assert!(err.to_string().contains("alias expansion"));

    match Pairs::<String, Value>::from_node(&tree, root).unwrap_err() {
        DecodeError::Value(inner) => {
            assert!(matches!(*inner, DecodeError::TooManyAliases { .. }))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_modest_alias_reuse_decodes() {
    let (tree, root) = load(ALIAS_FAN_OUT);
    let (_, b) = tree.find_key("b", root).unwrap();
    let value = Value::from_node(&tree, b).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[9], json!(["x", "x", "x", "x", "x", "x", "x", "x", "x", "x"]));
}

#[test]
fn test_typed_scalar_errors_carry_position() {
    let (tree, root) = load("flag: maybe\n");
    let (_, value) = tree.find_key("flag", root).unwrap();
    let err = bool::from_node(&tree, value).unwrap_err();
    assert!(matches!(err, DecodeError::Scalar { target: "bool", .. }));
    assert_eq!(err.mark(), tree.mark(value));
}

#[test]
fn test_empty_document_is_not_a_mapping() {
    let (tree, root) = load("");
    assert!(Pairs::<String, Value>::from_node(&tree, root).is_err());
    assert_eq!(Value::from_node(&tree, root).unwrap(), Value::Null);
}
