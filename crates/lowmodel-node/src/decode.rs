use lowmodel_canonical::Pairs;
use serde_json::{Map, Number, Value};
use yaml_rust2::Yaml;

use crate::errors::DecodeError;
use crate::tree::{NodeId, NodeKind, ScalarStyle, Tree};

/// Maximum nesting depth when decoding untyped values.
pub const MAX_DEPTH: usize = 256;

/// Node visits allowed per tree node when decoding one untyped value.
///
/// Aliases may repeat their anchor, but a value expanding past
/// `tree.len() * MAX_ALIAS_EXPANSION` nodes fails with
/// [`DecodeError::TooManyAliases`].
pub const MAX_ALIAS_EXPANSION: usize = 10;

/// Decodes a typed value from a node.
///
/// Implementations resolve aliases first, so an alias decodes exactly like
/// the node it points at.
pub trait FromNode: Sized {
    /// Decodes `id` from `tree`.
    fn from_node(tree: &Tree, id: NodeId) -> Result<Self, DecodeError>;
}

fn expect_kind(tree: &Tree, id: NodeId, expected: NodeKind) -> Result<NodeId, DecodeError> {
    let id = tree.resolve_alias(id);
    let node = tree.node(id);
    if node.kind != expected {
        return Err(DecodeError::UnexpectedKind {
            expected,
            found: node.kind,
            mark: node.mark,
        });
    }
    Ok(id)
}

/// Resolves a scalar node to an untyped value.
///
/// Quoted and block scalars are always strings. Plain scalars resolve the
/// way the YAML loader resolves them: `~`, `null` and the empty scalar are
/// null, `true`/`false` are booleans, integers may be written `0x` or `0o`,
/// then floats. Floats JSON cannot represent (`.inf`, `.nan`) stay strings.
pub fn scalar_value(tree: &Tree, id: NodeId) -> Value {
    let node = tree.node(tree.resolve_alias(id));
    if node.style != ScalarStyle::Plain {
        return Value::String(node.value.clone());
    }
    if node.value.is_empty() {
        return Value::Null;
    }
    match Yaml::from_str(&node.value) {
        Yaml::Null => Value::Null,
        Yaml::Boolean(b) => Value::Bool(b),
        Yaml::Integer(i) => Value::Number(i.into()),
        real @ Yaml::Real(_) => real
            .as_f64()
            .and_then(Number::from_f64)
            .map_or_else(|| Value::String(node.value.clone()), Value::Number),
        _ => Value::String(node.value.clone()),
    }
}

/// Walks a node into an untyped value, bounding depth and alias fan-out.
struct Decoder<'t> {
    tree: &'t Tree,
    budget: usize,
    limit: usize,
}

impl<'t> Decoder<'t> {
    fn new(tree: &'t Tree) -> Self {
        let limit = tree.len().max(1).saturating_mul(MAX_ALIAS_EXPANSION);
        Self {
            tree,
            budget: limit,
            limit,
        }
    }

    fn decode(&mut self, id: NodeId, depth: usize) -> Result<Value, DecodeError> {
        let tree = self.tree;
        let id = tree.resolve_alias(id);
        let node = tree.node(id);
        if depth > MAX_DEPTH {
            return Err(DecodeError::TooDeep {
                limit: MAX_DEPTH,
                mark: node.mark,
            });
        }
        if self.budget == 0 {
            return Err(DecodeError::TooManyAliases {
                limit: self.limit,
                mark: node.mark,
            });
        }
        self.budget -= 1;
        match node.kind {
            NodeKind::Scalar | NodeKind::Alias => Ok(scalar_value(tree, id)),
            NodeKind::Sequence => {
                let mut items = Vec::with_capacity(node.content.len());
                for item in &node.content {
                    items.push(self.decode(*item, depth + 1)?);
                }
                Ok(Value::Array(items))
            }
            NodeKind::Mapping => {
                if node.content.len() % 2 != 0 {
                    return Err(DecodeError::OddChildren {
                        count: node.content.len(),
                        mark: node.mark,
                    });
                }
                let mut map = Map::new();
                for (k, v) in tree.entries(id) {
                    let key =
                        String::from_node(tree, k).map_err(|e| DecodeError::Key(Box::new(e)))?;
                    let value = self
                        .decode(v, depth + 1)
                        .map_err(|e| DecodeError::Value(Box::new(e)))?;
                    map.insert(key, value);
                }
                Ok(Value::Object(map))
            }
        }
    }
}

impl FromNode for Value {
    fn from_node(tree: &Tree, id: NodeId) -> Result<Self, DecodeError> {
        Decoder::new(tree).decode(id, 0)
    }
}

impl FromNode for String {
    fn from_node(tree: &Tree, id: NodeId) -> Result<Self, DecodeError> {
        let id = expect_kind(tree, id, NodeKind::Scalar)?;
        Ok(tree.node(id).value.clone())
    }
}

impl FromNode for bool {
    fn from_node(tree: &Tree, id: NodeId) -> Result<Self, DecodeError> {
        let id = expect_kind(tree, id, NodeKind::Scalar)?;
        match scalar_value(tree, id) {
            Value::Bool(b) => Ok(b),
            _ => Err(scalar_error(tree, id, "bool")),
        }
    }
}

impl FromNode for i64 {
    fn from_node(tree: &Tree, id: NodeId) -> Result<Self, DecodeError> {
        let id = expect_kind(tree, id, NodeKind::Scalar)?;
        scalar_value(tree, id)
            .as_i64()
            .ok_or_else(|| scalar_error(tree, id, "integer"))
    }
}

impl FromNode for f64 {
    fn from_node(tree: &Tree, id: NodeId) -> Result<Self, DecodeError> {
        let id = expect_kind(tree, id, NodeKind::Scalar)?;
        scalar_value(tree, id)
            .as_f64()
            .ok_or_else(|| scalar_error(tree, id, "float"))
    }
}

fn scalar_error(tree: &Tree, id: NodeId, target: &'static str) -> DecodeError {
    let node = tree.node(id);
    DecodeError::Scalar {
        target,
        value: node.value.clone(),
        mark: node.mark,
    }
}

/// Anchor-aware decoder for ordered pairs.
///
/// Fails when the node is not a mapping or has an odd number of children;
/// otherwise yields entries in document order.
impl<K: FromNode, V: FromNode> FromNode for Pairs<K, V> {
    fn from_node(tree: &Tree, id: NodeId) -> Result<Self, DecodeError> {
        let id = expect_kind(tree, id, NodeKind::Mapping)?;
        let node = tree.node(id);
        if node.content.len() % 2 != 0 {
            return Err(DecodeError::OddChildren {
                count: node.content.len(),
                mark: node.mark,
            });
        }
        let mut pairs = Pairs::with_capacity(node.content.len() / 2);
        for (k, v) in tree.entries(id) {
            let key = K::from_node(tree, k).map_err(|e| DecodeError::Key(Box::new(e)))?;
            let value = V::from_node(tree, v).map_err(|e| DecodeError::Value(Box::new(e)))?;
            pairs.push(key, value);
        }
        Ok(pairs)
    }
}
