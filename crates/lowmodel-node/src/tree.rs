use std::fmt;

/// Key that introduces a YAML merge (`<<: *base`).
pub const MERGE_KEY: &str = "<<";

/// Handle to a node inside a [`Tree`].
///
/// Handles are plain indices: they do not borrow the tree and can be stored
/// freely, but only mean something for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Source position, both components 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mark {
    /// Line number.
    pub line: usize,
    /// Column number.
    pub column: usize,
}

impl Mark {
    /// Creates a position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}", self.line, self.column)
    }
}

/// Structural kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Leaf text value.
    Scalar,
    /// Ordered list of nodes.
    Sequence,
    /// Alternating key and value nodes.
    Mapping,
    /// Reference to an anchored node.
    Alias,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
            NodeKind::Alias => "alias",
        };
        f.write_str(name)
    }
}

/// How a scalar was written. Only plain scalars are subject to type resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalarStyle {
    /// Unquoted.
    #[default]
    Plain,
    /// Single- or double-quoted.
    Quoted,
    /// Literal (`|`) or folded (`>`) block.
    Block,
}

/// One element of a parsed document.
#[derive(Debug, Clone)]
pub struct Node {
    /// Structural kind.
    pub kind: NodeKind,
    /// Scalar text; empty for collections and aliases.
    pub value: String,
    /// Scalar style.
    pub style: ScalarStyle,
    /// Anchor id when the node was declared with `&name`.
    pub anchor: Option<usize>,
    /// Anchored node an alias points at.
    pub alias_of: Option<NodeId>,
    /// Children: items for sequences, alternating key/value for mappings.
    pub content: Vec<NodeId>,
    /// Position of the node in its source.
    pub mark: Mark,
}

impl Node {
    /// Creates a plain scalar.
    pub fn scalar(value: impl Into<String>, mark: Mark) -> Self {
        Self::with_kind(NodeKind::Scalar, value.into(), mark)
    }

    /// Creates an empty mapping.
    pub fn mapping(mark: Mark) -> Self {
        Self::with_kind(NodeKind::Mapping, String::new(), mark)
    }

    /// Creates an empty sequence.
    pub fn sequence(mark: Mark) -> Self {
        Self::with_kind(NodeKind::Sequence, String::new(), mark)
    }

    /// Creates an alias to `target`.
    pub fn alias(target: NodeId, mark: Mark) -> Self {
        let mut node = Self::with_kind(NodeKind::Alias, String::new(), mark);
        node.alias_of = Some(target);
        node
    }

    fn with_kind(kind: NodeKind, value: String, mark: Mark) -> Self {
        Self {
            kind,
            value,
            style: ScalarStyle::Plain,
            anchor: None,
            alias_of: None,
            content: Vec::new(),
            mark,
        }
    }
}

/// Append-only arena owning every node of one or more documents.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its handle.
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Appends `child` to the content of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].content.push(child);
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node for a handle issued by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Node for a handle, or `None` if the handle is out of range.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Source position of a node.
    pub fn mark(&self, id: NodeId) -> Mark {
        self.node(id).mark
    }

    /// Follows alias links until a non-alias node is reached.
    ///
    /// An alias always behaves exactly like the node it points at, so every
    /// consumer calls this before looking at a node's kind or content.
    pub fn resolve_alias(&self, mut id: NodeId) -> NodeId {
        // A chain can never be longer than the arena.
        for _ in 0..=self.nodes.len() {
            match self.node(id).alias_of {
                Some(target) if self.node(id).kind == NodeKind::Alias => id = target,
                _ => break,
            }
        }
        id
    }

    /// Kind of the node after alias resolution.
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(self.resolve_alias(id)).kind
    }

    /// Returns true if the node (after alias resolution) is a mapping.
    pub fn is_mapping(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::Mapping
    }

    /// Returns true if the node (after alias resolution) is a scalar.
    pub fn is_scalar(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::Scalar
    }

    /// Returns true if the node (after alias resolution) is a sequence.
    pub fn is_sequence(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::Sequence
    }

    /// Scalar text of a node after alias resolution.
    pub fn text(&self, id: NodeId) -> &str {
        &self.node(self.resolve_alias(id)).value
    }

    /// Key/value handle pairs of a mapping, in document order.
    ///
    /// Aliases on the mapping itself are resolved; key and value handles are
    /// returned as written. A trailing key without a value is skipped.
    pub fn entries(&self, mapping: NodeId) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let node = self.node(self.resolve_alias(mapping));
        let content: &[NodeId] = if node.kind == NodeKind::Mapping {
            &node.content
        } else {
            &[]
        };
        content.chunks_exact(2).map(|kv| (kv[0], kv[1]))
    }

    /// Finds the first entry of `mapping` whose key text equals `label`.
    pub fn find_key(&self, label: &str, mapping: NodeId) -> Option<(NodeId, NodeId)> {
        self.entries(mapping).find(|(k, _)| {
            let key = self.resolve_alias(*k);
            self.node(key).kind == NodeKind::Scalar && self.node(key).value == label
        })
    }

    /// Key nodes of `mapping` that introduce a YAML merge.
    pub fn merge_keys(&self, mapping: NodeId) -> Vec<NodeId> {
        self.entries(mapping)
            .filter(|(k, _)| self.is_merge_key(*k))
            .map(|(k, _)| k)
            .collect()
    }

    /// True for a plain `<<` key.
    pub fn is_merge_key(&self, key: NodeId) -> bool {
        let key = self.node(key);
        key.kind == NodeKind::Scalar && key.style == ScalarStyle::Plain && key.value == MERGE_KEY
    }
}
