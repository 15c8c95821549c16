use std::collections::HashMap;

use tracing::debug;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::errors::LoadError;
use crate::tree::{Mark, Node, NodeId, ScalarStyle, Tree};

fn to_mark(marker: &Marker) -> Mark {
    // The scanner counts lines from 1 and columns from 0.
    Mark::new(marker.line(), marker.col() + 1)
}

/// Receives parser events and appends nodes to the arena.
struct TreeBuilder<'t> {
    tree: &'t mut Tree,
    open: Vec<NodeId>,
    anchors: HashMap<usize, NodeId>,
    root: Option<NodeId>,
    error: Option<LoadError>,
}

impl<'t> TreeBuilder<'t> {
    fn new(tree: &'t mut Tree) -> Self {
        Self {
            tree,
            open: Vec::new(),
            anchors: HashMap::new(),
            root: None,
            error: None,
        }
    }

    fn attach(&mut self, id: NodeId) {
        match self.open.last() {
            Some(&parent) => self.tree.append_child(parent, id),
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }
    }

    fn add(&mut self, mut node: Node, anchor: usize) -> NodeId {
        if anchor > 0 {
            node.anchor = Some(anchor);
        }
        let id = self.tree.push(node);
        if anchor > 0 {
            self.anchors.insert(anchor, id);
        }
        self.attach(id);
        id
    }
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, event: Event, marker: Marker) {
        if self.error.is_some() {
            return;
        }
        let mark = to_mark(&marker);
        match event {
            Event::Scalar(value, style, anchor, ..) => {
                let mut node = Node::scalar(value, mark);
                node.style = match style {
                    TScalarStyle::Plain => ScalarStyle::Plain,
                    TScalarStyle::SingleQuoted | TScalarStyle::DoubleQuoted => ScalarStyle::Quoted,
                    _ => ScalarStyle::Block,
                };
                self.add(node, anchor);
            }
            Event::SequenceStart(anchor, ..) => {
                let id = self.add(Node::sequence(mark), anchor);
                self.open.push(id);
            }
            Event::MappingStart(anchor, ..) => {
                let id = self.add(Node::mapping(mark), anchor);
                self.open.push(id);
            }
            Event::SequenceEnd | Event::MappingEnd => {
                self.open.pop();
            }
            Event::Alias(anchor) => match self.anchors.get(&anchor) {
                Some(&target) => {
                    let id = self.tree.push(Node::alias(target, mark));
                    self.attach(id);
                }
                None => self.error = Some(LoadError::UnknownAnchor { anchor, mark }),
            },
            _ => {}
        }
    }
}

impl Tree {
    /// Parses the first document of `source` into this arena and returns its root.
    ///
    /// JSON input is accepted as the flow subset of YAML. An empty stream
    /// yields an empty plain scalar (a null document).
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Scan`] when the text is not well-formed and
    /// [`LoadError::UnknownAnchor`] for an alias without a matching anchor.
    pub fn load_str(&mut self, source: &str) -> Result<NodeId, LoadError> {
        let before = self.len();
        let mut builder = TreeBuilder::new(self);
        let mut parser = Parser::new(source.chars());
        parser
            .load(&mut builder, false)
            .map_err(|err| LoadError::Scan {
                mark: to_mark(err.marker()),
                message: err.info().to_string(),
            })?;
        if let Some(err) = builder.error.take() {
            return Err(err);
        }
        let found = builder.root;
        let root = match found {
            Some(root) => root,
            None => self.push(Node::scalar("", Mark::new(1, 1))),
        };
        debug!(nodes = self.len() - before, "loaded document");
        Ok(root)
    }
}
