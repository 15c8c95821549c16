use lowmodel_node::{LoadError, NodeId, NodeKind, Tree};
use std::collections::HashSet;
use tracing::debug;

use crate::errors::ResolveError;
use crate::extract::ref_pointer;
use crate::options::ExtractOptions;

/// Resolver interface consumed by Build.
///
/// Implementations own (or borrow) the node tree that every `NodeId` handed
/// to Build belongs to. Build only reads through this interface; whether
/// `resolve_reference` is safe to call from several threads is up to the
/// implementation.
pub trait SpecIndex {
    /// Arena holding every node Build may visit.
    fn tree(&self) -> &Tree;

    /// Extraction settings.
    fn options(&self) -> &ExtractOptions;

    /// Resolves a `$ref` pointer to its target node.
    fn resolve_reference(&self, pointer: &str) -> Result<NodeId, ResolveError>;
}

/// In-memory index over one root document and any number of named siblings.
///
/// Understands local JSON pointers (`#/a/b/0`) and `name#/pointer` into a
/// registered sibling document. Chained references are followed until a
/// non-reference node is reached; revisiting a pointer is reported as
/// [`ResolveError::Circular`].
#[derive(Debug, Clone)]
pub struct DocumentIndex {
    tree: Tree,
    root: NodeId,
    documents: Vec<(String, NodeId)>,
    options: ExtractOptions,
}

impl DocumentIndex {
    /// Parses `source` as the root document.
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        let mut tree = Tree::new();
        let root = tree.load_str(source)?;
        Ok(Self {
            tree,
            root,
            documents: Vec::new(),
            options: ExtractOptions::default(),
        })
    }

    /// Replaces the extraction settings.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses `source` as a sibling document reachable as `name#/...`.
    pub fn add_document(&mut self, name: &str, source: &str) -> Result<NodeId, LoadError> {
        let root = self.tree.load_str(source)?;
        self.documents.push((name.to_string(), root));
        Ok(root)
    }

    /// Root node of the root document.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Root node of a registered sibling document.
    pub fn document(&self, name: &str) -> Option<NodeId> {
        self.documents
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }

    /// Walks a JSON pointer path (the part after `#`) from `start`.
    pub fn lookup_pointer(&self, start: NodeId, path: &str) -> Option<NodeId> {
        if path.is_empty() || path == "/" {
            return Some(start);
        }
        let path = path.strip_prefix('/')?;
        let mut current = start;
        for raw in path.split('/') {
            let segment = raw.replace("~1", "/").replace("~0", "~");
            current = self.tree.resolve_alias(current);
            current = match self.tree.node(current).kind {
                NodeKind::Mapping => self.tree.find_key(&segment, current)?.1,
                NodeKind::Sequence => {
                    let index: usize = segment.parse().ok()?;
                    *self.tree.node(current).content.get(index)?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    fn resolve_once(&self, pointer: &str, base: Option<&str>) -> Result<NodeId, ResolveError> {
        let (document, path) = pointer
            .split_once('#')
            .ok_or_else(|| ResolveError::Unsupported(pointer.to_string()))?;
        let document = if document.is_empty() {
            base.unwrap_or("")
        } else {
            document
        };
        let start = if document.is_empty() {
            self.root
        } else {
            self.document(document)
                .ok_or_else(|| ResolveError::UnknownDocument {
                    document: document.to_string(),
                    pointer: pointer.to_string(),
                })?
        };
        self.lookup_pointer(start, path)
            .ok_or_else(|| ResolveError::NotFound(pointer.to_string()))
    }
}

impl SpecIndex for DocumentIndex {
    fn tree(&self) -> &Tree {
        &self.tree
    }

    fn options(&self) -> &ExtractOptions {
        &self.options
    }

    fn resolve_reference(&self, pointer: &str) -> Result<NodeId, ResolveError> {
        let mut seen = HashSet::new();
        let mut current = pointer.to_string();
        // Local pointers inside a sibling document stay in that document.
        let mut base: Option<String> = None;
        loop {
            let key = format!("{}|{}", base.as_deref().unwrap_or(""), current);
            if !seen.insert(key) {
                return Err(ResolveError::Circular(pointer.to_string()));
            }
            let target = self.resolve_once(&current, base.as_deref())?;
            debug!(pointer = current.as_str(), "resolved reference");
            match ref_pointer(&self.tree, target) {
                Some(next) => {
                    if let Some((doc, _)) = current.split_once('#') {
                        if !doc.is_empty() {
                            base = Some(doc.to_string());
                        }
                    }
                    current = next;
                }
                None => return Ok(target),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
components:
  responses:
    NotFound:
      description: missing
    Alias:
      $ref: '#/components/responses/NotFound'
    Loop:
      $ref: '#/components/responses/Loop'
  list:
    - first
    - second
  a/b: slash
";

    #[test]
    fn resolves_local_pointer() {
        let index = DocumentIndex::parse(DOC).unwrap();
        let node = index
            .resolve_reference("#/components/responses/NotFound")
            .unwrap();
        assert!(index.tree().is_mapping(node));
        assert!(index.tree().find_key("description", node).is_some());
    }

    #[test]
    fn follows_chained_reference() {
        let index = DocumentIndex::parse(DOC).unwrap();
        let direct = index
            .resolve_reference("#/components/responses/NotFound")
            .unwrap();
        let chained = index.resolve_reference("#/components/responses/Alias").unwrap();
        assert_eq!(direct, chained);
    }

    #[test]
    fn detects_cycles() {
        let index = DocumentIndex::parse(DOC).unwrap();
        let err = index
            .resolve_reference("#/components/responses/Loop")
            .unwrap_err();
        assert!(matches!(err, ResolveError::Circular(_)));
    }

    #[test]
    fn sequence_index_and_escapes() {
        let index = DocumentIndex::parse(DOC).unwrap();
        let second = index.resolve_reference("#/components/list/1").unwrap();
        assert_eq!(index.tree().text(second), "second");
        let slash = index.resolve_reference("#/components/a~1b").unwrap();
        assert_eq!(index.tree().text(slash), "slash");
    }

    #[test]
    fn sibling_documents() {
        let mut index = DocumentIndex::parse("a: 1\n").unwrap();
        index
            .add_document("common.yaml", "shared:\n  value: 2\nlink:\n  $ref: '#/shared'\n")
            .unwrap();
        let node = index.resolve_reference("common.yaml#/shared/value").unwrap();
        assert_eq!(index.tree().text(node), "2");
        let linked = index.resolve_reference("common.yaml#/link").unwrap();
        assert!(index.tree().find_key("value", linked).is_some());
        assert!(matches!(
            index.resolve_reference("other.yaml#/x"),
            Err(ResolveError::UnknownDocument { .. })
        ));
    }

    #[test]
    fn unsupported_and_missing() {
        let index = DocumentIndex::parse(DOC).unwrap();
        assert!(matches!(
            index.resolve_reference("https://example.com/spec.yaml"),
            Err(ResolveError::Unsupported(_))
        ));
        assert!(matches!(
            index.resolve_reference("#/components/nothing"),
            Err(ResolveError::NotFound(_))
        ));
    }
}
