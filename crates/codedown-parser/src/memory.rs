//! In-memory syntax tree.
//!
//! Lets hosts that already hold a symbol tree (a compiler AST, an LSP document
//! symbol response) feed the extractor without tree-sitter. Nodes live in an
//! arena and are addressed by [`NodeId`].

use crate::syntax::{FileOrigin, NodeKind, SyntaxNode};

/// Index of a node in a [`MemoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    name: Option<String>,
    qualified_name: Option<String>,
    modifiers: Vec<String>,
    constructor: bool,
    interface: bool,
    type_text: Option<String>,
    text: String,
    offset: usize,
}

impl NodeData {
    fn new(kind: NodeKind, parent: Option<NodeId>, offset: usize) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            name: None,
            qualified_name: None,
            modifiers: Vec::new(),
            constructor: false,
            interface: false,
            type_text: None,
            text: String::new(),
            offset,
        }
    }
}

/// Arena of nodes from one source file. Node 0 is the root.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    origin: Option<FileOrigin>,
    nodes: Vec<NodeData>,
}

impl MemoryTree {
    pub fn new(origin: FileOrigin) -> Self {
        Self {
            origin: Some(origin),
            nodes: vec![NodeData::new(NodeKind::Other, None, 0)],
        }
    }

    /// A tree whose file identity is unknown.
    pub fn detached() -> Self {
        Self {
            origin: None,
            nodes: vec![NodeData::new(NodeKind::Other, None, 0)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> MemoryNode<'_> {
        MemoryNode { tree: self, id }
    }

    /// Append a node under `parent`. Offsets default to creation order.
    pub fn add(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(kind, Some(parent), id.0));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn add_class(
        &mut self,
        parent: NodeId,
        name: &str,
        qualified_name: Option<&str>,
    ) -> NodeId {
        let id = self.add(parent, NodeKind::Class);
        let data = &mut self.nodes[id.0];
        data.name = Some(name.to_string());
        data.qualified_name = qualified_name.map(String::from);
        id
    }

    pub fn add_method(&mut self, parent: NodeId, name: &str, return_type: Option<&str>) -> NodeId {
        let id = self.add(parent, NodeKind::Method);
        let data = &mut self.nodes[id.0];
        data.name = Some(name.to_string());
        data.type_text = return_type.map(String::from);
        id
    }

    pub fn add_lambda(&mut self, parent: NodeId, expression_type: Option<&str>) -> NodeId {
        let id = self.add(parent, NodeKind::Lambda);
        self.nodes[id.0].type_text = expression_type.map(String::from);
        id
    }

    pub fn add_parameter(&mut self, owner: NodeId, name: &str, type_text: &str) -> NodeId {
        let id = self.add(owner, NodeKind::Parameter);
        let data = &mut self.nodes[id.0];
        data.name = Some(name.to_string());
        data.type_text = Some(type_text.to_string());
        id
    }

    pub fn add_unnamed_parameter(&mut self, owner: NodeId, type_text: &str) -> NodeId {
        let id = self.add(owner, NodeKind::Parameter);
        self.nodes[id.0].type_text = Some(type_text.to_string());
        id
    }

    /// A structural node with no meaning for extraction (block, statement, ...).
    pub fn add_other(&mut self, parent: NodeId) -> NodeId {
        self.add(parent, NodeKind::Other)
    }

    pub fn set_modifiers<I, S>(&mut self, id: NodeId, modifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes[id.0].modifiers = modifiers.into_iter().map(Into::into).collect();
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text = text.to_string();
    }

    pub fn mark_constructor(&mut self, id: NodeId) {
        self.nodes[id.0].constructor = true;
    }

    pub fn mark_interface(&mut self, id: NodeId) {
        self.nodes[id.0].interface = true;
    }
}

/// Handle to one node of a [`MemoryTree`].
#[derive(Debug, Clone, Copy)]
pub struct MemoryNode<'a> {
    tree: &'a MemoryTree,
    id: NodeId,
}

impl MemoryNode<'_> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &NodeData {
        &self.tree.nodes[self.id.0]
    }
}

impl SyntaxNode for MemoryNode<'_> {
    fn kind(&self) -> NodeKind {
        self.data().kind
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    fn name(&self) -> Option<String> {
        self.data().name.clone()
    }

    fn qualified_name(&self) -> Option<String> {
        self.data().qualified_name.clone()
    }

    fn modifiers(&self) -> Vec<String> {
        self.data().modifiers.clone()
    }

    fn is_constructor(&self) -> bool {
        self.data().constructor
    }

    fn is_interface(&self) -> bool {
        self.data().kind == NodeKind::Class && self.data().interface
    }

    fn parameters(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .map(|&id| self.tree.node(id))
            .filter(|n| n.kind() == NodeKind::Parameter)
            .collect()
    }

    fn type_text(&self) -> Option<String> {
        self.data().type_text.clone()
    }

    fn text(&self) -> String {
        self.data().text.clone()
    }

    fn origin(&self) -> Option<FileOrigin> {
        self.tree.origin.clone()
    }

    fn offset(&self) -> usize {
        self.data().offset
    }

    fn children(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .map(|&id| self.tree.node(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_walks_are_strict() {
        let mut tree = MemoryTree::new(FileOrigin::new("A.java", "file"));
        let root = tree.root();
        let outer = tree.add_class(root, "A", Some("A"));
        let inner = tree.add_class(outer, "B", Some("A.B"));
        let method = tree.add_method(inner, "run", Some("void"));

        let inner_node = tree.node(inner);
        assert_eq!(inner_node.containing_class().unwrap().id(), outer);
        assert_eq!(tree.node(method).containing_class().unwrap().id(), inner);
        assert!(tree.node(method).containing_method().is_none());
    }

    #[test]
    fn test_parameters_exclude_other_children() {
        let mut tree = MemoryTree::new(FileOrigin::new("A.java", "file"));
        let root = tree.root();
        let method = tree.add_method(root, "f", None);
        tree.add_parameter(method, "a", "int");
        tree.add_other(method);
        tree.add_parameter(method, "b", "long");
        let names: Vec<_> = tree
            .node(method)
            .parameters()
            .iter()
            .filter_map(SyntaxNode::name)
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_interface_flag_only_on_classes() {
        let mut tree = MemoryTree::detached();
        let root = tree.root();
        let method = tree.add_method(root, "f", None);
        tree.mark_interface(method);
        assert!(!tree.node(method).is_interface());
        assert!(tree.node(method).origin().is_none());
    }
}
