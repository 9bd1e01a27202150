//! Read-only capability interface over an already-parsed syntax tree.
//!
//! Any front end (tree-sitter grammar, compiler AST, LSP symbol tree) can feed
//! the extractor by implementing [`SyntaxNode`] for a cheap node handle. The
//! extractor never mutates nodes and never depends on a concrete tree.

use std::fmt;

/// Coarse classification of a node, as far as description extraction cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Class, interface, object, enum, record or anonymous class body.
    Class,
    /// Method, free function or constructor.
    Method,
    /// Lambda or closure expression.
    Lambda,
    /// Formal or lambda parameter.
    Parameter,
    Other,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Class => "class",
            NodeKind::Method => "method",
            NodeKind::Lambda => "lambda",
            NodeKind::Parameter => "parameter",
            NodeKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// Identity of the file a node was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOrigin {
    /// File name without directories, e.g. `Foo.class`.
    pub name: String,
    /// Protocol of the containing file system, e.g. `file` or `jar`.
    pub protocol: String,
}

impl FileOrigin {
    pub fn new(name: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            protocol: protocol.into(),
        }
    }
}

/// A handle to one node of a parsed tree.
///
/// Handles are expected to be cheap to clone (a reference plus an index).
pub trait SyntaxNode: Clone {
    fn kind(&self) -> NodeKind;

    fn parent(&self) -> Option<Self>;

    /// Declared name of a class, method or parameter.
    fn name(&self) -> Option<String>;

    /// Fully qualified name of a class. `None` for anonymous and local classes.
    fn qualified_name(&self) -> Option<String>;

    /// Modifier keywords the node carries, explicit or implied by the language.
    fn modifiers(&self) -> Vec<String>;

    fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers().iter().any(|m| m == modifier)
    }

    fn is_constructor(&self) -> bool;

    /// Whether this node itself declares an interface. Only class nodes ever answer `true`.
    fn is_interface(&self) -> bool;

    /// Parameters in declaration order. Empty for non method-like nodes.
    fn parameters(&self) -> Vec<Self>;

    /// Canonical type text: return type of a method, expression type of a lambda,
    /// declared type of a parameter.
    ///
    /// Parameters whose type cannot be resolved report a front-end placeholder
    /// rather than `None`.
    fn type_text(&self) -> Option<String>;

    /// Raw source text of the node.
    fn text(&self) -> String;

    /// File this node belongs to, if the front end tracks one.
    fn origin(&self) -> Option<FileOrigin>;

    /// Start offset of the node in its source file.
    fn offset(&self) -> usize;

    /// Offset editors navigate to: the declared name when there is one.
    fn navigation_offset(&self) -> usize {
        self.offset()
    }

    /// Children in source order.
    fn children(&self) -> Vec<Self>;

    /// Nearest class strictly above this node.
    fn containing_class(&self) -> Option<Self> {
        self.ancestor_of_kind(NodeKind::Class)
    }

    /// Nearest method strictly above this node.
    fn containing_method(&self) -> Option<Self> {
        self.ancestor_of_kind(NodeKind::Method)
    }

    /// Walk parent links one level at a time until `kind` matches or the root is passed.
    fn ancestor_of_kind(&self, kind: NodeKind) -> Option<Self> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.kind() == kind {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }
}

macro_rules! typed_view {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<N>(N);

        impl<N: SyntaxNode> $name<N> {
            /// Wrap `node` if it has the matching kind.
            pub fn cast(node: N) -> Option<Self> {
                (node.kind() == $kind).then_some(Self(node))
            }

            pub fn syntax(&self) -> &N {
                &self.0
            }
        }
    };
}

typed_view!(
    /// A node known to be a method, function or constructor.
    MethodNode,
    NodeKind::Method
);
typed_view!(
    /// A node known to be a lambda or closure.
    LambdaNode,
    NodeKind::Lambda
);
typed_view!(
    /// A node known to be a class-like declaration.
    ClassNode,
    NodeKind::Class
);
