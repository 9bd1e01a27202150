//! Tree-sitter front end: parsed source files exposed through [`SyntaxNode`].

use crate::languages::Language;
use crate::syntax::{FileOrigin, NodeKind, SyntaxNode};
use crate::{java, kotlin};
use std::path::{Path, PathBuf};
use tree_sitter::Node;

/// Placeholder type text for parameters whose type is not written in source.
pub const UNRESOLVED_TYPE: &str = "<unresolved>";

/// Protocol of plain on-disk files.
pub const FILE_PROTOCOL: &str = "file";

/// Errors from loading and parsing a source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unsupported language for `{path}`")]
    UnsupportedLanguage { path: PathBuf },
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to set tree-sitter language: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    #[error("failed to parse `{path}`")]
    ParseFailed { path: PathBuf },
}

/// Parse a source file and return the tree-sitter tree.
pub fn parse_file(
    path: &Path,
    source: &[u8],
    language: tree_sitter::Language,
) -> Result<tree_sitter::Tree, ParseError> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&language)?;
    parser
        .parse(source, None)
        .ok_or_else(|| ParseError::ParseFailed {
            path: path.to_path_buf(),
        })
}

/// Per-language answers to the questions [`SyntaxNode`] asks.
pub(crate) trait LanguageRules {
    fn classify(&self, node: Node<'_>) -> NodeKind;
    fn name(&self, node: Node<'_>, source: &str) -> Option<String>;
    /// Node whose start is the navigation target.
    fn name_node<'t>(&self, node: Node<'t>) -> Option<Node<'t>>;
    fn qualified_name(&self, node: Node<'_>, source: &str) -> Option<String>;
    fn modifiers(&self, node: Node<'_>, source: &str) -> Vec<String>;
    fn is_constructor(&self, node: Node<'_>) -> bool;
    fn is_interface(&self, node: Node<'_>) -> bool;
    fn parameters<'t>(&self, node: Node<'t>, source: &str) -> Vec<Node<'t>>;
    fn type_text(&self, node: Node<'_>, source: &str) -> Option<String>;
}

/// A parsed source file.
pub struct SourceFile {
    path: PathBuf,
    source: String,
    language: Language,
    protocol: String,
    tree: tree_sitter::Tree,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("language", &self.language)
            .field("protocol", &self.protocol)
            .finish_non_exhaustive()
    }
}

impl SourceFile {
    /// Parse `source` as `language`. `path` only feeds the file identity.
    pub fn parse(
        path: impl Into<PathBuf>,
        source: impl Into<String>,
        language: Language,
    ) -> Result<Self, ParseError> {
        let path = path.into();
        let source = source.into();
        let tree = parse_file(&path, source.as_bytes(), language.ts_language())?;
        if tree.root_node().has_error() {
            tracing::debug!("{} parsed with syntax errors", path.display());
        }
        Ok(Self {
            path,
            source,
            language,
            protocol: FILE_PROTOCOL.to_string(),
            tree,
        })
    }

    /// Read and parse a file, detecting the language from its extension.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let language =
            Language::from_path(path).ok_or_else(|| ParseError::UnsupportedLanguage {
                path: path.to_path_buf(),
            })?;
        let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, source, language)
    }

    /// Set the file-system protocol, e.g. `jar` for a file browsed inside an archive.
    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn origin(&self) -> FileOrigin {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        FileOrigin::new(name, self.protocol.clone())
    }

    pub fn root(&self) -> TsNode<'_> {
        self.wrap(self.tree.root_node())
    }

    pub(crate) fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    pub(crate) fn wrap<'a>(&'a self, node: Node<'a>) -> TsNode<'a> {
        TsNode { file: self, node }
    }

    fn rules(&self) -> &'static dyn LanguageRules {
        match self.language {
            Language::Java => &java::JavaRules,
            Language::Kotlin => &kotlin::KotlinRules,
        }
    }
}

/// A tree-sitter node paired with the file it came from.
#[derive(Clone, Copy)]
pub struct TsNode<'a> {
    file: &'a SourceFile,
    node: Node<'a>,
}

impl std::fmt::Debug for TsNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsNode")
            .field("kind", &self.node.kind())
            .field("range", &self.node.byte_range())
            .finish()
    }
}

impl<'a> TsNode<'a> {
    pub fn ts_node(&self) -> Node<'a> {
        self.node
    }

    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    /// Whether `offset` falls inside this node's byte range.
    pub fn contains(&self, offset: usize) -> bool {
        self.node.start_byte() <= offset && offset < self.node.end_byte()
    }
}

impl SyntaxNode for TsNode<'_> {
    fn kind(&self) -> NodeKind {
        self.file.rules().classify(self.node)
    }

    fn parent(&self) -> Option<Self> {
        self.node.parent().map(|p| self.file.wrap(p))
    }

    fn name(&self) -> Option<String> {
        self.file.rules().name(self.node, &self.file.source)
    }

    fn qualified_name(&self) -> Option<String> {
        self.file.rules().qualified_name(self.node, &self.file.source)
    }

    fn modifiers(&self) -> Vec<String> {
        self.file.rules().modifiers(self.node, &self.file.source)
    }

    fn is_constructor(&self) -> bool {
        self.file.rules().is_constructor(self.node)
    }

    fn is_interface(&self) -> bool {
        self.file.rules().is_interface(self.node)
    }

    fn parameters(&self) -> Vec<Self> {
        self.file
            .rules()
            .parameters(self.node, &self.file.source)
            .into_iter()
            .map(|p| self.file.wrap(p))
            .collect()
    }

    fn type_text(&self) -> Option<String> {
        self.file.rules().type_text(self.node, &self.file.source)
    }

    fn text(&self) -> String {
        node_text(self.node, &self.file.source).to_string()
    }

    fn origin(&self) -> Option<FileOrigin> {
        Some(self.file.origin())
    }

    fn offset(&self) -> usize {
        self.node.start_byte()
    }

    fn navigation_offset(&self) -> usize {
        self.file
            .rules()
            .name_node(self.node)
            .map_or_else(|| self.node.start_byte(), |n| n.start_byte())
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .map(|c| self.file.wrap(c))
            .collect()
    }
}

pub(crate) fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// First direct child of the given kind.
pub(crate) fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

/// Direct children of any of the given kinds, in order.
pub(crate) fn children_of_kind<'t>(node: Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| kinds.contains(&c.kind()))
        .collect()
}

/// Named child that follows the first direct `:` token (Kotlin type annotations).
pub(crate) fn after_colon(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let mut seen_colon = false;
    for child in node.children(&mut cursor) {
        if child.kind() == ":" {
            seen_colon = true;
        } else if seen_colon && child.is_named() {
            return Some(child);
        }
    }
    None
}

/// Collapse whitespace in written type text.
///
/// Whitespace survives only between two word characters, so
/// `Map<String,  List<? extends T>>` becomes `Map<String,List<? extends T>>`.
pub fn canonical_type(text: &str) -> String {
    fn wordish(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '$' || c == '?'
    }
    let mut out = String::with_capacity(text.len());
    for token in text.split_whitespace() {
        let joins_words = out.chars().last().is_some_and(wordish)
            && token.chars().next().is_some_and(wordish);
        if joins_words {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
