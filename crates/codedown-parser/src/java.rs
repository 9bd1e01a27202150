//! Java node classification for the tree-sitter front end.

use crate::syntax::NodeKind;
use crate::treesitter::{
    LanguageRules, UNRESOLVED_TYPE, canonical_type, child_of_kind, children_of_kind, node_text,
};
use tree_sitter::Node;

const CLASS_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

const METHOD_KINDS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "compact_constructor_declaration",
];

const FORMAL_PARAMETER_KINDS: &[&str] = &["formal_parameter", "spread_parameter"];

pub(crate) struct JavaRules;

/// `new Foo() { ... }` and `RED { ... }` declare anonymous classes.
fn is_anonymous_class(node: Node<'_>) -> bool {
    matches!(node.kind(), "object_creation_expression" | "enum_constant")
        && child_of_kind(node, "class_body").is_some()
}

/// Identifier parameters of `x -> ...` and `(x, y) -> ...`.
fn is_lambda_identifier(node: Node<'_>) -> bool {
    if node.kind() != "identifier" {
        return false;
    }
    let Some(parent) = node.parent() else {
        return false;
    };
    match parent.kind() {
        "inferred_parameters" => true,
        "lambda_expression" => parent
            .child_by_field_name("parameters")
            .is_some_and(|p| p.id() == node.id()),
        _ => false,
    }
}

/// The interface whose body directly declares `node`.
fn declaring_interface(node: Node<'_>) -> Option<Node<'_>> {
    let body = node.parent()?;
    if body.kind() != "interface_body" && body.kind() != "annotation_type_body" {
        return None;
    }
    body.parent()
}

fn explicit_modifiers(node: Node<'_>) -> Vec<String> {
    let Some(modifiers) = child_of_kind(node, "modifiers") else {
        return Vec::new();
    };
    let mut cursor = modifiers.walk();
    modifiers
        .children(&mut cursor)
        .filter(|c| !c.is_named())
        .map(|c| c.kind().to_string())
        .collect()
}

impl LanguageRules for JavaRules {
    fn classify(&self, node: Node<'_>) -> NodeKind {
        let kind = node.kind();
        if CLASS_KINDS.contains(&kind) || is_anonymous_class(node) {
            NodeKind::Class
        } else if METHOD_KINDS.contains(&kind) {
            NodeKind::Method
        } else if kind == "lambda_expression" {
            NodeKind::Lambda
        } else if FORMAL_PARAMETER_KINDS.contains(&kind) || is_lambda_identifier(node) {
            NodeKind::Parameter
        } else {
            NodeKind::Other
        }
    }

    fn name(&self, node: Node<'_>, source: &str) -> Option<String> {
        self.name_node(node)
            .map(|n| node_text(n, source).to_string())
    }

    fn name_node<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        match node.kind() {
            "identifier" => Some(node),
            "spread_parameter" => child_of_kind(node, "variable_declarator")
                .and_then(|d| d.child_by_field_name("name"))
                .or_else(|| node.child_by_field_name("name")),
            "object_creation_expression" => None,
            _ => node.child_by_field_name("name"),
        }
    }

    fn qualified_name(&self, node: Node<'_>, source: &str) -> Option<String> {
        if self.classify(node) != NodeKind::Class || is_anonymous_class(node) {
            return None;
        }
        let mut segments = vec![self.name(node, source)?];
        let mut current = node.parent();
        while let Some(ancestor) = current {
            match self.classify(ancestor) {
                NodeKind::Class => {
                    // Members of anonymous classes have no qualified name.
                    segments.push(self.name(ancestor, source)?);
                }
                NodeKind::Method | NodeKind::Lambda => return None,
                NodeKind::Parameter | NodeKind::Other => {}
            }
            if ancestor.kind() == "program"
                && let Some(package) = child_of_kind(ancestor, "package_declaration")
            {
                let mut cursor = package.walk();
                let package_name = package
                    .named_children(&mut cursor)
                    .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"));
                if let Some(package_name) = package_name {
                    segments.push(canonical_type(node_text(package_name, source)));
                }
            }
            current = ancestor.parent();
        }
        segments.reverse();
        Some(segments.join("."))
    }

    /// Written modifiers plus the ones interface members carry implicitly.
    fn modifiers(&self, node: Node<'_>, _source: &str) -> Vec<String> {
        let mut modifiers = explicit_modifiers(node);
        let in_interface = declaring_interface(node).is_some();
        if !in_interface {
            return modifiers;
        }
        let has = |m: &[String], k: &str| m.iter().any(|x| x == k);
        if !has(&modifiers, "private") && !has(&modifiers, "public") {
            modifiers.push("public".to_string());
        }
        match node.kind() {
            "method_declaration" => {
                let bodiless = node.child_by_field_name("body").is_none();
                let concrete = ["default", "static", "private"]
                    .iter()
                    .any(|k| has(&modifiers, k));
                if bodiless && !concrete && !has(&modifiers, "abstract") {
                    modifiers.push("abstract".to_string());
                }
            }
            kind if CLASS_KINDS.contains(&kind) => {
                if !has(&modifiers, "static") {
                    modifiers.push("static".to_string());
                }
            }
            _ => {}
        }
        modifiers
    }

    fn is_constructor(&self, node: Node<'_>) -> bool {
        matches!(
            node.kind(),
            "constructor_declaration" | "compact_constructor_declaration"
        )
    }

    /// Annotation types are interfaces too.
    fn is_interface(&self, node: Node<'_>) -> bool {
        matches!(
            node.kind(),
            "interface_declaration" | "annotation_type_declaration"
        )
    }

    fn parameters<'t>(&self, node: Node<'t>, _source: &str) -> Vec<Node<'t>> {
        match node.kind() {
            "method_declaration" | "constructor_declaration" => node
                .child_by_field_name("parameters")
                .map(|p| children_of_kind(p, FORMAL_PARAMETER_KINDS))
                .unwrap_or_default(),
            // A compact canonical constructor takes the record components.
            "compact_constructor_declaration" => node
                .parent()
                .and_then(|body| body.parent())
                .filter(|record| record.kind() == "record_declaration")
                .and_then(|record| record.child_by_field_name("parameters"))
                .map(|p| children_of_kind(p, FORMAL_PARAMETER_KINDS))
                .unwrap_or_default(),
            "lambda_expression" => match node.child_by_field_name("parameters") {
                Some(p) if p.kind() == "identifier" => vec![p],
                Some(p) if p.kind() == "inferred_parameters" => children_of_kind(p, &["identifier"]),
                Some(p) => children_of_kind(p, FORMAL_PARAMETER_KINDS),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn type_text(&self, node: Node<'_>, source: &str) -> Option<String> {
        match node.kind() {
            // `int rows()[]` keeps its dimensions after the parameter list.
            "method_declaration" | "formal_parameter" => {
                let ty = node.child_by_field_name("type")?;
                let mut text = canonical_type(node_text(ty, source));
                if let Some(dims) = node.child_by_field_name("dimensions") {
                    text.push_str(&canonical_type(node_text(dims, source)));
                }
                Some(text)
            }
            "spread_parameter" => {
                let mut cursor = node.walk();
                let ty = node
                    .named_children(&mut cursor)
                    .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"))?;
                Some(format!("{}...", canonical_type(node_text(ty, source))))
            }
            "identifier" if is_lambda_identifier(node) => Some(UNRESOLVED_TYPE.to_string()),
            // Lambda expression types need inference.
            _ => None,
        }
    }
}
