//! Kotlin node classification for the tree-sitter front end.

use crate::syntax::NodeKind;
use crate::treesitter::{
    LanguageRules, UNRESOLVED_TYPE, after_colon, canonical_type, child_of_kind, children_of_kind,
    node_text,
};
use tree_sitter::Node;

const CLASS_KINDS: &[&str] = &[
    "class_declaration",
    "object_declaration",
    "interface_declaration",
    "companion_object",
    "object_literal",
];

const METHOD_KINDS: &[&str] = &[
    "function_declaration",
    "secondary_constructor",
    "primary_constructor",
];

const LAMBDA_KINDS: &[&str] = &["lambda_literal", "anonymous_function"];

const VISIBILITY: &[&str] = &["public", "protected", "private", "internal"];

/// Modifiers that keep a declaration open to overriding.
const NON_FINAL: &[&str] = &["open", "abstract", "override", "sealed"];

/// Name of the parameter a lambda without a parameter list receives.
const IMPLICIT_PARAMETER: &str = "it";

pub(crate) struct KotlinRules;

fn identifier(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("name").or_else(|| {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .find(|c| matches!(c.kind(), "identifier" | "simple_identifier"))
    })
}

fn is_lambda_parameter(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "variable_declaration" | "multi_variable_declaration"
    ) && node.parent().is_some_and(|p| p.kind() == "lambda_parameters")
}

fn is_identifier(node: Node<'_>) -> bool {
    matches!(node.kind(), "identifier" | "simple_identifier")
}

/// First `it` reference that belongs to `lambda` itself.
///
/// Nested lambdas without a parameter list have their own `it` and are not searched.
fn implicit_parameter<'t>(lambda: Node<'t>, source: &str) -> Option<Node<'t>> {
    let mut stack = vec![lambda];
    while let Some(node) = stack.pop() {
        if is_identifier(node) && node_text(node, source) == IMPLICIT_PARAMETER {
            return Some(node);
        }
        let shadows = node.id() != lambda.id()
            && node.kind() == "lambda_literal"
            && child_of_kind(node, "lambda_parameters").is_none();
        if shadows {
            continue;
        }
        let mut cursor = node.walk();
        let mut children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
        children.reverse();
        stack.extend(children);
    }
    None
}

/// `interface` whose body directly declares `node`.
fn declaring_interface(rules: &KotlinRules, node: Node<'_>) -> bool {
    node.parent()
        .filter(|body| body.kind() == "class_body")
        .and_then(|body| body.parent())
        .is_some_and(|owner| rules.is_interface(owner))
}

/// `fun f(a: A)` parameters, looking through an optional per-parameter wrapper.
fn value_parameters(list: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter_map(|c| match c.kind() {
            "parameter" => Some(c),
            "function_value_parameter" => child_of_kind(c, "parameter"),
            _ => None,
        })
        .collect()
}

fn class_parameters(constructor: Node<'_>) -> Vec<Node<'_>> {
    match child_of_kind(constructor, "class_parameters") {
        Some(list) => children_of_kind(list, &["class_parameter"]),
        None => children_of_kind(constructor, &["class_parameter"]),
    }
}

/// Keywords under the node's `modifiers` child, annotations excluded.
fn explicit_modifiers(node: Node<'_>, source: &str) -> Vec<String> {
    let Some(modifiers) = child_of_kind(node, "modifiers") else {
        return Vec::new();
    };
    let mut cursor = modifiers.walk();
    modifiers
        .children(&mut cursor)
        .filter(|c| c.kind() != "annotation")
        .map(|c| node_text(c, source).trim().to_string())
        .filter(|m| !m.is_empty())
        .collect()
}

impl LanguageRules for KotlinRules {
    fn classify(&self, node: Node<'_>) -> NodeKind {
        let kind = node.kind();
        if CLASS_KINDS.contains(&kind) {
            NodeKind::Class
        } else if METHOD_KINDS.contains(&kind) {
            NodeKind::Method
        } else if LAMBDA_KINDS.contains(&kind) {
            NodeKind::Lambda
        } else if matches!(kind, "parameter" | "class_parameter") || is_lambda_parameter(node) {
            NodeKind::Parameter
        } else {
            NodeKind::Other
        }
    }

    fn name(&self, node: Node<'_>, source: &str) -> Option<String> {
        match node.kind() {
            "companion_object" => Some(
                identifier(node)
                    .map_or("Companion", |n| node_text(n, source))
                    .to_string(),
            ),
            // Constructors carry their class's name.
            "primary_constructor" | "secondary_constructor" => {
                let mut current = node.parent();
                while let Some(ancestor) = current {
                    if self.classify(ancestor) == NodeKind::Class {
                        return self.name(ancestor, source);
                    }
                    current = ancestor.parent();
                }
                None
            }
            "multi_variable_declaration" => Some(canonical_type(node_text(node, source))),
            _ if is_identifier(node) => Some(node_text(node, source).to_string()),
            _ => self
                .name_node(node)
                .map(|n| node_text(n, source).to_string()),
        }
    }

    fn name_node<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        match node.kind() {
            "object_literal" | "lambda_literal" | "anonymous_function" => None,
            _ => identifier(node),
        }
    }

    fn qualified_name(&self, node: Node<'_>, source: &str) -> Option<String> {
        if self.classify(node) != NodeKind::Class || node.kind() == "object_literal" {
            return None;
        }
        let mut segments = vec![self.name(node, source)?];
        let mut current = node.parent();
        while let Some(ancestor) = current {
            match self.classify(ancestor) {
                NodeKind::Class => segments.push(self.name(ancestor, source)?),
                NodeKind::Method | NodeKind::Lambda => return None,
                NodeKind::Parameter | NodeKind::Other => {}
            }
            if ancestor.kind() == "source_file"
                && let Some(header) = child_of_kind(ancestor, "package_header")
            {
                let package = node_text(header, source)
                    .trim()
                    .trim_start_matches("package")
                    .trim_end_matches(';');
                let package = canonical_type(package);
                if !package.is_empty() {
                    segments.push(package);
                }
            }
            current = ancestor.parent();
        }
        segments.reverse();
        Some(segments.join("."))
    }

    /// Written modifiers plus the implied ones: `public` without a visibility keyword,
    /// `final` unless the declaration is open, `abstract` on bodiless interface members.
    fn modifiers(&self, node: Node<'_>, source: &str) -> Vec<String> {
        let mut modifiers = explicit_modifiers(node, source);
        let declares = matches!(self.classify(node), NodeKind::Class | NodeKind::Method);
        if !declares || node.kind() == "object_literal" {
            return modifiers;
        }
        let has = |m: &[String], k: &str| m.iter().any(|x| x == k);
        if !modifiers.iter().any(|m| VISIBILITY.contains(&m.as_str())) {
            modifiers.push("public".to_string());
        }
        if self.is_constructor(node) {
            return modifiers;
        }
        let in_interface = declaring_interface(self, node);
        if in_interface
            && node.kind() == "function_declaration"
            && child_of_kind(node, "function_body").is_none()
            && !has(&modifiers, "abstract")
        {
            modifiers.push("abstract".to_string());
        }
        let open = NON_FINAL.iter().any(|k| has(&modifiers, k));
        if !open && !in_interface && !self.is_interface(node) && !has(&modifiers, "final") {
            modifiers.push("final".to_string());
        }
        modifiers
    }

    fn is_constructor(&self, node: Node<'_>) -> bool {
        matches!(node.kind(), "primary_constructor" | "secondary_constructor")
    }

    fn is_interface(&self, node: Node<'_>) -> bool {
        match node.kind() {
            "interface_declaration" => true,
            "class_declaration" => child_of_kind(node, "interface").is_some(),
            _ => false,
        }
    }

    fn parameters<'t>(&self, node: Node<'t>, source: &str) -> Vec<Node<'t>> {
        match node.kind() {
            "function_declaration" | "secondary_constructor" | "anonymous_function" => {
                child_of_kind(node, "function_value_parameters")
                    .map(value_parameters)
                    .unwrap_or_default()
            }
            "primary_constructor" => class_parameters(node),
            "lambda_literal" => match child_of_kind(node, "lambda_parameters") {
                Some(p) => {
                    children_of_kind(p, &["variable_declaration", "multi_variable_declaration"])
                }
                None => implicit_parameter(node, source).into_iter().collect(),
            },
            _ => Vec::new(),
        }
    }

    fn type_text(&self, node: Node<'_>, source: &str) -> Option<String> {
        match node.kind() {
            "function_declaration" => {
                if let Some(ty) = after_colon(node) {
                    return Some(canonical_type(node_text(ty, source)));
                }
                // Without a declared type only block bodies have a known type.
                match child_of_kind(node, "function_body") {
                    Some(body) if node_text(body, source).trim_start().starts_with('=') => None,
                    _ => Some("Unit".to_string()),
                }
            }
            "anonymous_function" => after_colon(node).map(|ty| canonical_type(node_text(ty, source))),
            "parameter" | "class_parameter" | "variable_declaration" => Some(
                after_colon(node)
                    .map_or_else(|| UNRESOLVED_TYPE.to_string(), |ty| {
                        canonical_type(node_text(ty, source))
                    }),
            ),
            "multi_variable_declaration" => Some(UNRESOLVED_TYPE.to_string()),
            _ if is_identifier(node) => Some(UNRESOLVED_TYPE.to_string()),
            _ => None,
        }
    }
}
