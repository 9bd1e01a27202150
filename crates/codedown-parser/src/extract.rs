//! Build description records from syntax nodes.

use crate::syntax::{ClassNode, LambdaNode, MethodNode, NodeKind, SyntaxNode};
use codedown_core::config::AttributeConfig;
use codedown_core::description::{ClassDescription, MethodDescription, ParamPair};

/// Errors from description extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("lambda at offset {offset} has no enclosing method")]
    MissingEnclosingMethod { offset: usize },
}

/// Turns method, lambda and class nodes into description records.
///
/// Holds only the attribute configuration; every operation is a pure function
/// of its input node, so one extractor can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct DescriptionExtractor {
    config: AttributeConfig,
}

impl DescriptionExtractor {
    pub fn new(config: AttributeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AttributeConfig {
        &self.config
    }

    /// Describe a method or constructor.
    pub fn describe_method<N: SyntaxNode>(
        &self,
        node: &MethodNode<N>,
        offset: usize,
    ) -> MethodDescription {
        let method = node.syntax();
        let params = self.extract_parameters(&method.parameters());
        let containing = method.containing_class().and_then(ClassNode::cast);
        let class = self.describe_class(containing.as_ref());
        let attributes = self.compute_attributes(method);

        let description = if method.is_constructor() {
            MethodDescription::constructor(class, attributes, params, offset)
        } else {
            MethodDescription::method(
                class,
                attributes,
                method.name().unwrap_or_default(),
                method.type_text(),
                params,
                offset,
                method.text(),
            )
        };
        tracing::debug!(
            "described {} at offset {}",
            description.full_name(),
            offset
        );
        description
    }

    /// Describe a lambda together with the method that encloses it.
    ///
    /// Fails without producing anything when no method-like ancestor exists.
    pub fn describe_lambda<N: SyntaxNode>(
        &self,
        node: &LambdaNode<N>,
        offset: usize,
    ) -> Result<MethodDescription, ExtractError> {
        let lambda = node.syntax();
        let params = self.extract_parameters(&lambda.parameters());
        let return_type = lambda.type_text();

        let enclosing = enclosing_method(lambda)
            .ok_or(ExtractError::MissingEnclosingMethod { offset })?;
        let enclosing = self.describe_method(&enclosing, offset);

        Ok(MethodDescription::lambda(
            enclosing,
            return_type,
            params,
            offset,
        ))
    }

    /// Describe a declaring class. Absent in, absent out.
    pub fn describe_class<N: SyntaxNode>(
        &self,
        node: Option<&ClassNode<N>>,
    ) -> Option<ClassDescription> {
        let class = node?.syntax();
        Some(ClassDescription::new(
            class.qualified_name(),
            self.compute_attributes(class),
        ))
    }

    /// Recognized modifiers in allowlist order, then the external and interface labels.
    ///
    /// The synthetic labels look at the class: the node itself when it is a
    /// class, its containing class otherwise.
    pub fn compute_attributes<N: SyntaxNode>(&self, node: &N) -> Vec<String> {
        let mut attributes: Vec<String> = self
            .config
            .recognized
            .iter()
            .filter(|keyword| node.has_modifier(keyword))
            .cloned()
            .collect();

        let class = if node.kind() == NodeKind::Class {
            ClassNode::cast(node.clone())
        } else {
            node.containing_class().and_then(ClassNode::cast)
        };
        if self.is_external_source(class.as_ref()) {
            attributes.push(self.config.external_label.clone());
        }
        if self.is_interface_declaration(class.as_ref()) {
            attributes.push(self.config.interface_label.clone());
        }
        attributes
    }

    /// Names and canonical types of `params`, in order, one entry per parameter.
    pub fn extract_parameters<N: SyntaxNode>(&self, params: &[N]) -> ParamPair {
        let mut pair = ParamPair::with_capacity(params.len());
        for param in params {
            pair.push(
                param.name().unwrap_or_default(),
                param.type_text().unwrap_or_default(),
            );
        }
        pair
    }

    /// Whether the class was loaded from a compiled artifact or an archive.
    pub fn is_external_source<N: SyntaxNode>(&self, node: Option<&ClassNode<N>>) -> bool {
        let Some(origin) = node.and_then(|n| n.syntax().origin()) else {
            return false;
        };
        self.config.is_compiled_file(&origin.name)
            || self.config.is_archive_protocol(&origin.protocol)
    }

    pub fn is_interface_declaration<N: SyntaxNode>(&self, node: Option<&ClassNode<N>>) -> bool {
        node.is_some_and(|n| n.syntax().is_interface())
    }

    /// Describe `node` if it is a method or lambda.
    pub fn describe<N: SyntaxNode>(
        &self,
        node: &N,
        offset: usize,
    ) -> Result<Option<MethodDescription>, ExtractError> {
        match node.kind() {
            NodeKind::Method => Ok(MethodNode::cast(node.clone())
                .map(|method| self.describe_method(&method, offset))),
            NodeKind::Lambda => match LambdaNode::cast(node.clone()) {
                Some(lambda) => self.describe_lambda(&lambda, offset).map(Some),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    /// Describe every method and lambda under `root` in pre-order, each at its
    /// navigation offset.
    pub fn describe_all<N: SyntaxNode>(
        &self,
        root: &N,
    ) -> Result<Vec<MethodDescription>, ExtractError> {
        let mut out = Vec::new();
        let mut stack = vec![root.clone()];
        while let Some(node) = stack.pop() {
            if let Some(description) = self.describe(&node, node.navigation_offset())? {
                out.push(description);
            }
            let mut children = node.children();
            children.reverse();
            stack.extend(children);
        }
        Ok(out)
    }
}

/// Nearest method strictly above `lambda`, one parent link at a time.
fn enclosing_method<N: SyntaxNode>(lambda: &N) -> Option<MethodNode<N>> {
    let mut current = lambda.parent();
    while let Some(node) = current {
        if node.kind() == NodeKind::Method {
            return MethodNode::cast(node);
        }
        tracing::trace!("skipping {} while looking for enclosing method", node.kind());
        current = node.parent();
    }
    None
}
