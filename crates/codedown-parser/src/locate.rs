//! Find declarations from an editor caret offset.

use crate::syntax::{NodeKind, SyntaxNode};
use crate::treesitter::{SourceFile, TsNode};

/// Smallest node spanning `offset`. `None` when the offset is past the end of the file.
pub fn node_at(file: &SourceFile, offset: usize) -> Option<TsNode<'_>> {
    if offset > file.source().len() {
        return None;
    }
    file.tree()
        .root_node()
        .descendant_for_byte_range(offset, offset)
        .map(|n| file.wrap(n))
}

/// Innermost node of one of `kinds` at `offset`, the node at `offset` included.
fn innermost<'a>(file: &'a SourceFile, offset: usize, kinds: &[NodeKind]) -> Option<TsNode<'a>> {
    let mut current = node_at(file, offset);
    while let Some(node) = current {
        if kinds.contains(&node.kind()) {
            return Some(node);
        }
        current = node.parent();
    }
    None
}

/// Innermost method or lambda containing `offset`.
pub fn declaration_at(file: &SourceFile, offset: usize) -> Option<TsNode<'_>> {
    innermost(file, offset, &[NodeKind::Method, NodeKind::Lambda])
}

/// Innermost method containing `offset`, ignoring lambdas.
pub fn method_at(file: &SourceFile, offset: usize) -> Option<TsNode<'_>> {
    innermost(file, offset, &[NodeKind::Method])
}

/// Byte offset of the first occurrence of `needle`, for tests and scripted callers.
pub fn offset_of(file: &SourceFile, needle: &str) -> Option<usize> {
    file.source().find(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::Language;

    const SOURCE: &str = r"class Shop {
    void checkout(int total) {
        Runnable r = () -> System.out.println(total);
    }
}
";

    fn shop() -> SourceFile {
        SourceFile::parse("Shop.java", SOURCE, Language::Java).unwrap()
    }

    #[test]
    fn test_declaration_at_prefers_lambda() {
        let file = shop();
        let offset = offset_of(&file, "System").unwrap();
        let node = declaration_at(&file, offset).unwrap();
        assert_eq!(node.kind(), NodeKind::Lambda);
    }

    #[test]
    fn test_method_at_skips_lambda() {
        let file = shop();
        let offset = offset_of(&file, "System").unwrap();
        let node = method_at(&file, offset).unwrap();
        assert_eq!(node.name().as_deref(), Some("checkout"));
    }

    #[test]
    fn test_offset_outside_declarations() {
        let file = shop();
        assert!(declaration_at(&file, 0).is_none());
        assert!(node_at(&file, SOURCE.len() + 10).is_none());
    }

    #[test]
    fn test_navigation_offset_points_at_name() {
        let file = shop();
        let offset = offset_of(&file, "checkout").unwrap();
        let node = method_at(&file, offset).unwrap();
        assert_eq!(node.navigation_offset(), offset);
        assert!(node.offset() < offset);
    }
}
