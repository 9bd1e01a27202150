//! Directory mode: collect source files and describe them in parallel.

use crate::extract::{DescriptionExtractor, ExtractError};
use crate::languages::Language;
use crate::locate::declaration_at;
use crate::syntax::SyntaxNode;
use crate::treesitter::SourceFile;
use anyhow::{Context, Result};
use codedown_core::description::MethodDescription;
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Per-directory ignore file, read in addition to `.gitignore`.
pub const IGNORE_FILE: &str = ".codedownignore";

/// Descriptions found in one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileDescriptions {
    pub path: PathBuf,
    pub language: &'static str,
    pub descriptions: Vec<MethodDescription>,
}

/// Compile `--include` patterns. `None` when no pattern is given.
pub fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for p in patterns {
        builder.add(Glob::new(p).with_context(|| format!("invalid glob `{p}`"))?);
    }
    Ok(Some(builder.build().context("invalid glob set")?))
}

/// Source files under `root` in one of `languages`, relative to `root` and sorted.
///
/// Honors `.gitignore` and [`IGNORE_FILE`]; hidden entries are skipped.
pub fn collect_source_files(
    root: &Path,
    languages: &[Language],
    include: &[String],
) -> Result<Vec<PathBuf>> {
    let include_set = build_globset(include)?;
    let walker = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .add_custom_ignore_filename(IGNORE_FILE)
        .build();

    let mut files = Vec::new();
    for entry in walker.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if !Language::from_path(path).is_some_and(|l| languages.contains(&l)) {
            continue;
        }
        let rel_path = path.strip_prefix(root).unwrap_or(path);
        if let Some(ref inc) = include_set
            && !inc.is_match(rel_path)
        {
            continue;
        }
        files.push(rel_path.to_path_buf());
    }
    files.sort();
    Ok(files)
}

/// Every method and lambda in a parsed file, in source order.
///
/// Unlike [`DescriptionExtractor::describe_all`], a lambda without an enclosing
/// method (a field initializer, say) is skipped instead of failing the file.
pub fn describe_file(file: &SourceFile, extractor: &DescriptionExtractor) -> Vec<MethodDescription> {
    let mut out = Vec::new();
    let mut stack = vec![file.root()];
    while let Some(node) = stack.pop() {
        match extractor.describe(&node, node.navigation_offset()) {
            Ok(Some(description)) => out.push(description),
            Ok(None) => {}
            Err(ExtractError::MissingEnclosingMethod { offset }) => {
                tracing::debug!(
                    "{}: skipping lambda at {offset} outside any method",
                    file.path().display()
                );
            }
        }
        let mut children = node.children();
        children.reverse();
        stack.extend(children);
    }
    out
}

/// Parse and describe `files` (relative to `root`) in parallel. Unreadable files are
/// logged and left out; the result keeps the input order.
pub fn describe_files_parallel(
    root: &Path,
    files: &[PathBuf],
    extractor: &DescriptionExtractor,
) -> Vec<FileDescriptions> {
    files
        .par_iter()
        .filter_map(|rel_path| match SourceFile::open(&root.join(rel_path)) {
            Ok(file) => Some(FileDescriptions {
                path: rel_path.clone(),
                language: file.language().name(),
                descriptions: describe_file(&file, extractor),
            }),
            Err(e) => {
                tracing::warn!("skipping {}: {e}", rel_path.display());
                None
            }
        })
        .collect()
}

/// Describe the innermost method or lambda at `offset` in the file at `path`.
///
/// `protocol` names the containing file system when the file was browsed inside an
/// archive. The description records the declaration's navigation offset, so the
/// result matches [`describe_file`] wherever the caret sits inside it.
pub fn describe_at(
    path: &Path,
    offset: usize,
    protocol: Option<&str>,
    extractor: &DescriptionExtractor,
) -> Result<Option<MethodDescription>> {
    let mut file =
        SourceFile::open(path).with_context(|| format!("failed to load {}", path.display()))?;
    if let Some(protocol) = protocol {
        file = file.with_protocol(protocol);
    }
    let Some(node) = declaration_at(&file, offset) else {
        tracing::debug!("no declaration at {offset} in {}", path.display());
        return Ok(None);
    };
    Ok(extractor.describe(&node, node.navigation_offset())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_globset_empty() {
        assert!(build_globset(&[]).unwrap().is_none());
    }

    #[test]
    fn test_build_globset_rejects_bad_pattern() {
        assert!(build_globset(&["src/[".to_string()]).is_err());
    }

    #[test]
    fn test_describe_file_skips_field_lambda() {
        let source = r"class Holder {
    Runnable task = () -> System.gc();
    void run() { Runnable r = () -> {}; }
}
";
        let file = SourceFile::parse("Holder.java", source, Language::Java).unwrap();
        let extractor = DescriptionExtractor::default();
        assert!(extractor.describe_all(&file.root()).is_err());

        let names: Vec<String> = describe_file(&file, &extractor)
            .iter()
            .map(MethodDescription::full_name)
            .collect();
        assert_eq!(names, ["Holder.run", "Holder.run$lambda"]);
    }

    #[test]
    fn test_describe_at_records_navigation_offset() {
        let source = "class Shop {\n    void checkout(int total) { int x = total; }\n}\n";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Shop.java");
        std::fs::write(&path, source).unwrap();
        let extractor = DescriptionExtractor::default();

        let caret = source.find("int x").unwrap();
        let at_caret = describe_at(&path, caret, None, &extractor).unwrap().unwrap();
        let file = SourceFile::open(&path).unwrap();
        let listed = describe_file(&file, &extractor);

        assert_eq!(at_caret.offset(), source.find("checkout").unwrap());
        assert_eq!(at_caret.offset(), listed[0].offset());
        assert_eq!(at_caret, listed[0]);
    }
}
