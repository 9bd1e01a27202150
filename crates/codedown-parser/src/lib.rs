//! Entity description extraction over parsed syntax trees.
//!
//! [`syntax::SyntaxNode`] is the read-only capability interface a front end
//! implements; [`extract::DescriptionExtractor`] turns method, lambda and class
//! nodes into description records. Tree-sitter front ends are provided for
//! Java and Kotlin, and [`memory::MemoryTree`] serves hosts that already hold a
//! symbol tree. [`scan`] walks a directory and describes every file it finds.

pub mod extract;
mod java;
mod kotlin;
pub mod languages;
pub mod locate;
pub mod memory;
pub mod scan;
pub mod syntax;
pub mod treesitter;
