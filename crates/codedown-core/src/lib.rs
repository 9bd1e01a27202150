//! Core types for codedown.
//!
//! Provides the description data model ([`description::MethodDescription`],
//! [`description::ClassDescription`]), the recognized-attribute configuration,
//! and JSON helpers for handing descriptions to a downstream generator.

pub mod config;
pub mod description;
pub mod schema;
