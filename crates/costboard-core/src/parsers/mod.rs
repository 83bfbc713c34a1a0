//! Parsers for cost-center input documents

pub mod document;

pub use document::DocumentParser;
