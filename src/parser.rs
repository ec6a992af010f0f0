//! Parser for dtl documents
//!
//! Parsing happens in two passes. A `chumsky` grammar over the lexed token
//! stream builds an intermediate tree whose time literals are still raw
//! text. The conversion pass then resolves every literal against its
//! enclosing scope, builds periods, and normalizes the result.

pub mod api;
mod combinators;
mod conversion;
mod document;
mod intermediate_ast;

pub use api::{parse, parse_document, Parsed};

#[cfg(test)]
mod tests;
