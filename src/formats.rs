//! Output format implementations for document and token serialization
//!
//! - Documents: `tag` (XML-like tree), `json` (serde tree), `dtl` (canonical text)
//! - Token streams: `simple` (one token per line) and `json`

pub mod dtl;
pub mod json;
pub mod registry;
pub mod tag;
pub mod tokens;

pub use dtl::DtlFormatter;
pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use tag::{serialize_document as serialize_ast_tag, TagFormatter};
pub use tokens::{tokens_to_json, tokens_to_simple};
