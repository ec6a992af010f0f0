//! # dtl
//!
//! A parser, normalizer and formatter for the dtl time-tracking format.
//!
//! A dtl document is a tree of time-scoped segments. Each nesting level fixes
//! more time components (year, month, day, clock time) and inherits the rest
//! from the enclosing levels:
//!
//! ```text
//! for 2024:
//!
//! @June
//! 	@1st
//! 		@09:00-09:15 [Standup]
//! 			!note [Daily sync]
//! 				#length 15 minutes
//! 		@14:00... [Deep work]
//! ```
//!
//! The pipeline is `text -> lexer -> parser -> normalize -> Document`, and
//! [`Document::format`](ast::Document::format) turns a document back into
//! canonical text.
//!
//! ## Testing
//!
//! The [testing module](testing) provides a fluent assertion API over parsed
//! documents; parser tests should use it instead of poking at maps directly.

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod logging;
pub mod normalize;
pub mod parser;
pub mod processor;
pub mod testing;

pub use ast::{Command, CommandOption, Document, Segment, TimeKind, TimeValue};
pub use diagnostics::{ValidationWarning, WarningKind};
pub use error::{ParseError, TimeError};
pub use parser::{parse, parse_document, Parsed};
