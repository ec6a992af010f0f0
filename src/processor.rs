//! Processing API for dtl sources
//!
//! A processing specification names a stage (what data to extract) and an
//! output format, written as `<stage>-<format>`:
//!
//! - `token-simple`, `token-json`: the block-structured token stream
//! - `token-raw-simple`, `token-raw-json`: tokens before the indentation
//!   transform, with one `Indent` per leading tab
//! - `ast-tag`, `ast-json`, `ast-dtl`: the normalized document tree

use std::ops::Range;
use thiserror::Error;

use crate::error::ParseError;
use crate::formats::{tokens_to_json, tokens_to_simple, FormatError, FormatRegistry};
use crate::lexer::{lex, tokenize, Token};
use crate::parser::parse;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

impl ProcessingStage {
    pub fn name(self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        }
    }
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    RawSimple,
    RawJson,
    Tag,
    Dtl,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::RawSimple => "raw-simple",
            OutputFormat::RawJson => "raw-json",
            OutputFormat::Tag => "tag",
            OutputFormat::Dtl => "dtl",
        }
    }
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-tag"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let parts: Vec<&str> = format_str.split('-').collect();
        if parts.len() < 2 {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        }

        let stage = match parts[0] {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(parts[0].to_string())),
        };

        let format_name = parts[1..].join("-");
        let format = match format_name.as_str() {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "raw-simple" => OutputFormat::RawSimple,
            "raw-json" => OutputFormat::RawJson,
            "tag" => OutputFormat::Tag,
            "dtl" => OutputFormat::Dtl,
            _ => return Err(ProcessingError::InvalidFormatType(format_name)),
        };

        // Validate stage/format compatibility
        match (stage, format) {
            (ProcessingStage::Ast, OutputFormat::Tag | OutputFormat::Json | OutputFormat::Dtl) => {}
            (ProcessingStage::Ast, _) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "format '{}' not supported for ast stage (only 'tag', 'json' and 'dtl' are supported)",
                    format.name()
                )))
            }
            (ProcessingStage::Token, OutputFormat::Tag | OutputFormat::Dtl) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "format '{}' only works with ast stage",
                    format.name()
                )))
            }
            _ => {} // Token stage with the remaining formats is fine
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let token = |format| ProcessingSpec {
            stage: ProcessingStage::Token,
            format,
        };
        let ast = |format| ProcessingSpec {
            stage: ProcessingStage::Ast,
            format,
        };
        vec![
            token(OutputFormat::Simple),
            token(OutputFormat::Json),
            token(OutputFormat::RawSimple),
            token(OutputFormat::RawJson),
            ast(OutputFormat::Tag),
            ast(OutputFormat::Json),
            ast(OutputFormat::Dtl),
        ]
    }
}

impl std::fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.stage.name(), self.format.name())
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("invalid stage: {0}")]
    InvalidStage(String),

    #[error("invalid format type: {0}")]
    InvalidFormatType(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Process dtl source text according to the given specification
pub fn process(source: &str, spec: &ProcessingSpec) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let tokens = match spec.format {
                OutputFormat::RawSimple | OutputFormat::RawJson => tokenize(source),
                _ => lex(source),
            };
            format_tokens(&tokens, spec.format)
        }
        ProcessingStage::Ast => {
            let doc = parse(source)?;
            let registry = FormatRegistry::with_defaults();
            Ok(registry.serialize(&doc, spec.format.name())?)
        }
    }
}

/// Format tokens according to one of the token formats
pub fn format_tokens(
    tokens: &[(Token, Range<usize>)],
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple | OutputFormat::RawSimple => Ok(tokens_to_simple(tokens)),
        OutputFormat::Json | OutputFormat::RawJson => tokens_to_json(tokens)
            .map_err(|e| FormatError::SerializationError(e.to_string()).into()),
        OutputFormat::Tag | OutputFormat::Dtl => Err(ProcessingError::InvalidFormatType(format!(
            "{} format only works with ast stage",
            format.name()
        ))),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .into_iter()
        .map(|spec| spec.to_string())
        .collect()
}
