use crate::Span;

/// Failure to tokenize or parse a type expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected character {ch:?}")]
    UnexpectedChar { ch: char, span: Span },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        span: Span,
    },

    #[error("expected {expected}, found end of input")]
    UnexpectedEnd { expected: &'static str, span: Span },

    #[error("invalid array length `{text}`")]
    InvalidLength { text: String, span: Span },

    #[error("unexpected trailing input {found}")]
    TrailingInput { found: String, span: Span },

    #[error("type expression nesting exceeds maximum of {max_depth} levels")]
    MaxDepthExceeded { max_depth: usize, span: Span },
}

impl ParseError {
    /// Byte range of the offending input.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedChar { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEnd { span, .. }
            | ParseError::InvalidLength { span, .. }
            | ParseError::TrailingInput { span, .. }
            | ParseError::MaxDepthExceeded { span, .. } => *span,
        }
    }

    /// Short stable code, used by diagnostics renderers.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedChar { .. } => "P001",
            ParseError::UnexpectedToken { .. } => "P002",
            ParseError::UnexpectedEnd { .. } => "P003",
            ParseError::InvalidLength { .. } => "P004",
            ParseError::TrailingInput { .. } => "P005",
            ParseError::MaxDepthExceeded { .. } => "P006",
        }
    }
}
