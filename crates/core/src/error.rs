use thiserror::Error;

/// Errors produced while resolving a filter or sort expression.
///
/// Everything except [`FilterError::Internal`] is caused by the user's input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown name: {0}")]
    UnknownName(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// The syntax tree has a shape the resolver never expects from the parser.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("expected {expected} got {got}")]
    Mismatch { expected: &'static str, got: String },

    #[error("failed to unquote string {0}")]
    Unquote(String),

    #[error("failed to parse number {0}")]
    InvalidNumber(String),

    #[error("{0} is not nullable")]
    NotNullable(String),

    #[error("null can only be compared with == or != (got {0})")]
    NullComparison(String),

    #[error("'{0}' requires at least 1 parameter")]
    MissingArguments(String),

    #[error("unexpected identifier {0}")]
    UnexpectedIdent(String),

    #[error("unexpected literal {0}")]
    UnexpectedLiteral(String),

    #[error("negation is only supported for membership tests")]
    UnsupportedNegation,

    #[error("unknown sort mode: {0}")]
    UnknownSortMode(String),

    #[error("sort requires at least one field")]
    EmptySort,
}

impl FilterError {
    pub fn internal(msg: impl std::fmt::Display) -> Self {
        FilterError::Internal(msg.to_string())
    }

    /// Whether this error points at a bug in the parser integration rather
    /// than at bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, FilterError::Internal(_))
    }
}
