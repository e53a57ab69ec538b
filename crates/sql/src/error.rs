use filterql_core::FilterError;
use filterql_syntax::ParseError;

/// Failure to turn a filter or sort string into SQL.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid filter: {0}")]
    Syntax(#[from] ParseError),

    #[error("invalid filter: {0}")]
    Filter(#[source] FilterError),

    #[error("invalid sort: {0}")]
    Sort(#[source] FilterError),

    #[error("internal error: default sort was not resolved")]
    UnresolvedSort,
}

impl QueryError {
    /// Whether the error is a server-side fault rather than bad input.
    pub fn is_internal(&self) -> bool {
        match self {
            QueryError::Syntax(_) => false,
            QueryError::Filter(err) | QueryError::Sort(err) => err.is_internal(),
            QueryError::UnresolvedSort => true,
        }
    }
}
