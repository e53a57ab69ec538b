use filterql_sql::QueryError;

/// Errors reported for a single filter / sort invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl CliError {
    /// Process exit code: 2 for bad input, 1 for faults on our side.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Query(err) if err.is_internal() => {
                tracing::error!("Internal error: {err}");
                1
            }
            CliError::Query(_) => 2,
        }
    }
}
