use clap::Parser;

/// Resolve a filter and sort string against a schema and print the SQL.
#[derive(Debug, Parser)]
#[command(
    name = "filterql",
    version,
    after_help = "Environment:\n  FILTERQL_SCHEMA  path to the JSON schema (required)\n  \
                  FILTERQL_SELECT  statement the clauses are appended to\n  \
                  LOG_LEVEL        log filter when RUST_LOG is unset"
)]
pub struct Args {
    /// Filter expression, e.g. `year > 2000 && hasTag("Drama")`.
    pub filter: String,

    /// Sort string: `sort=+title,-year`, `random` or `default`.
    pub sort: Option<String>,
}

impl Args {
    pub fn sort(&self) -> &str {
        self.sort.as_deref().unwrap_or_default()
    }
}
