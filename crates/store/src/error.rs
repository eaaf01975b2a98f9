use filter::FilterError;
use thiserror::Error;

/// All errors coming from the contact store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// PostgreSQL driver error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// The query plan could not be compiled into a filter.
    #[error("Filter compilation failed: {0}")]
    Filter(#[from] FilterError),

    /// The embedded seed data failed to deserialize.
    #[error("Failed to read seed data: {0}")]
    SeedData(#[from] serde_json::Error),

    /// A plan literal cannot be bound as a postgres parameter.
    #[error("Unsupported parameter value: {0}")]
    UnsupportedParam(String),
}
