use client::ClientError;
use filter::FilterError;
use store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read the plan file: {0}")]
    PlanFileRead(#[from] std::io::Error),

    #[error("Failed to parse the plan file as JSON: {0}")]
    PlanParse(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Failed to compile the plan: {0}")]
    Filter(#[from] FilterError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Policy engine error: {0}")]
    Client(#[from] ClientError),

    #[error("No such user: {0}")]
    UserNotFound(String),
}
