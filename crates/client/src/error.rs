use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport or deserialization failure.
    #[error("Policy engine request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The policy engine answered with a non-success status.
    #[error("Policy engine returned status {0}")]
    Status(u16),
}
