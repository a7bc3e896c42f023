#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// A referenced company, branch or machine name does not exist at write time.
    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
