/// Crate-wide result alias.
pub type TurnshotResult<T> = Result<T, TurnshotError>;

/// Crate-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum TurnshotError {
    /// Invalid configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A scene collaborator (instantiation, framing, readback) failed.
    #[error("scene error: {0}")]
    Scene(String),

    /// Frame encoding or the encoder worker failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped error with context (typically I/O).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TurnshotError {
    /// Build a [`TurnshotError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TurnshotError::Scene`].
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`TurnshotError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
