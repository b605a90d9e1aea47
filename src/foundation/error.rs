/// Convenience result type used across the pass chain.
pub type ChainResult<T> = Result<T, ChainError>;

/// Top-level error taxonomy used by chain APIs.
#[derive(thiserror::Error, Debug)]
pub enum ChainError {
    /// Invalid caller-provided data (parameter updates, sizes, pass lookups).
    #[error("validation error: {0}")]
    Validation(String),

    /// A chain or pass could not be constructed for the requested configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Failure while loading or decoding an external asset.
    #[error("asset error: {0}")]
    Asset(String),

    /// Failure while producing or presenting a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChainError {
    /// Build a [`ChainError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChainError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ChainError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ChainError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ChainError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
