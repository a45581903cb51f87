/// Error types for Fondy core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required request attribute was read while absent.
    #[error("Field `{0}` is absent")]
    FieldAbsent(&'static str),

    /// The selected signing key is empty.
    #[error("Signing key is empty")]
    MissingSigningKey,

    /// JSON serialization/deserialization errors.
    #[error("Serde JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

/// A specialized `Result` type for Fondy core operations.
pub type Result<T> = std::result::Result<T, Error>;
