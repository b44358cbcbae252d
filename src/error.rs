//! Error types for the assistant core.

/// Top-level error type for the assistant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Catalog gateway errors.
///
/// The turn pipeline recovers from all of these locally (empty grounding
/// plus a logged diagnostic); they never fail a whole turn.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure: timeout, connection refused, DNS.
    #[error("Catalog request to {endpoint} failed: {reason}")]
    Network { endpoint: String, reason: String },

    /// The catalog answered with a non-2xx status.
    #[error("Catalog endpoint {endpoint} returned status {status}")]
    Server { endpoint: String, status: u16 },

    /// The body did not match the endpoint's schema. Unexpected shapes fail
    /// closed as this variant rather than being read as nulls.
    #[error("Failed to decode catalog response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Completion client errors. Surfaced to the user as the turn's reply text;
/// non-fatal to the session.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// No API key configured. Checked before any network I/O is attempted.
    #[error("No completion API key configured (set {env_var})")]
    MissingCredential { env_var: String },

    /// Transport failure or non-2xx from the completion endpoint, with the
    /// upstream error message when it could be decoded.
    #[error("Completion request failed: {reason}")]
    Http { reason: String },

    /// The response parsed but carried no text candidate.
    #[error("Completion endpoint returned an empty reply")]
    EmptyReply,
}

/// Result type alias for the assistant.
pub type Result<T> = std::result::Result<T, Error>;
