//! Error taxonomy for scene construction and configuration.
//!
//! Runtime operations never fail: out-of-range numbers are clamped and
//! selection/removal of unknown entities is a no-op. Only construction can
//! be rejected.

/// Error returned when a scene, entity or configuration cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Required view options are missing or describe an unusable zoom range.
    #[error("invalid scene configuration: {0}")]
    Configuration(String),
    /// An entity was built without a required back-reference.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// A JSON configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
