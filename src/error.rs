//! Error types for configuration and agent setup
//!
//! Runtime numeric inputs (damage, resource writes) are clamped rather than
//! rejected, so nothing in the per-frame path returns these.

use thiserror::Error;

/// Errors raised while loading or validating an [`AgentConfig`](crate::AgentConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_health must be greater than zero")]
    NonPositiveMaxHealth,

    #[error("invalid value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: f32 },

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while constructing an [`Agent`](crate::sim::Agent).
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A required collaborator was never provided to the builder
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}
