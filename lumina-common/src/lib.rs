//! Common types and utilities shared across Lumina Fact crates.
//!
//! This crate defines the provider-agnostic LLM configuration, observability
//! helpers, and shared error types used throughout the Lumina workspace. It is
//! intentionally lightweight and dependency-minimal so that all crates can
//! depend on it without introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`LlmConfig`]: Provider-agnostic LLM configuration
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`LuminaError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use lumina_common::LlmConfig;
//!
//! let cfg = LlmConfig::default();
//! assert!(matches!(cfg, LlmConfig::None));
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Configuration for an LLM provider used by the verification pipeline.
///
/// Feature flags control which variants are compiled in.
/// See the `lumina-llm` crate for concrete client implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LlmConfig {
    #[cfg(feature = "gemini")]
    Gemini {
        api_key: String,
        model: String,
    },
    #[cfg(feature = "openai")]
    OpenAi {
        api_key: String,
        model: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    None,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::None
    }
}

/// Error types used across the Lumina system.
#[derive(thiserror::Error, Debug)]
pub enum LuminaError {
    /// A model provider failed to complete a requested operation.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation exceeded the configured timeout.
    #[error("Timeout occurred")]
    Timeout,
}

/// Convenient alias for results that use [`LuminaError`].
pub type Result<T> = std::result::Result<T, LuminaError>;
