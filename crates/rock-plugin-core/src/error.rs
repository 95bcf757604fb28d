//! Error taxonomy for the plugin tooling
//!
//! Every variant is fatal: nothing is retried or recovered locally. The CLI
//! boundary turns each one into a human-readable message and a non-zero exit.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// The canonical properties file has no usable `<Version>` declaration.
    #[error("no canonical <Version> declaration found: {detail}")]
    VersionNotFound { detail: String },

    /// Check mode found a manifest version that drifted from the canonical one.
    #[error("manifest version \"{found}\" does not match canonical version \"{expected}\"")]
    VersionMismatch { expected: String, found: String },

    /// A template referenced a configuration key that was never collected.
    #[error("template references unset configuration key \"{name}\"")]
    UnresolvedVariable { name: String },

    /// A template violated the marker grammar (nesting, stray endif, etc.).
    #[error("template syntax error: {message}")]
    TemplateSyntax { message: String },

    /// The package manifest could not be used (bad JSON, not an object, etc.).
    #[error("invalid package manifest: {message}")]
    Manifest { message: String },

    /// The operator cancelled the prompt sequence.
    #[error("prompt aborted by operator")]
    PromptAborted,
}

pub type ToolResult<T> = Result<T, ToolError>;
