//! Rock Plugin Core - Shared library for Rock plugin developer tooling
//!
//! This library backs the `rock-tools` CLI. It covers two independent
//! workflows:
//!
//! - **Scaffolding**: collect a configuration through ordered single-select
//!   questions, then render the plugin templates (placeholder substitution
//!   plus conditional blocks) into a new project directory.
//! - **Version synchronization**: read the canonical `<Version>` from the
//!   shared properties file and either stamp it into package manifests
//!   (write mode) or verify them against it (check mode).
//!
//! # Architecture
//!
//! - **Core operations** - pure functions for version reading, manifest
//!   sync, and template rendering
//! - **Collection** - the `PromptDriver` trait and `collect`, independent of
//!   any terminal front end
//! - **CLI/TUI interface** - optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module

pub mod config;
pub mod error;
pub mod templates;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{collect, Choice, ConfigValue, PromptDriver, Question, QuestionKind, ScaffoldConfig};
pub use error::{ToolError, ToolResult};
pub use templates::{check_compatibility, scaffold, Template, TemplateManifest, TemplateSet};
pub use version::{check_manifest_version, read_canonical_version, set_manifest_version};

#[cfg(feature = "tui")]
pub use tui::run;

/// Rock platform versions this tool can scaffold against.
///
/// Closed list: the version prompt offers exactly these choices.
pub const SUPPORTED_ROCK_VERSIONS: &[&str] = &["1.16.2"];

/// Command shown in template-compatibility warnings.
pub const UPGRADE_COMMAND: &str = "cargo install rock-tools --force";
