//! Template manifest types and parsing

use serde::{Deserialize, Serialize};

/// One file rendered from the template into the new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Source path relative to the template directory
    pub source: String,

    /// Destination path in the generated project. Defaults to the source
    /// path with a trailing `.tpl` extension removed.
    #[serde(default)]
    pub dest: Option<String>,
}

impl TemplateFile {
    /// Get the destination path for this file
    pub fn destination(&self) -> &str {
        match &self.dest {
            Some(dest) => dest,
            None => self.source.strip_suffix(".tpl").unwrap_or(&self.source),
        }
    }
}

/// Per-template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template generates
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Variables holding filesystem paths; their separators are normalized
    /// to the target platform on substitution
    #[serde(default)]
    pub path_vars: Vec<String>,

    /// Files to render, in order
    pub files: Vec<TemplateFile>,
}
