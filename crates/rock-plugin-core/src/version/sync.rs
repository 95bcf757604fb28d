//! Version synchronization between the canonical properties file and
//! package manifests
//!
//! Write mode stamps the canonical version into a manifest; check mode only
//! compares and reports drift. Both build on the string-level operations so
//! they stay testable without touching the filesystem.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::{ToolError, ToolResult};
use crate::version::reader;

/// Rewrite the manifest's `version` field to the canonical version.
///
/// Unrelated fields and key order are preserved; indentation and the
/// trailing newline are normalized. Applying this twice yields the same
/// bytes as applying it once.
pub fn set_manifest_version(manifest: &str, version: &str) -> ToolResult<String> {
    let mut doc: Value = parse_manifest(manifest)?;
    let Some(fields) = doc.as_object_mut() else {
        return Err(ToolError::Manifest {
            message: "manifest root is not an object".to_string(),
        });
    };

    fields.insert("version".to_string(), Value::String(version.to_string()));

    let mut out = serde_json::to_string_pretty(&doc).map_err(|e| ToolError::Manifest {
        message: e.to_string(),
    })?;
    out.push('\n');
    Ok(out)
}

/// Compare the manifest's `version` field against the canonical version.
///
/// Drift is fatal; this never mutates anything.
pub fn check_manifest_version(manifest: &str, canonical: &str) -> ToolResult<()> {
    let doc: Value = parse_manifest(manifest)?;
    let found = doc
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::Manifest {
            message: "manifest has no `version` field".to_string(),
        })?;

    if found == canonical {
        Ok(())
    } else {
        Err(ToolError::VersionMismatch {
            expected: canonical.to_string(),
            found: found.to_string(),
        })
    }
}

/// Write mode: stamp the canonical version into one manifest on disk.
///
/// Returns the version that was written.
pub fn sync_manifest(props_path: &Path, manifest_path: &Path) -> Result<String> {
    let version = reader::read_version_file(props_path)?;
    let manifest = std::fs::read_to_string(manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;

    let updated = set_manifest_version(&manifest, &version)?;
    std::fs::write(manifest_path, &updated)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(version)
}

/// Check mode: verify one manifest on disk without touching it.
///
/// Returns the canonical version on success.
pub fn check_manifest(props_path: &Path, manifest_path: &Path) -> Result<String> {
    let version = reader::read_version_file(props_path)?;
    let manifest = std::fs::read_to_string(manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;

    check_manifest_version(&manifest, &version)
        .with_context(|| format!("{} is out of date", manifest_path.display()))?;

    Ok(version)
}

fn parse_manifest(manifest: &str) -> ToolResult<Value> {
    serde_json::from_str(manifest).map_err(|e| ToolError::Manifest {
        message: e.to_string(),
    })
}
