//! Canonical version extraction from the shared properties file

use std::path::Path;

use anyhow::{Context, Result};
use semver::Version;

use crate::error::{ToolError, ToolResult};

const VERSION_OPEN: &str = "<Version>";
const VERSION_CLOSE: &str = "</Version>";

/// Extract the canonical semantic version from a properties document.
///
/// Exactly one `<Version>` declaration is expected. A missing or
/// unterminated declaration, or one whose text is not a valid semantic
/// version, is fatal: there is no fallback or default version.
pub fn read_canonical_version(props: &str) -> ToolResult<String> {
    let start = props
        .find(VERSION_OPEN)
        .ok_or_else(|| not_found("no <Version> element"))?
        + VERSION_OPEN.len();
    let len = props[start..]
        .find(VERSION_CLOSE)
        .ok_or_else(|| not_found("unterminated <Version> element"))?;

    let raw = props[start..start + len].trim();
    if Version::parse(raw).is_err() {
        return Err(not_found(format!("`{}` is not a semantic version", raw)));
    }

    Ok(raw.to_string())
}

/// Read the canonical version from a properties file on disk.
pub fn read_version_file(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(read_canonical_version(&text)?)
}

fn not_found(detail: impl Into<String>) -> ToolError {
    ToolError::VersionNotFound {
        detail: detail.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_version_from_props() {
        let props = "<Project>\n  <PropertyGroup>\n    <Version>1.16.2</Version>\n  </PropertyGroup>\n</Project>\n";
        assert_eq!(read_canonical_version(props).unwrap(), "1.16.2");
    }

    #[test]
    fn test_reads_prerelease_suffix() {
        let props = "<Version>1.16.2-alpha.1</Version>";
        assert_eq!(read_canonical_version(props).unwrap(), "1.16.2-alpha.1");
    }

    #[test]
    fn test_missing_tag_is_version_not_found() {
        let props = "<Project><PropertyGroup></PropertyGroup></Project>";
        let err = read_canonical_version(props).unwrap_err();
        assert!(matches!(err, ToolError::VersionNotFound { .. }));
    }

    #[test]
    fn test_unterminated_tag_is_version_not_found() {
        let err = read_canonical_version("<Version>1.16.2").unwrap_err();
        assert!(matches!(err, ToolError::VersionNotFound { .. }));
    }

    #[test]
    fn test_non_semver_text_is_version_not_found() {
        let err = read_canonical_version("<Version>sixteen</Version>").unwrap_err();
        assert!(matches!(err, ToolError::VersionNotFound { .. }));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let props = "<Version>\n  1.16.2\n</Version>";
        assert_eq!(read_canonical_version(props).unwrap(), "1.16.2");
    }
}
