//! Tool/template compatibility checking

use semver::Version;

/// Warn when a template was authored for a newer tool than the one running.
///
/// Unparseable versions produce no warning; compatibility checking is
/// advisory and never blocks scaffolding.
pub fn check_compatibility(
    tool_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let tool = parse(tool_version)?;
    let template = parse(template_version)?;

    (tool < template).then(|| {
        format!(
            "This template expects tool version {} or newer (running {}). Update with: {}",
            template_version, tool_version, upgrade_command
        )
    })
}

fn parse(version: &str) -> Option<Version> {
    Version::parse(version.strip_prefix('v').unwrap_or(version)).ok()
}
