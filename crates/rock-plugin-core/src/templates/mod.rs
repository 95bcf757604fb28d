//! Template discovery, rendering, and project generation
//!
//! Templates are plain-text assets shipped with the tool under
//! `templates/<name>/`, each described by a `template.yaml` manifest. The
//! renderer itself is pure; this module owns the surrounding I/O.

pub mod compat;
pub mod manifest;
pub mod renderer;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::config::ScaffoldConfig;

pub use compat::check_compatibility;
pub use manifest::{TemplateFile, TemplateManifest};
pub use renderer::Template;

/// A directory of template assets
pub struct TemplateSet {
    root: PathBuf,
}

impl TemplateSet {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            anyhow::bail!("Template directory not found: {}", root.display());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List template names: subdirectories holding a template.yaml
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry?;
            if entry.file_type().is_dir() && entry.path().join("template.yaml").is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    pub fn load_manifest(&self, name: &str) -> Result<TemplateManifest> {
        let path = self.root.join(name).join("template.yaml");
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(manifest)
    }

    fn load_template(
        &self,
        name: &str,
        manifest: &TemplateManifest,
        file: &TemplateFile,
    ) -> Result<Template> {
        let path = self.root.join(name).join(&file.source);
        let body = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Template::new(body).with_path_vars(manifest.path_vars.iter().cloned()))
    }
}

/// Render every file of a template into the target directory.
///
/// Returns the destination paths written, relative to `target_dir`.
pub fn scaffold(
    set: &TemplateSet,
    name: &str,
    manifest: &TemplateManifest,
    config: &ScaffoldConfig,
    target_dir: &Path,
) -> Result<Vec<String>> {
    // Render everything before touching the filesystem; a render failure on
    // any file must not leave a partial project behind.
    let mut rendered_files = Vec::new();
    for file in &manifest.files {
        let template = set.load_template(name, manifest, file)?;
        let rendered = template.render(config)?;
        rendered_files.push((file.destination().to_string(), rendered));
    }

    std::fs::create_dir_all(target_dir).context("Failed to create target directory")?;

    let mut written = Vec::new();

    for (dest, rendered) in rendered_files {
        let target_path = target_dir.join(&dest);
        if let Some(parent) = target_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&target_path, rendered)
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        written.push(dest);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScaffoldConfig;
    use std::fs;

    fn write_fixture_template(root: &Path) {
        let dir = root.join("plugin");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("template.yaml"),
            "\
name: Rock Plugin
description: fixture
version: 0.1.1
path_vars:
  - RockWebPath
files:
  - source: Plugin.csproj.tpl
    dest: Plugin.csproj
  - source: package.json.tpl
",
        )
        .unwrap();
        fs::write(
            dir.join("Plugin.csproj.tpl"),
            "<RockVersion>{{ RockVersion }}</RockVersion>\n\
             {% if Copy == true %}\n<CopyTo>{{ RockWebPath }}</CopyTo>\n{% endif %}\n",
        )
        .unwrap();
        fs::write(
            dir.join("package.json.tpl"),
            "{\n  \"version\": \"{{ ToolVersion }}\"\n}\n",
        )
        .unwrap();
    }

    fn fixture_config() -> ScaffoldConfig {
        let mut config = ScaffoldConfig::new();
        config.set_text("RockVersion", "1.16.2");
        config.set_text("ToolVersion", "0.1.1");
        config.set_text("RockWebPath", "C:/RockWeb");
        config.set_bool("Copy", false);
        config
    }

    #[test]
    fn test_list_finds_templates_with_manifests() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixture_template(tmp.path());
        // Directory without a manifest is not a template
        fs::create_dir_all(tmp.path().join("scratch")).unwrap();

        let set = TemplateSet::open(tmp.path()).unwrap();
        assert_eq!(set.list().unwrap(), vec!["plugin".to_string()]);
    }

    #[test]
    fn test_open_rejects_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(TemplateSet::open(tmp.path().join("nope")).is_err());
    }

    #[test]
    fn test_scaffold_renders_all_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixture_template(tmp.path());
        let target = tmp.path().join("out");

        let set = TemplateSet::open(tmp.path()).unwrap();
        let manifest = set.load_manifest("plugin").unwrap();
        let written =
            scaffold(&set, "plugin", &manifest, &fixture_config(), &target).unwrap();

        assert_eq!(written, vec!["Plugin.csproj", "package.json"]);

        let csproj = fs::read_to_string(target.join("Plugin.csproj")).unwrap();
        assert_eq!(csproj, "<RockVersion>1.16.2</RockVersion>\n");

        let package = fs::read_to_string(target.join("package.json")).unwrap();
        assert!(package.contains("\"version\": \"0.1.1\""));
    }

    #[test]
    fn test_scaffold_fails_on_missing_key_without_partial_output() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixture_template(tmp.path());
        let target = tmp.path().join("out");

        let set = TemplateSet::open(tmp.path()).unwrap();
        let manifest = set.load_manifest("plugin").unwrap();
        let config = ScaffoldConfig::new();

        assert!(scaffold(&set, "plugin", &manifest, &config, &target).is_err());
        // The first file failed to render, so it was never written
        assert!(!target.join("Plugin.csproj").exists());
    }

    #[test]
    fn test_late_render_failure_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("plugin");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("template.yaml"),
            "\
name: Rock Plugin
description: fixture
version: 0.1.1
files:
  - source: a.txt.tpl
  - source: b.txt.tpl
",
        )
        .unwrap();
        fs::write(dir.join("a.txt.tpl"), "rock {{ RockVersion }}\n").unwrap();
        fs::write(dir.join("b.txt.tpl"), "{{ Missing }}\n").unwrap();
        let target = tmp.path().join("out");

        let set = TemplateSet::open(tmp.path()).unwrap();
        let manifest = set.load_manifest("plugin").unwrap();

        // The second file references an unset key; the first rendered fine
        // but must not end up on disk
        assert!(scaffold(&set, "plugin", &manifest, &fixture_config(), &target).is_err());
        assert!(!target.join("a.txt").exists());
    }

    /// Renders the plugin template shipped with the repository.
    #[test]
    fn test_shipped_plugin_template_renders_cleanly() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates");
        let set = TemplateSet::open(root).unwrap();
        let manifest = set.load_manifest("plugin").unwrap();

        let mut config = fixture_config();
        config.set_bool("RestApiSupport", true);
        config.set_bool("Copy", true);

        let tmp = tempfile::tempdir().unwrap();
        let written = scaffold(&set, "plugin", &manifest, &config, tmp.path()).unwrap();
        assert!(written.contains(&"Plugin.csproj".to_string()));

        for dest in &written {
            let text = fs::read_to_string(tmp.path().join(dest)).unwrap();
            assert!(!text.contains("{{"), "{} has residual placeholders", dest);
            assert!(!text.contains("{%"), "{} has residual markers", dest);
        }

        let csproj = fs::read_to_string(tmp.path().join("Plugin.csproj")).unwrap();
        assert!(csproj.contains("RockRMS.Rest"));

        config.set_bool("RestApiSupport", false);
        let tmp2 = tempfile::tempdir().unwrap();
        scaffold(&set, "plugin", &manifest, &config, tmp2.path()).unwrap();
        let csproj = fs::read_to_string(tmp2.path().join("Plugin.csproj")).unwrap();
        assert!(!csproj.contains("RockRMS.Rest"));
    }
}
