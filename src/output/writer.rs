use std::path::PathBuf;

use indexmap::IndexSet;
use tracing::{debug, info};

use super::registry::{Artifact, ArtifactRegistry, IntoArtifact};
use crate::config::OutputTarget;
use crate::error::{MixinError, Result};
use crate::utils::{ensure_dir, write_atomic};

/// Collects artifacts of one kind (dashboards or rules) and writes them to a
/// single output target.
///
/// Layout: `<dir>/<component>/<name>.<ext>`. Every directory is prepared before
/// the first artifact is encoded, so a directory problem aborts the pass without
/// leaving partial output behind.
pub struct ArtifactWriter {
    kind: &'static str,
    target: OutputTarget,
    registry: ArtifactRegistry,
}

impl ArtifactWriter {
    pub fn new(kind: &'static str, target: OutputTarget) -> Self {
        Self {
            kind,
            target,
            registry: ArtifactRegistry::new(),
        }
    }

    pub fn add(&mut self, source: impl IntoArtifact) -> Result<()> {
        self.registry.add(source)
    }

    pub fn registry(&self) -> &ArtifactRegistry {
        &self.registry
    }

    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Path an artifact is written to under this writer's target.
    pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
        artifact_path(&self.target, artifact)
    }

    /// Write every registered artifact and return the written paths in registry order.
    pub fn write(self) -> Result<Vec<PathBuf>> {
        let written = write_artifacts(&self.target, &self.registry)?;
        info!(
            kind = self.kind,
            count = written.len(),
            dir = %self.target.dir.display(),
            format = %self.target.format,
            "Wrote artifacts"
        );
        Ok(written)
    }
}

pub fn artifact_path(target: &OutputTarget, artifact: &Artifact) -> PathBuf {
    target.dir.join(artifact.component()).join(format!(
        "{}.{}",
        artifact.name(),
        target.format.extension()
    ))
}

/// Serialize all artifacts of `registry` into `target`. Stops at the first failure.
pub fn write_artifacts(target: &OutputTarget, registry: &ArtifactRegistry) -> Result<Vec<PathBuf>> {
    ensure_dir(&target.dir)?;

    let components: IndexSet<&str> = registry.list().map(Artifact::component).collect();
    for component in &components {
        ensure_dir(&target.dir.join(component))?;
    }

    let mut written = Vec::with_capacity(registry.len());
    for artifact in registry.list() {
        let path = artifact_path(target, artifact);
        let content = target
            .format
            .encode(artifact.payload())
            .map_err(|e| MixinError::Encode {
                name: artifact.name().to_string(),
                format: target.format.as_str(),
                message: e.to_string(),
            })?;

        write_atomic(&path, content.as_bytes()).map_err(|source| MixinError::WriteArtifact {
            name: artifact.name().to_string(),
            path: path.clone(),
            source,
        })?;

        debug!(name = artifact.name(), path = %path.display(), "Wrote artifact");
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn target(dir: PathBuf, format: OutputFormat) -> OutputTarget {
        OutputTarget { format, dir }
    }

    fn demo_artifact() -> Artifact {
        Artifact::new(
            "demo-app",
            "demo-app",
            json!({"kind": "dashboard", "name": "demo-app"}),
        )
    }

    #[test]
    fn test_write_single_yaml_artifact() {
        let temp = TempDir::new().unwrap();
        let built = temp.path().join("built");

        let mut writer = ArtifactWriter::new("dashboards", target(built.clone(), OutputFormat::Yaml));
        writer.add(demo_artifact()).unwrap();
        let written = writer.write().unwrap();

        let expected = built.join("demo-app").join("demo-app.yaml");
        assert_eq!(written, vec![expected.clone()]);

        let content = fs::read_to_string(&expected).unwrap();
        let parsed = OutputFormat::Yaml.decode(&content).unwrap();
        assert_eq!(parsed, json!({"kind": "dashboard", "name": "demo-app"}));

        let entries: Vec<_> = fs::read_dir(built.join("demo-app")).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_groups_by_component() {
        let temp = TempDir::new().unwrap();
        let mut registry = ArtifactRegistry::new();
        registry
            .add(Artifact::new("blackbox-exporter", "blackbox-exporter", json!({"a": 1})))
            .unwrap();
        registry
            .add(Artifact::new("perses-overview", "perses", json!({"b": 2})))
            .unwrap();

        let out = target(temp.path().to_path_buf(), OutputFormat::Json);
        let written = write_artifacts(&out, &registry).unwrap();

        assert_eq!(
            written,
            vec![
                temp.path().join("blackbox-exporter/blackbox-exporter.json"),
                temp.path().join("perses/perses-overview.json"),
            ]
        );
    }

    #[test]
    fn test_write_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let out = target(temp.path().join("built"), OutputFormat::Yaml);

        let mut registry = ArtifactRegistry::new();
        registry
            .add(Artifact::new(
                "rules",
                "blackbox-exporter",
                json!({"spec": {"groups": [{"name": "g", "rules": []}]}, "kind": "PrometheusRule"}),
            ))
            .unwrap();

        let first = write_artifacts(&out, &registry).unwrap();
        let first_bytes = fs::read(&first[0]).unwrap();
        let second = write_artifacts(&out, &registry).unwrap();
        let second_bytes = fs::read(&second[0]).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn test_write_overwrites_stale_content() {
        let temp = TempDir::new().unwrap();
        let out = target(temp.path().to_path_buf(), OutputFormat::Json);
        let stale = temp.path().join("demo-app/demo-app.json");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "{\"old\": true, \"extra\": [1, 2, 3]}\n").unwrap();

        let mut registry = ArtifactRegistry::new();
        registry.add(demo_artifact()).unwrap();
        write_artifacts(&out, &registry).unwrap();

        let parsed = OutputFormat::Json
            .decode(&fs::read_to_string(&stale).unwrap())
            .unwrap();
        assert_eq!(parsed, json!({"kind": "dashboard", "name": "demo-app"}));
    }

    #[test]
    fn test_empty_registry_creates_directory_only() {
        let temp = TempDir::new().unwrap();
        let built = temp.path().join("built");

        let writer = ArtifactWriter::new("dashboards", target(built.clone(), OutputFormat::Yaml));
        let written = writer.write().unwrap();

        assert!(written.is_empty());
        assert!(built.is_dir());
        assert_eq!(fs::read_dir(&built).unwrap().count(), 0);
    }

    #[test]
    fn test_output_dir_is_a_file() {
        let temp = TempDir::new().unwrap();
        let built = temp.path().join("built");
        fs::write(&built, "occupied").unwrap();

        let mut registry = ArtifactRegistry::new();
        registry.add(demo_artifact()).unwrap();

        let err = write_artifacts(&target(built.clone(), OutputFormat::Yaml), &registry).unwrap_err();
        assert!(matches!(err, MixinError::NotADirectory { ref path } if *path == built));
        assert!(err.to_string().contains(&built.display().to_string()));
        assert_eq!(fs::read_to_string(&built).unwrap(), "occupied");
    }

    #[test]
    fn test_component_dir_is_a_file_aborts_before_writing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("perses"), "occupied").unwrap();

        let mut registry = ArtifactRegistry::new();
        registry.add(demo_artifact()).unwrap();
        registry
            .add(Artifact::new("perses-overview", "perses", json!({})))
            .unwrap();

        let out = target(temp.path().to_path_buf(), OutputFormat::Yaml);
        let err = write_artifacts(&out, &registry).unwrap_err();

        assert!(matches!(err, MixinError::NotADirectory { .. }));
        // demo-app was registered first but nothing was serialized
        assert!(!temp.path().join("demo-app/demo-app.yaml").exists());
    }

    #[test]
    fn test_write_failure_names_artifact_and_path() {
        let temp = TempDir::new().unwrap();
        let blocked = temp.path().join("demo-app/demo-app.yaml");
        fs::create_dir_all(&blocked).unwrap();

        let mut registry = ArtifactRegistry::new();
        registry.add(demo_artifact()).unwrap();
        registry
            .add(Artifact::new("perses-overview", "perses", json!({})))
            .unwrap();

        let out = target(temp.path().to_path_buf(), OutputFormat::Yaml);
        let err = write_artifacts(&out, &registry).unwrap_err();

        match &err {
            MixinError::WriteArtifact { name, path, .. } => {
                assert_eq!(name, "demo-app");
                assert_eq!(path, &blocked);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains(&blocked.display().to_string()));
        assert!(!err.is_configuration());

        // the pass stopped before the next artifact
        assert!(!temp.path().join("perses/perses-overview.yaml").exists());
        assert!(!temp.path().join("demo-app/demo-app.yaml.tmp").exists());
        assert!(blocked.is_dir());
    }

    #[test]
    fn test_path_for_uses_format_extension() {
        let writer = ArtifactWriter::new("rules", target(PathBuf::from("built/rules"), OutputFormat::Json));
        let path = writer.path_for(&demo_artifact());
        assert_eq!(path, PathBuf::from("built/rules/demo-app/demo-app.json"));
    }
}
