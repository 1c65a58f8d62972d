//! Named artifact registry.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{MixinError, Result};
use crate::utils::is_safe_path_segment;

/// One generated document together with the name and component tag that decide
/// where it lands on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    name: String,
    component: String,
    payload: Value,
}

impl Artifact {
    pub fn new(name: impl Into<String>, component: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            component: component.into(),
            payload,
        }
    }

    /// Build an artifact from any serializable document.
    pub fn from_document<T: Serialize>(
        name: impl Into<String>,
        component: impl Into<String>,
        document: &T,
    ) -> Result<Self> {
        let name = name.into();
        let payload = serde_json::to_value(document).map_err(|e| MixinError::Encode {
            name: name.clone(),
            format: "document tree",
            message: e.to_string(),
        })?;
        Ok(Self::new(name, component, payload))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MixinError::EmptyArtifactName);
        }
        if !is_safe_path_segment(&self.name) {
            return Err(MixinError::invalid_artifact(
                "name",
                &self.name,
                "must be usable as a file name",
            ));
        }
        if self.component.is_empty() {
            return Err(MixinError::MissingComponent {
                name: self.name.clone(),
            });
        }
        if !is_safe_path_segment(&self.component) {
            return Err(MixinError::invalid_artifact(
                "component",
                &self.component,
                "must be usable as a directory name",
            ));
        }
        Ok(())
    }
}

/// Anything that can be turned into a registrable artifact.
pub trait IntoArtifact {
    fn into_artifact(self) -> Result<Artifact>;
}

impl IntoArtifact for Artifact {
    fn into_artifact(self) -> Result<Artifact> {
        Ok(self)
    }
}

/// Artifacts keyed by name, kept in insertion order.
///
/// Names are hand-authored, so a second artifact with an existing name is
/// rejected instead of replacing the first one.
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    artifacts: IndexMap<String, Artifact>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, source: impl IntoArtifact) -> Result<()> {
        let artifact = source.into_artifact()?;
        artifact.validate()?;

        if self.artifacts.contains_key(artifact.name()) {
            return Err(MixinError::DuplicateArtifact(artifact.name.clone()));
        }

        debug!(
            name = %artifact.name,
            component = %artifact.component,
            "Registered artifact"
        );
        self.artifacts.insert(artifact.name.clone(), artifact);
        Ok(())
    }

    /// Registered artifacts in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }
}
