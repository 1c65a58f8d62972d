use serde::Serialize;

use super::registry::{Artifact, IntoArtifact};
use crate::error::{MixinError, Result};

/// A generated document that knows its own name.
pub trait Document: Serialize {
    fn document_name(&self) -> &str;
}

/// A built document waiting for the component tag that picks its output subdirectory.
#[derive(Debug, Clone)]
pub struct ComponentResult<D> {
    document: D,
    component: Option<String>,
}

impl<D: Document> ComponentResult<D> {
    pub fn new(document: D) -> Self {
        Self {
            document,
            component: None,
        }
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn component_name(&self) -> Option<&str> {
        self.component.as_deref()
    }
}

impl<D: Document> IntoArtifact for ComponentResult<D> {
    fn into_artifact(self) -> Result<Artifact> {
        let name = self.document.document_name().to_string();
        let component = self
            .component
            .ok_or_else(|| MixinError::MissingComponent { name: name.clone() })?;
        Artifact::from_document(name, component, &self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Note {
        name: String,
        body: String,
    }

    impl Document for Note {
        fn document_name(&self) -> &str {
            &self.name
        }
    }

    fn note() -> Note {
        Note {
            name: "demo-app".into(),
            body: "hello".into(),
        }
    }

    #[test]
    fn test_into_artifact() {
        let artifact = ComponentResult::new(note())
            .component("demo-app")
            .into_artifact()
            .unwrap();

        assert_eq!(artifact.name(), "demo-app");
        assert_eq!(artifact.component(), "demo-app");
        assert_eq!(artifact.payload()["body"], "hello");
    }

    #[test]
    fn test_missing_component() {
        let err = ComponentResult::new(note()).into_artifact().unwrap_err();
        assert!(matches!(err, MixinError::MissingComponent { ref name } if name == "demo-app"));
    }
}
