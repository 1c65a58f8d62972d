//! Artifact collection and writing.
//!
//! - `ArtifactRegistry`: named artifacts in insertion order, duplicates rejected
//! - `ComponentResult`: a built document tagged with its output component
//! - `ArtifactWriter`: serializes a registry to `<dir>/<component>/<name>.<ext>`
//! - `OutputFormat`: YAML or JSON encoding

mod document;
mod format;
mod registry;
mod writer;

pub use document::{ComponentResult, Document};
pub use format::OutputFormat;
pub use registry::{Artifact, ArtifactRegistry, IntoArtifact};
pub use writer::{ArtifactWriter, artifact_path, write_artifacts};
