use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MixinError {
    #[error("Artifact name must not be empty")]
    EmptyArtifactName,

    #[error("Artifact {name} has no component tag")]
    MissingComponent { name: String },

    #[error("Invalid artifact {field} '{value}': {reason}")]
    InvalidArtifact {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Artifact already registered: {0}")]
    DuplicateArtifact(String),

    #[error("Unknown output format '{0}' (expected yaml or json)")]
    UnknownFormat(String),

    #[error("Unknown query: {0}")]
    UnknownQuery(String),

    #[error("Output path {} exists and is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write artifact {name} to {}: {source}", path.display())]
    WriteArtifact {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode artifact {name} as {format}: {message}")]
    Encode {
        name: String,
        format: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_bw::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl MixinError {
    pub(crate) fn invalid_artifact(
        field: &'static str,
        value: impl Into<String>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidArtifact {
            field,
            value: value.into(),
            reason,
        }
    }

    /// Configuration problems are detected before anything touches the filesystem.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyArtifactName
                | Self::MissingComponent { .. }
                | Self::InvalidArtifact { .. }
                | Self::DuplicateArtifact(_)
                | Self::UnknownFormat(_)
                | Self::UnknownQuery(_)
                | Self::Config(_)
                | Self::Toml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MixinError>;
