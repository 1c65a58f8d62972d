use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MixinError, Result};

/// Serialization format for written artifacts.
/// - Yaml: block-style YAML (default)
/// - Json: pretty-printed JSON
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.extension()
    }

    /// Encode a document. Mapping keys come out sorted and the text ends with a newline,
    /// so identical input always yields identical bytes.
    pub fn encode(self, value: &Value) -> Result<String> {
        let mut text = match self {
            Self::Yaml => serde_yaml_bw::to_string(value)?,
            Self::Json => serde_json::to_string_pretty(value)?,
        };
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }

    pub fn decode(self, text: &str) -> Result<Value> {
        match self {
            Self::Yaml => Ok(serde_yaml_bw::from_str(text)?),
            Self::Json => Ok(serde_json::from_str(text)?),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = MixinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(MixinError::UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = MixinError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
