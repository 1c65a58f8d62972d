use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{MixinError, Result};
use crate::output::OutputFormat;
use crate::utils::{is_valid_label_name, is_valid_resource_name};

pub const DEFAULT_PROJECT: &str = "default";
pub const DEFAULT_DASHBOARD_DIR: &str = "./built";
pub const DEFAULT_RULES_DIR: &str = "./built/rules";
pub const DEFAULT_DASHBOARD_URL: &str =
    "https://demo.perses.dev/projects/perses/dashboards/blackboxexporter";

/// Settings for one generator run. Built once from defaults, an optional TOML
/// file and command-line overrides, then handed to every builder and writer.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Project the dashboards and rules belong to.
    pub project: String,
    /// Prometheus datasource queried by the dashboards; empty means the project default.
    pub datasource: String,
    /// Label used to scope queries to one cluster; empty disables cluster scoping.
    pub cluster_label_name: String,
    /// Dashboard linked from alert annotations.
    pub dashboard_url: String,
    pub dashboards: OutputTarget,
    pub rules: OutputTarget,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            datasource: String::new(),
            cluster_label_name: String::new(),
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            dashboards: OutputTarget::new(OutputFormat::Yaml, DEFAULT_DASHBOARD_DIR),
            rules: OutputTarget::new(OutputFormat::Yaml, DEFAULT_RULES_DIR),
        }
    }
}

impl GeneratorConfig {
    /// Resolve the effective configuration: defaults, then `config_path`, then `overrides`.
    pub fn load(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            let file = ConfigOverrides::from_file(path)?;
            debug!(path = %path.display(), "Loaded configuration file");
            config.apply(file);
        }

        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(project) = overrides.project {
            self.project = project;
        }
        if let Some(datasource) = overrides.datasource {
            self.datasource = datasource;
        }
        if let Some(label) = overrides.cluster_label_name {
            self.cluster_label_name = label;
        }
        if let Some(url) = overrides.dashboard_url {
            self.dashboard_url = url;
        }
        self.dashboards.apply(overrides.dashboards);
        self.rules.apply(overrides.rules);
    }

    /// Validate configuration values, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if !is_valid_resource_name(&self.project) {
            errors.push(format!(
                "project '{}' must match [A-Za-z0-9_.-]+",
                self.project
            ));
        }
        if !self.datasource.is_empty() && !is_valid_resource_name(&self.datasource) {
            errors.push(format!(
                "datasource '{}' must match [A-Za-z0-9_.-]+",
                self.datasource
            ));
        }
        if !self.cluster_label_name.is_empty() && !is_valid_label_name(&self.cluster_label_name) {
            errors.push(format!(
                "cluster_label_name '{}' is not a valid Prometheus label name",
                self.cluster_label_name
            ));
        }
        if self.dashboards.dir.as_os_str().is_empty() {
            errors.push("dashboards.dir must not be empty".to_string());
        }
        if self.rules.dir.as_os_str().is_empty() {
            errors.push("rules.dir must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MixinError::Config(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Where and how one kind of artifact is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub format: OutputFormat,
    pub dir: PathBuf,
}

impl OutputTarget {
    pub fn new(format: OutputFormat, dir: impl Into<PathBuf>) -> Self {
        Self {
            format,
            dir: dir.into(),
        }
    }

    fn apply(&mut self, overrides: TargetOverrides) {
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(dir) = overrides.dir {
            self.dir = dir;
        }
    }
}

/// Partial configuration. Used both for the TOML file and for command-line flags;
/// unset fields leave the underlying value alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub project: Option<String>,
    pub datasource: Option<String>,
    pub cluster_label_name: Option<String>,
    pub dashboard_url: Option<String>,
    pub dashboards: TargetOverrides,
    pub rules: TargetOverrides,
}

impl ConfigOverrides {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MixinError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetOverrides {
    pub format: Option<OutputFormat>,
    pub dir: Option<PathBuf>,
}
