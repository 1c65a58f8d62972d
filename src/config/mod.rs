//! Configuration types and loading.
//!
//! - `GeneratorConfig`: effective settings for one run, with validation
//! - `OutputTarget`: output format and directory for one kind of artifact
//! - `ConfigOverrides`: partial settings from a TOML file or the command line

mod settings;

pub use settings::{
    ConfigOverrides, DEFAULT_DASHBOARD_DIR, DEFAULT_DASHBOARD_URL, DEFAULT_PROJECT,
    DEFAULT_RULES_DIR, GeneratorConfig, OutputTarget, TargetOverrides,
};
