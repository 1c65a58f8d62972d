use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigOverrides, TargetOverrides};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "monitoring-mixins")]
#[command(author, version, about = "Generate Perses dashboards and Prometheus rules for common exporters", long_about = None)]
pub struct Cli {
    /// The project name [default: default]
    #[arg(long)]
    pub project: Option<String>,

    /// The datasource name (empty uses the project default)
    #[arg(long)]
    pub datasource: Option<String>,

    /// The cluster label name (empty disables cluster scoping)
    #[arg(long)]
    pub cluster_label_name: Option<String>,

    /// Output format of the dashboards [default: yaml]
    #[arg(long, value_enum, ignore_case = true)]
    pub output: Option<OutputFormat>,

    /// Output directory of the dashboards [default: ./built]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output format of the rules [default: yaml]
    #[arg(long, value_enum, ignore_case = true)]
    pub output_rules: Option<OutputFormat>,

    /// Output directory of the rules [default: ./built/rules]
    #[arg(long)]
    pub output_rules_dir: Option<PathBuf>,

    /// Dashboard linked from alert annotations
    #[arg(long)]
    pub dashboard_url: Option<String>,

    /// TOML file with default settings; flags take precedence
    #[arg(long, env = "MONITORING_MIXINS_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Settings given on the command line, layered over the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            project: self.project.clone(),
            datasource: self.datasource.clone(),
            cluster_label_name: self.cluster_label_name.clone(),
            dashboard_url: self.dashboard_url.clone(),
            dashboards: TargetOverrides {
                format: self.output,
                dir: self.output_dir.clone(),
            },
            rules: TargetOverrides {
                format: self.output_rules,
                dir: self.output_rules_dir.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_override_nothing() {
        let cli = Cli::try_parse_from(["monitoring-mixins"]).unwrap();
        assert_eq!(cli.overrides(), ConfigOverrides::default());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_flags_map_to_overrides() {
        let cli = Cli::try_parse_from([
            "monitoring-mixins",
            "--project",
            "perses",
            "--cluster-label-name",
            "cluster",
            "--output",
            "json",
            "--output-rules-dir",
            "out/rules",
            "-v",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.project.as_deref(), Some("perses"));
        assert_eq!(overrides.cluster_label_name.as_deref(), Some("cluster"));
        assert_eq!(overrides.dashboards.format, Some(OutputFormat::Json));
        assert_eq!(overrides.dashboards.dir, None);
        assert_eq!(overrides.rules.dir, Some(PathBuf::from("out/rules")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_format_flags_ignore_case() {
        let cli = Cli::try_parse_from([
            "monitoring-mixins",
            "--output",
            "JSON",
            "--output-rules",
            "Yaml",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.output_rules, Some(OutputFormat::Yaml));
        assert_eq!(cli.output, Some("JSON".parse().unwrap()));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = Cli::try_parse_from(["monitoring-mixins", "--output", "toml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
