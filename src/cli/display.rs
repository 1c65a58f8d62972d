use std::path::{Path, PathBuf};

use console::style;

use crate::config::GeneratorConfig;

pub struct Display;

impl Display {
    pub fn new() -> Self {
        Self
    }

    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", style(text).bold().cyan());
        println!("{}", style("═".repeat(60)).dim());
    }

    /// One line per effective setting, shown before generation in verbose mode.
    pub fn print_config(&self, config: &GeneratorConfig) {
        self.print_header("Configuration");
        println!("Project:     {}", config.project);
        println!("Datasource:  {}", or_default(&config.datasource));
        println!("Cluster:     {}", or_default(&config.cluster_label_name));
        println!(
            "Dashboards:  {} ({})",
            config.dashboards.dir.display(),
            config.dashboards.format
        );
        println!(
            "Rules:       {} ({})",
            config.rules.dir.display(),
            config.rules.format
        );
        println!();
    }

    /// `singular`/`plural` name what was written, e.g. `("rule", "rules")`.
    pub fn print_written(&self, singular: &str, plural: &str, root: &Path, paths: &[PathBuf]) {
        self.print_success(&format!(
            "Wrote {} to {}",
            count_noun(paths.len(), singular, plural),
            style(root.display()).bold()
        ));
        for path in paths {
            let shown = path.strip_prefix(root).unwrap_or(path.as_path());
            println!("    {}", style(shown.display()).dim());
        }
    }

    pub fn print_success(&self, message: &str) {
        println!("{} {}", style("✓").green().bold(), message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), message);
    }

    pub fn print_info(&self, message: &str) {
        println!("{} {}", style("→").cyan(), message);
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

fn or_default(value: &str) -> &str {
    if value.is_empty() { "(default)" } else { value }
}

fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{} {}", count, noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_noun() {
        assert_eq!(count_noun(1, "rule", "rules"), "1 rule");
        assert_eq!(count_noun(0, "rule", "rules"), "0 rules");
        assert_eq!(count_noun(4, "dashboard", "dashboards"), "4 dashboards");
    }
}
