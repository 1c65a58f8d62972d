use crate::config::GeneratorConfig;
use crate::dashboard::{DashboardBuilder, ListVariable};
use crate::promql::{Expr, LabelMatcher, label, vector};

/// Dashboard variable selecting the cluster when cluster scoping is enabled.
pub const CLUSTER_VARIABLE: &str = "cluster";

/// Project, datasource and cluster scoping shared by every exporter dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixinScope {
    pub project: String,
    pub datasource: String,
    pub cluster_label_name: String,
}

impl MixinScope {
    pub fn new(
        project: impl Into<String>,
        datasource: impl Into<String>,
        cluster_label_name: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            datasource: datasource.into(),
            cluster_label_name: cluster_label_name.into(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            &config.project,
            &config.datasource,
            &config.cluster_label_name,
        )
    }

    /// `<cluster-label>="$cluster"`, or nothing when cluster scoping is off.
    pub fn cluster_matcher(&self) -> Option<LabelMatcher> {
        (!self.cluster_label_name.is_empty()).then(|| {
            label(self.cluster_label_name.as_str()).equal(format!("${}", CLUSTER_VARIABLE))
        })
    }

    /// Matchers selecting the dashboard's `$job` and `$instance`, plus the cluster.
    /// Regex matches, since Perses expands "All" and multi-selections to `a|b` or `.*`.
    pub fn target_matchers(&self) -> Vec<LabelMatcher> {
        let mut matchers = vec![
            label("job").equal_regexp("$job"),
            label("instance").equal_regexp("$instance"),
        ];
        matchers.extend(self.cluster_matcher());
        matchers
    }

    /// `metric{job=~"$job",instance=~"$instance",...}` with any extra matchers appended.
    pub fn target(&self, metric: &str, extra: impl IntoIterator<Item = LabelMatcher>) -> Expr {
        let mut matchers = self.target_matchers();
        matchers.extend(extra);
        vector(metric, matchers)
    }

    /// Cluster, job and instance variables, each narrowed by the ones before it.
    /// `metric` is a series every target of the exporter exposes.
    pub fn target_variables(&self, metric: &str) -> Vec<ListVariable> {
        let mut variables = Vec::with_capacity(3);
        let mut scope: Vec<LabelMatcher> = Vec::new();

        if let Some(cluster) = self.cluster_matcher() {
            variables.push(
                ListVariable::label_values(CLUSTER_VARIABLE)
                    .label(self.cluster_label_name.as_str())
                    .matcher(&vector(metric, [])),
            );
            scope.push(cluster);
        }

        variables.push(
            ListVariable::label_values("job").matcher(&vector(metric, scope.clone())),
        );
        scope.push(label("job").equal_regexp("$job"));
        variables.push(
            ListVariable::label_values("instance")
                .allow_all()
                .matcher(&vector(metric, scope)),
        );
        variables
    }

    /// Dashboard builder preset with this scope's project, datasource and variables.
    pub fn dashboard(&self, name: &str, variable_metric: &str) -> DashboardBuilder {
        DashboardBuilder::new(name)
            .project(self.project.as_str())
            .datasource(self.datasource.as_str())
            .variables(self.target_variables(variable_metric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscoped_matchers() {
        let scope = MixinScope::new("default", "", "");
        assert!(scope.cluster_matcher().is_none());
        assert_eq!(
            scope.target("up", []).to_string(),
            r#"up{job=~"$job",instance=~"$instance"}"#
        );
        let names: Vec<_> = scope
            .target_variables("up")
            .into_iter()
            .map(|v| v.name().to_string())
            .collect();
        assert_eq!(names, vec!["job", "instance"]);
    }

    #[test]
    fn test_cluster_scoping() {
        let scope = MixinScope::new("default", "prom", "k8s_cluster");
        assert_eq!(
            scope
                .target("up", [label("code").equal_regexp("5..")])
                .to_string(),
            r#"up{job=~"$job",instance=~"$instance",k8s_cluster="$cluster",code=~"5.."}"#
        );

        let variables = scope.target_variables("go_goroutines");
        assert_eq!(variables.len(), 3);
        assert_eq!(variables[0].name(), "cluster");
    }

    #[test]
    fn test_from_config() {
        let config = GeneratorConfig {
            project: "perses".into(),
            cluster_label_name: "cluster".into(),
            ..Default::default()
        };
        let scope = MixinScope::from_config(&config);
        assert_eq!(scope.project, "perses");
        assert!(scope.datasource.is_empty());
        assert!(scope.cluster_matcher().is_some());
    }
}
