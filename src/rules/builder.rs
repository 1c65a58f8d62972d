//! Chained builders producing [`PrometheusRule`] documents.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use super::model::{
    API_VERSION, AlertingRule, ObjectMeta, PrometheusRule, PrometheusRuleSpec, RecordingRule, Rule,
    RuleGroup,
};
use crate::error::{MixinError, Result};
use crate::promql::Expr;
use crate::utils::{format_duration, is_valid_metric_name, is_valid_resource_name};

pub struct PrometheusRuleBuilder {
    name: String,
    namespace: Option<String>,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
    groups: Vec<RuleGroupBuilder>,
}

impl PrometheusRuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
            groups: Vec::new(),
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    pub fn labels<K, V>(mut self, labels: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.labels
            .extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn annotations<K, V>(mut self, annotations: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.annotations
            .extend(annotations.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn group(mut self, group: RuleGroupBuilder) -> Self {
        self.groups.push(group);
        self
    }

    pub fn build(self) -> Result<PrometheusRule> {
        if !is_valid_resource_name(&self.name) {
            return Err(MixinError::invalid_artifact(
                "rule name",
                &self.name,
                "must match [A-Za-z0-9_.-]+",
            ));
        }

        let mut seen = HashSet::new();
        let mut groups = Vec::with_capacity(self.groups.len());
        for group in self.groups {
            if !seen.insert(group.name.clone()) {
                return Err(MixinError::Config(format!(
                    "rule {}: duplicate group name '{}'",
                    self.name, group.name
                )));
            }
            groups.push(group.build()?);
        }

        Ok(PrometheusRule {
            api_version: API_VERSION,
            kind: "PrometheusRule",
            metadata: ObjectMeta {
                name: self.name,
                namespace: self.namespace,
                labels: self.labels,
                annotations: self.annotations,
            },
            spec: PrometheusRuleSpec { groups },
        })
    }
}

pub struct RuleGroupBuilder {
    name: String,
    interval: Option<Duration>,
    rules: Vec<RuleBuilder>,
}

enum RuleBuilder {
    Alert(AlertBuilder),
    Record(RecordBuilder),
}

impl RuleGroupBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interval: None,
            rules: Vec::new(),
        }
    }

    /// Evaluation interval; the Prometheus global default applies when unset.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn alert(mut self, alert: AlertBuilder) -> Self {
        self.rules.push(RuleBuilder::Alert(alert));
        self
    }

    pub fn record(mut self, record: RecordBuilder) -> Self {
        self.rules.push(RuleBuilder::Record(record));
        self
    }

    fn build(self) -> Result<RuleGroup> {
        if self.name.is_empty() {
            return Err(MixinError::Config("rule group name must not be empty".into()));
        }

        let rules = self
            .rules
            .into_iter()
            .map(|rule| match rule {
                RuleBuilder::Alert(alert) => alert.build(&self.name).map(Rule::Alerting),
                RuleBuilder::Record(record) => record.build(&self.name).map(Rule::Recording),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RuleGroup {
            name: self.name,
            interval: self.interval.map(format_duration),
            rules,
        })
    }
}

pub struct AlertBuilder {
    alert: String,
    expr: Option<String>,
    for_duration: Option<Duration>,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
}

impl AlertBuilder {
    pub fn new(alert: impl Into<String>) -> Self {
        Self {
            alert: alert.into(),
            expr: None,
            for_duration: None,
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    pub fn expr(mut self, expr: &Expr) -> Self {
        self.expr = Some(expr.pretty(0));
        self
    }

    /// How long the condition must hold before the alert fires.
    pub fn for_duration(mut self, duration: Duration) -> Self {
        self.for_duration = Some(duration);
        self
    }

    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn severity(self, severity: &str) -> Self {
        self.label("severity", severity)
    }

    pub fn annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn summary(self, summary: impl Into<String>) -> Self {
        self.annotation("summary", summary)
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.annotation("description", description)
    }

    fn build(self, group: &str) -> Result<AlertingRule> {
        if self.alert.is_empty() {
            return Err(MixinError::Config(format!(
                "group {}: alert name must not be empty",
                group
            )));
        }
        let expr = self.expr.ok_or_else(|| {
            MixinError::Config(format!("group {}: alert {} has no expression", group, self.alert))
        })?;

        Ok(AlertingRule {
            alert: self.alert,
            expr,
            for_duration: self.for_duration.map(format_duration),
            labels: self.labels,
            annotations: self.annotations,
        })
    }
}

pub struct RecordBuilder {
    record: String,
    expr: String,
    labels: BTreeMap<String, String>,
}

impl RecordBuilder {
    pub fn new(record: impl Into<String>, expr: &Expr) -> Self {
        Self {
            record: record.into(),
            expr: expr.pretty(0),
            labels: BTreeMap::new(),
        }
    }

    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    fn build(self, group: &str) -> Result<RecordingRule> {
        if !is_valid_metric_name(&self.record) {
            return Err(MixinError::Config(format!(
                "group {}: '{}' is not a valid recorded metric name",
                group, self.record
            )));
        }
        Ok(RecordingRule {
            record: self.record,
            expr: self.expr,
            labels: self.labels,
        })
    }
}
