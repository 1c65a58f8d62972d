//! Alerting rules for Blackbox Exporter probes.

use std::collections::BTreeMap;
use std::time::Duration;

use super::blackbox::{cert_expiry, days_until_expiry};
use crate::error::Result;
use crate::promql::{Expr, VectorSelector, vector};
use crate::rules::{AlertBuilder, PrometheusRuleBuilder, RuleGroupBuilder, RuleGroupResult};

pub const COMPONENT: &str = "blackbox-exporter";
pub const RULES_NAME: &str = "blackbox-exporter-rules";
pub const GROUP_NAME: &str = "blackbox-exporter";

const SLOW_PROBE_SECONDS: f64 = 1.0;
const CERT_EXPIRY_WARNING_DAYS: f64 = 20.0;

/// Resource labels attached to the generated `PrometheusRule`.
pub fn default_labels() -> BTreeMap<String, String> {
    [
        ("app.kubernetes.io/component", "blackbox-exporter"),
        ("app.kubernetes.io/name", RULES_NAME),
        ("app.kubernetes.io/part-of", "blackbox-exporter"),
        ("app.kubernetes.io/version", "main"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Builds the rule document in namespace `project`. `dashboard_url` is linked
/// from every alert.
pub fn build_blackbox_rules(
    project: &str,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
    dashboard_url: &str,
) -> Result<RuleGroupResult> {
    let alert = |name: &str| AlertBuilder::new(name).annotation("dashboard_url", dashboard_url);

    let probe_success = vector("probe_success", []);
    let http_status = vector("probe_http_status_code", []);
    let slow_probe = Expr::call(
        "avg_over_time",
        vec![
            VectorSelector::new("probe_duration_seconds")
                .with_range("1m")
                .into(),
        ],
    );

    let group = RuleGroupBuilder::new(GROUP_NAME)
        .alert(
            alert("BlackboxProbeFailed")
                .expr(&probe_success.equal(0.0))
                .severity("critical")
                .summary("Blackbox probe failed")
                .description("Probe {{ $labels.instance }} of job {{ $labels.job }} is failing."),
        )
        .alert(
            alert("BlackboxSlowProbe")
                .expr(&slow_probe.gt(SLOW_PROBE_SECONDS))
                .for_duration(Duration::from_secs(60))
                .severity("warning")
                .summary("Blackbox probe is slow")
                .description(
                    "Probe {{ $labels.instance }} took more than 1s to complete on average over the last minute.",
                ),
        )
        .alert(
            alert("BlackboxProbeHttpFailure")
                .expr(&http_status.clone().lte(199.0).or(http_status.gte(400.0)))
                .severity("critical")
                .summary("Blackbox HTTP probe failed")
                .description(
                    "HTTP probe {{ $labels.instance }} returned status {{ $value }}.",
                ),
        )
        .alert(
            alert("BlackboxSslCertificateWillExpireSoon")
                .expr(
                    &days_until_expiry(cert_expiry())
                        .gte(0.0)
                        .lt(CERT_EXPIRY_WARNING_DAYS),
                )
                .severity("warning")
                .summary("TLS certificate will expire soon")
                .description(
                    "TLS certificate of {{ $labels.instance }} expires in {{ $value | humanize }} days.",
                ),
        )
        .alert(
            alert("BlackboxSslCertificateExpired")
                .expr(&days_until_expiry(cert_expiry()).lt(0.0))
                .severity("critical")
                .summary("TLS certificate has expired")
                .description("TLS certificate of {{ $labels.instance }} has expired."),
        );

    let rule = PrometheusRuleBuilder::new(RULES_NAME)
        .namespace(project)
        .labels(labels)
        .annotations(annotations)
        .group(group)
        .build()?;

    Ok(RuleGroupResult::new(rule).component(COMPONENT))
}
