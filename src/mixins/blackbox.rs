//! Blackbox Exporter probe dashboard.

use super::common::MixinScope;
use crate::dashboard::{DashboardResult, PanelBuilder, PanelGroup, PromQuery};
use crate::error::Result;
use crate::promql::{Expr, vector};

pub const COMPONENT: &str = "blackbox-exporter";
pub const DASHBOARD_NAME: &str = "blackbox-exporter";

const SECONDS_PER_DAY: f64 = 86400.0;

pub fn build_blackbox_exporter(scope: &MixinScope) -> Result<DashboardResult> {
    let dashboard = scope
        .dashboard(DASHBOARD_NAME, "probe_success")
        .display_name("Blackbox Exporter")
        .description("Availability, latency and TLS state of Blackbox Exporter probes")
        .panel_group(
            PanelGroup::new("Probe Status")
                .panel(
                    PanelBuilder::stat("Probe Success")
                        .description("Share of probes that succeeded")
                        .unit("percent-decimal")
                        .query(PromQuery::new(&scope.target("probe_success", []))),
                )
                .panel(
                    PanelBuilder::stat("HTTP Status Code")
                        .description("Status code of the last HTTP probe")
                        .query(
                            PromQuery::new(&scope.target("probe_http_status_code", []))
                                .series_name_format("{{instance}}"),
                        ),
                ),
        )
        .panel_group(
            PanelGroup::new("Probe Timing")
                .panel(
                    PanelBuilder::time_series("Probe Duration")
                        .description("Time taken by each probe")
                        .unit("seconds")
                        .query(
                            PromQuery::new(&scope.target("probe_duration_seconds", []))
                                .series_name_format("{{instance}}"),
                        ),
                )
                .panel(
                    PanelBuilder::time_series("DNS Lookup Time")
                        .description("Time spent resolving the probe target")
                        .unit("seconds")
                        .query(
                            PromQuery::new(&scope.target("probe_dns_lookup_time_seconds", []))
                                .series_name_format("{{instance}}"),
                        ),
                ),
        )
        .panel_group(
            PanelGroup::new("TLS").panels_per_line(1).panel(
                PanelBuilder::stat("TLS Certificate Expiry")
                    .description("Days until the earliest certificate in the chain expires")
                    .unit("days")
                    .query(
                        PromQuery::new(&days_until_expiry(scope.target(
                            "probe_ssl_earliest_cert_expiry",
                            [],
                        )))
                        .series_name_format("{{instance}}"),
                    ),
            ),
        )
        .build()?;

    Ok(DashboardResult::new(dashboard).component(COMPONENT))
}

/// `(expiry - time()) / 86400`
pub(crate) fn days_until_expiry(expiry: Expr) -> Expr {
    (expiry - Expr::call("time", vec![])).parenthesize() / SECONDS_PER_DAY
}

/// Unscoped expiry selector for alerting rules.
pub(crate) fn cert_expiry() -> Expr {
    vector("probe_ssl_earliest_cert_expiry", [])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_layout() {
        let result = build_blackbox_exporter(&MixinScope::new("default", "", "")).unwrap();
        assert_eq!(result.component_name(), Some(COMPONENT));

        let dashboard = result.document();
        assert_eq!(dashboard.name(), DASHBOARD_NAME);
        assert_eq!(dashboard.spec.panels.len(), 5);
        assert_eq!(dashboard.spec.duration, "1h");
    }

    #[test]
    fn test_days_until_expiry() {
        assert_eq!(
            days_until_expiry(cert_expiry()).to_string(),
            "(probe_ssl_earliest_cert_expiry - time()) / 86400"
        );
    }
}
