//! Overview dashboard for a Perses server.

use super::common::MixinScope;
use crate::dashboard::{DashboardResult, PanelBuilder, PanelGroup, PromQuery};
use crate::error::Result;
use crate::promql::{Expr, LabelMatcher, label, rate, sum_by_rate};

pub const COMPONENT: &str = "perses";
pub const DASHBOARD_NAME: &str = "perses-overview";

pub fn build_perses_overview(scope: &MixinScope) -> Result<DashboardResult> {
    let dashboard = scope
        .dashboard(DASHBOARD_NAME, "perses_build_info")
        .display_name("Perses / Overview")
        .description("Build, HTTP traffic and resource usage of Perses instances")
        .panel_group(
            PanelGroup::new("Perses Stats").panels_per_line(1).panel(
                PanelBuilder::stat("Build Info")
                    .description("Perses version running on each instance")
                    .query(
                        PromQuery::new(&scope.target("perses_build_info", []))
                            .series_name_format("{{version}}"),
                    ),
            ),
        )
        .panel_group(
            PanelGroup::new("HTTP")
                .panel(
                    PanelBuilder::time_series("HTTP Request Rate")
                        .description("Requests per second by handler and method")
                        .unit("requests/sec")
                        .query(
                            PromQuery::new(&sum_rate(scope, &["handler", "method"], []))
                                .series_name_format("{{method}} {{handler}}"),
                        ),
                )
                .panel(
                    PanelBuilder::time_series("HTTP Error Rate")
                        .description("Requests per second answered with a 5xx status")
                        .unit("requests/sec")
                        .query(
                            PromQuery::new(&sum_rate(
                                scope,
                                &["handler", "code"],
                                [label("code").equal_regexp("5..")],
                            ))
                            .series_name_format("{{code}} {{handler}}"),
                        ),
                ),
        )
        .panel_group(
            PanelGroup::new("Resource Usage")
                .panels_per_line(3)
                .panel(
                    PanelBuilder::time_series("Memory Usage")
                        .unit("bytes")
                        .query(
                            PromQuery::new(&scope.target("process_resident_memory_bytes", []))
                                .series_name_format("resident {{instance}}"),
                        )
                        .query(
                            PromQuery::new(&scope.target("go_memstats_heap_alloc_bytes", []))
                                .series_name_format("heap {{instance}}"),
                        ),
                )
                .panel(
                    PanelBuilder::time_series("CPU Usage")
                        .unit("percent-decimal")
                        .query(
                            PromQuery::new(&rate(
                                "process_cpu_seconds_total",
                                scope.target_matchers(),
                            ))
                            .series_name_format("{{instance}}"),
                        ),
                )
                .panel(
                    PanelBuilder::time_series("Goroutines")
                        .query(
                            PromQuery::new(&scope.target("go_goroutines", []))
                                .series_name_format("{{instance}}"),
                        ),
                ),
        )
        .build()?;

    Ok(DashboardResult::new(dashboard).component(COMPONENT))
}

fn sum_rate(
    scope: &MixinScope,
    by: &[&str],
    extra: impl IntoIterator<Item = LabelMatcher>,
) -> Expr {
    let mut matchers = scope.target_matchers();
    matchers.extend(extra);
    sum_by_rate("perses_http_request_total", by, matchers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_layout() {
        let result = build_perses_overview(&MixinScope::new("default", "", "")).unwrap();
        assert_eq!(result.component_name(), Some(COMPONENT));

        let dashboard = result.document();
        assert_eq!(dashboard.name(), DASHBOARD_NAME);
        assert_eq!(dashboard.spec.panels.len(), 6);
        assert_eq!(dashboard.spec.layouts.len(), 3);
        assert_eq!(dashboard.spec.variables.len(), 2);
    }

    #[test]
    fn test_error_rate_query() {
        let scope = MixinScope::new("default", "", "cluster");
        let expr = sum_rate(&scope, &["handler", "code"], [label("code").equal_regexp("5..")]);
        assert_eq!(
            expr.to_string(),
            r#"sum by (handler, code) (rate(perses_http_request_total{job=~"$job",instance=~"$instance",cluster="$cluster",code=~"5.."}[$__rate_interval]))"#
        );
    }
}
