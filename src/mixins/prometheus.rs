//! Overview dashboard for a Prometheus server.

use super::common::MixinScope;
use crate::dashboard::{DashboardResult, PanelBuilder, PanelGroup, PromQuery};
use crate::error::Result;
use crate::promql::{AggregateOp, aggregate_by, label, rate, sum_by_rate};

pub const COMPONENT: &str = "prometheus";
pub const DASHBOARD_NAME: &str = "prometheus-overview";

pub fn build_prometheus_overview(scope: &MixinScope) -> Result<DashboardResult> {
    let dashboard = scope
        .dashboard(DASHBOARD_NAME, "prometheus_build_info")
        .display_name("Prometheus / Overview")
        .description("Discovery, scraping, storage and query health of Prometheus servers")
        .panel_group(
            PanelGroup::new("Prometheus Stats")
                .panel(
                    PanelBuilder::stat("Build Info")
                        .description("Prometheus version running on each instance")
                        .query(
                            PromQuery::new(&scope.target("prometheus_build_info", []))
                                .series_name_format("{{version}}"),
                        ),
                )
                .panel(
                    PanelBuilder::stat("Target Count")
                        .description("Targets discovered across all scrape pools")
                        .query(PromQuery::new(&aggregate_by(
                            AggregateOp::Sum,
                            scope.target("prometheus_sd_discovered_targets", []),
                            &[],
                        ))),
                ),
        )
        .panel_group(
            PanelGroup::new("Discovery and Scraping").panels_per_line(1).panel(
                PanelBuilder::time_series("Scrape Failures")
                    .description("Scrapes rejected for exceeding limits or for bad samples")
                    .query(
                        PromQuery::new(&sum_by_rate(
                            "prometheus_target_scrapes_exceeded_sample_limit_total",
                            &["job"],
                            scope.target_matchers(),
                        ))
                        .series_name_format("exceeded sample limit: {{job}}"),
                    )
                    .query(
                        PromQuery::new(&sum_by_rate(
                            "prometheus_target_scrapes_sample_duplicate_timestamp_total",
                            &["job"],
                            scope.target_matchers(),
                        ))
                        .series_name_format("duplicate timestamp: {{job}}"),
                    )
                    .query(
                        PromQuery::new(&sum_by_rate(
                            "prometheus_target_scrapes_sample_out_of_order_total",
                            &["job"],
                            scope.target_matchers(),
                        ))
                        .series_name_format("out of order: {{job}}"),
                    ),
            ),
        )
        .panel_group(
            PanelGroup::new("Storage")
                .panel(
                    PanelBuilder::time_series("Head Series")
                        .description("Series held in the in-memory head block")
                        .query(
                            PromQuery::new(&scope.target("prometheus_tsdb_head_series", []))
                                .series_name_format("{{instance}}"),
                        ),
                )
                .panel(
                    PanelBuilder::time_series("Appended Samples")
                        .description("Samples appended to the head block per second")
                        .unit("decimal")
                        .query(
                            PromQuery::new(&rate(
                                "prometheus_tsdb_head_samples_appended_total",
                                scope.target_matchers(),
                            ))
                            .series_name_format("{{instance}}"),
                        ),
                ),
        )
        .panel_group(
            PanelGroup::new("Query").panels_per_line(1).panel(
                PanelBuilder::time_series("Query Duration")
                    .description("90th percentile query engine latency by stage")
                    .unit("seconds")
                    .query(
                        PromQuery::new(&aggregate_by(
                            AggregateOp::Max,
                            scope.target(
                                "prometheus_engine_query_duration_seconds",
                                [label("quantile").equal("0.9")],
                            ),
                            &["slice"],
                        ))
                        .series_name_format("{{slice}}"),
                    ),
            ),
        )
        .build()?;

    Ok(DashboardResult::new(dashboard).component(COMPONENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::model::{PanelQuery, QueryPlugin};

    #[test]
    fn test_overview_layout() {
        let result = build_prometheus_overview(&MixinScope::new("default", "", "")).unwrap();
        assert_eq!(result.component_name(), Some(COMPONENT));

        let dashboard = result.document();
        assert_eq!(dashboard.name(), DASHBOARD_NAME);
        assert_eq!(dashboard.spec.panels.len(), 6);
        assert_eq!(dashboard.spec.layouts.len(), 4);
        assert_eq!(dashboard.spec.panels["1_0"].spec.queries.len(), 3);
    }

    #[test]
    fn test_queries_carry_datasource_and_cluster() {
        let result = build_prometheus_overview(&MixinScope::new("default", "prom", "region"))
            .unwrap();
        let panel = &result.document().spec.panels["3_0"];
        let PanelQuery::TimeSeriesQuery {
            plugin: QueryPlugin::PrometheusTimeSeriesQuery(query),
        } = &panel.spec.queries[0];

        assert!(query.query.contains(r#"region="$cluster""#));
        assert!(query.query.contains(r#"quantile="0.9""#));
        assert_eq!(query.datasource.as_ref().unwrap().name, "prom");
    }
}
