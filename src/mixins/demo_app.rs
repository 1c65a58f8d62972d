//! Dashboard for the demo application, driven by a shared query catalog.

use std::time::Duration;

use crate::dashboard::{DashboardBuilder, DashboardResult, PanelBuilder, PanelGroup, PromQuery};
use crate::error::Result;
use crate::promql::{QueryCatalog, label, sum_by, sum_by_rate, vector};

pub const COMPONENT: &str = "demo-app";
pub const DASHBOARD_NAME: &str = "demo-app";

pub const REQUEST_RATE: &str = "DemoAppRequestRate";
pub const TOTAL_REQUESTS_BY_CODE: &str = "DemoAppTotalRequestsByCode";
pub const VERSION: &str = "DemoAppVersion";
pub const UPTIME: &str = "DemoAppUptime";

const JOB: &str = "demo-app";

pub fn demo_app_queries() -> QueryCatalog {
    QueryCatalog::new()
        .with(
            REQUEST_RATE,
            sum_by_rate(
                "http_requests_total",
                &["code", "method"],
                [label("job").equal(JOB)],
            ),
        )
        .with(
            TOTAL_REQUESTS_BY_CODE,
            sum_by("http_requests_total", &["code"], [label("job").equal(JOB)]),
        )
        .with(VERSION, vector("version", [label("job").equal(JOB)]))
        .with(UPTIME, vector("up", [label("job").equal(JOB)]))
}

pub fn build_demo_app_dashboard(
    project: &str,
    datasource: &str,
    queries: &QueryCatalog,
) -> Result<DashboardResult> {
    let panel = |name: &str, description: &str, query: &str, legend: &str| -> Result<PanelBuilder> {
        Ok(PanelBuilder::time_series(name)
            .description(description)
            .query(PromQuery::new(queries.get(query)?).series_name_format(legend)))
    };

    let dashboard = DashboardBuilder::new(DASHBOARD_NAME)
        .project(project)
        .datasource(datasource)
        .duration(Duration::from_secs(15 * 60))
        .panel_group(
            PanelGroup::new("Demo App")
                .panels_per_line(2)
                .panel(panel(
                    "HTTP Request Rate",
                    "HTTP Request Rate",
                    REQUEST_RATE,
                    "{{code}} - {{method}}",
                )?)
                .panel(panel(
                    "HTTP Requests by Status Code",
                    "HTTP Requests by Status Code",
                    TOTAL_REQUESTS_BY_CODE,
                    "Status {{code}}",
                )?)
                .panel(panel(
                    "App Uptime",
                    "Application availability status",
                    UPTIME,
                    "Status",
                )?)
                .panel(panel(
                    "App Version",
                    "App Version",
                    VERSION,
                    "Version {{version}}",
                )?),
        )
        .build()?;

    Ok(DashboardResult::new(dashboard).component(COMPONENT))
}
