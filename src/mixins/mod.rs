//! Ready-made dashboards and rules for the supported exporters.
//!
//! - `perses`, `prometheus`, `blackbox`: overview dashboards scoped by `MixinScope`
//! - `demo_app`: demo application dashboard built from a `QueryCatalog`
//! - `blackbox_rules`: Blackbox Exporter alerting rules

pub mod blackbox;
pub mod blackbox_rules;
mod common;
pub mod demo_app;
pub mod perses;
pub mod prometheus;

pub use blackbox::build_blackbox_exporter;
pub use blackbox_rules::build_blackbox_rules;
pub use common::{CLUSTER_VARIABLE, MixinScope};
pub use demo_app::{build_demo_app_dashboard, demo_app_queries};
pub use perses::build_perses_overview;
pub use prometheus::build_prometheus_overview;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::output::ArtifactWriter;

/// Register every dashboard with `dashboards` and every rule document with `rules`.
pub fn register_all(
    config: &GeneratorConfig,
    dashboards: &mut ArtifactWriter,
    rules: &mut ArtifactWriter,
) -> Result<()> {
    rules.add(build_blackbox_rules(
        &config.project,
        blackbox_rules::default_labels(),
        BTreeMap::new(),
        &config.dashboard_url,
    )?)?;

    let scope = MixinScope::from_config(config);
    dashboards.add(build_perses_overview(&scope)?)?;
    dashboards.add(build_prometheus_overview(&scope)?)?;
    dashboards.add(build_blackbox_exporter(&scope)?)?;
    dashboards.add(build_demo_app_dashboard(
        &config.project,
        &config.datasource,
        &demo_app_queries(),
    )?)?;

    debug!(
        dashboards = dashboards.registry().len(),
        rules = rules.registry().len(),
        "Registered mixins"
    );
    Ok(())
}
