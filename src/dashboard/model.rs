//! Serializable Perses dashboard documents (`kind: Dashboard`, v1 schema).

use std::collections::BTreeMap;

use serde::Serialize;

pub const PROMETHEUS_DATASOURCE_KIND: &str = "PrometheusDatasource";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub kind: &'static str,
    pub metadata: ProjectMetadata,
    pub spec: DashboardSpec,
}

impl Dashboard {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSpec {
    pub display: Display,
    pub duration: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,
    /// Keyed `<group>_<panel>`; sorted the same way the writer emits them.
    pub panels: BTreeMap<String, Panel>,
    pub layouts: Vec<Layout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Display {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub kind: &'static str,
    pub spec: PanelSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSpec {
    pub display: Display,
    pub plugin: ChartPlugin,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<PanelQuery>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "spec")]
pub enum ChartPlugin {
    TimeSeriesChart(TimeSeriesChartSpec),
    StatChart(StatChartSpec),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesChartSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<YAxis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: &'static str,
    pub mode: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    pub format: UnitFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatChartSpec {
    pub calculation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<UnitFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitFormat {
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "spec")]
pub enum PanelQuery {
    TimeSeriesQuery { plugin: QueryPlugin },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "spec")]
pub enum QueryPlugin {
    PrometheusTimeSeriesQuery(PrometheusQuerySpec),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusQuerySpec {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_name_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DatasourceSelector>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasourceSelector {
    pub kind: &'static str,
    pub name: String,
}

impl DatasourceSelector {
    pub fn prometheus(name: impl Into<String>) -> Self {
        Self {
            kind: PROMETHEUS_DATASOURCE_KIND,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub kind: &'static str,
    pub spec: GridSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<GridDisplay>,
    pub items: Vec<GridItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridDisplay {
    pub title: String,
    pub collapse: Collapse,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collapse {
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridItem {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub content: PanelRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRef {
    #[serde(rename = "$ref")]
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "spec")]
pub enum Variable {
    ListVariable(ListVariableSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVariableSpec {
    pub name: String,
    pub display: VariableDisplay,
    pub allow_all_value: bool,
    pub allow_multiple: bool,
    pub plugin: VariablePlugin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDisplay {
    pub name: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "spec")]
pub enum VariablePlugin {
    PrometheusLabelValuesVariable(LabelValuesSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelValuesSpec {
    pub label_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matchers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DatasourceSelector>,
}
