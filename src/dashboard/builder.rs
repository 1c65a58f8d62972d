//! Chained builders producing [`Dashboard`] documents.

use std::collections::BTreeMap;
use std::time::Duration;

use super::model::{
    ChartPlugin, Collapse, Dashboard, DashboardSpec, DatasourceSelector, Display, GridDisplay,
    GridItem, GridSpec, LabelValuesSpec, Layout, Legend, ListVariableSpec, Panel, PanelQuery,
    PanelRef, PanelSpec, ProjectMetadata, PrometheusQuerySpec, QueryPlugin, StatChartSpec,
    TimeSeriesChartSpec, UnitFormat, Variable, VariableDisplay, VariablePlugin, YAxis,
};
use crate::error::{MixinError, Result};
use crate::promql::Expr;
use crate::utils::{format_duration, is_valid_resource_name};

/// Perses lays grids out on 24 columns.
pub const GRID_COLUMNS: u32 = 24;
pub const DEFAULT_PANEL_HEIGHT: u32 = 6;
pub const DEFAULT_PANELS_PER_LINE: u32 = 2;
pub const DEFAULT_DURATION: Duration = Duration::from_secs(3600);

pub struct DashboardBuilder {
    name: String,
    project: String,
    display_name: Option<String>,
    description: Option<String>,
    duration: Duration,
    datasource: Option<String>,
    variables: Vec<ListVariable>,
    groups: Vec<PanelGroup>,
}

impl DashboardBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project: String::new(),
            display_name: None,
            description: None,
            duration: DEFAULT_DURATION,
            datasource: None,
            variables: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Human-facing name; defaults to the dashboard name.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Datasource for every query and variable that does not name its own.
    /// An empty name keeps the project's default datasource.
    pub fn datasource(mut self, datasource: impl Into<String>) -> Self {
        let datasource = datasource.into();
        self.datasource = (!datasource.is_empty()).then_some(datasource);
        self
    }

    pub fn variable(mut self, variable: ListVariable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn variables(mut self, variables: impl IntoIterator<Item = ListVariable>) -> Self {
        self.variables.extend(variables);
        self
    }

    pub fn panel_group(mut self, group: PanelGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn build(self) -> Result<Dashboard> {
        if !is_valid_resource_name(&self.name) {
            return Err(MixinError::invalid_artifact(
                "dashboard name",
                &self.name,
                "must match [A-Za-z0-9_.-]+",
            ));
        }
        if !is_valid_resource_name(&self.project) {
            return Err(MixinError::invalid_artifact(
                "project",
                &self.project,
                "must match [A-Za-z0-9_.-]+",
            ));
        }

        let datasource = self.datasource.as_deref();
        let mut panels = BTreeMap::new();
        let mut layouts = Vec::with_capacity(self.groups.len());

        for (group_index, group) in self.groups.into_iter().enumerate() {
            layouts.push(group.layout(group_index, datasource, &mut panels)?);
        }

        let variables = self
            .variables
            .into_iter()
            .map(|v| v.build(datasource))
            .collect();

        Ok(Dashboard {
            kind: "Dashboard",
            metadata: ProjectMetadata {
                name: self.name.clone(),
                project: self.project,
            },
            spec: DashboardSpec {
                display: Display {
                    name: self.display_name.unwrap_or(self.name),
                    description: self.description,
                },
                duration: format_duration(self.duration),
                variables,
                panels,
                layouts,
            },
        })
    }
}

/// A titled row of panels, rendered as one grid layout.
pub struct PanelGroup {
    title: String,
    panels_per_line: u32,
    panel_height: u32,
    open: bool,
    panels: Vec<PanelBuilder>,
}

impl PanelGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            panels_per_line: DEFAULT_PANELS_PER_LINE,
            panel_height: DEFAULT_PANEL_HEIGHT,
            open: true,
            panels: Vec::new(),
        }
    }

    pub fn panels_per_line(mut self, count: u32) -> Self {
        self.panels_per_line = count;
        self
    }

    pub fn panel_height(mut self, height: u32) -> Self {
        self.panel_height = height;
        self
    }

    pub fn collapsed(mut self) -> Self {
        self.open = false;
        self
    }

    pub fn panel(mut self, panel: PanelBuilder) -> Self {
        self.panels.push(panel);
        self
    }

    fn layout(
        self,
        group_index: usize,
        datasource: Option<&str>,
        panels: &mut BTreeMap<String, Panel>,
    ) -> Result<Layout> {
        if self.panels_per_line == 0 || self.panels_per_line > GRID_COLUMNS {
            return Err(MixinError::Config(format!(
                "panel group '{}': panels_per_line must be between 1 and {}",
                self.title, GRID_COLUMNS
            )));
        }
        if self.panel_height == 0 {
            return Err(MixinError::Config(format!(
                "panel group '{}': panel_height must be greater than 0",
                self.title
            )));
        }

        let width = GRID_COLUMNS / self.panels_per_line;
        let mut items = Vec::with_capacity(self.panels.len());

        for (panel_index, panel) in self.panels.into_iter().enumerate() {
            let key = format!("{}_{}", group_index, panel_index);
            let slot = panel_index as u32;
            items.push(GridItem {
                x: (slot % self.panels_per_line) * width,
                y: (slot / self.panels_per_line) * self.panel_height,
                width,
                height: self.panel_height,
                content: PanelRef {
                    reference: format!("#/spec/panels/{}", key),
                },
            });
            panels.insert(key, panel.build(datasource));
        }

        Ok(Layout {
            kind: "Grid",
            spec: GridSpec {
                display: Some(GridDisplay {
                    title: self.title,
                    collapse: Collapse { open: self.open },
                }),
                items,
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartKind {
    TimeSeries,
    Stat,
}

pub struct PanelBuilder {
    name: String,
    description: Option<String>,
    chart: ChartKind,
    unit: Option<String>,
    queries: Vec<PromQuery>,
}

impl PanelBuilder {
    pub fn time_series(name: impl Into<String>) -> Self {
        Self::new(name, ChartKind::TimeSeries)
    }

    pub fn stat(name: impl Into<String>) -> Self {
        Self::new(name, ChartKind::Stat)
    }

    fn new(name: impl Into<String>, chart: ChartKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            chart,
            unit: None,
            queries: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Display unit, e.g. `bytes`, `seconds`, `percent-decimal`.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn query(mut self, query: PromQuery) -> Self {
        self.queries.push(query);
        self
    }

    fn build(self, datasource: Option<&str>) -> Panel {
        let show_legend = self.queries.len() > 1 || self.has_series_names();
        let format = self.unit.map(|unit| UnitFormat { unit });
        let plugin = match self.chart {
            ChartKind::TimeSeries => ChartPlugin::TimeSeriesChart(TimeSeriesChartSpec {
                legend: show_legend.then_some(Legend {
                    position: "bottom",
                    mode: "list",
                }),
                y_axis: format.map(|format| YAxis { format }),
            }),
            ChartKind::Stat => ChartPlugin::StatChart(StatChartSpec {
                calculation: "last-number",
                format,
            }),
        };

        Panel {
            kind: "Panel",
            spec: PanelSpec {
                display: Display {
                    name: self.name,
                    description: self.description,
                },
                plugin,
                queries: self
                    .queries
                    .into_iter()
                    .map(|q| q.build(datasource))
                    .collect(),
            },
        }
    }

    fn has_series_names(&self) -> bool {
        self.queries.iter().any(|q| q.series_name_format.is_some())
    }
}

/// A Prometheus time-series query attached to a panel.
#[derive(Debug, Clone)]
pub struct PromQuery {
    query: String,
    series_name_format: Option<String>,
    datasource: Option<String>,
}

impl PromQuery {
    /// Query text from an expression, pretty-printed.
    pub fn new(expr: &Expr) -> Self {
        Self::raw(expr.pretty(0))
    }

    pub fn raw(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            series_name_format: None,
            datasource: None,
        }
    }

    /// Legend template such as `{{code}} - {{method}}`.
    pub fn series_name_format(mut self, format: impl Into<String>) -> Self {
        self.series_name_format = Some(format.into());
        self
    }

    pub fn datasource(mut self, datasource: impl Into<String>) -> Self {
        self.datasource = Some(datasource.into());
        self
    }

    fn build(self, default_datasource: Option<&str>) -> PanelQuery {
        let datasource = self
            .datasource
            .as_deref()
            .or(default_datasource)
            .map(DatasourceSelector::prometheus);

        PanelQuery::TimeSeriesQuery {
            plugin: QueryPlugin::PrometheusTimeSeriesQuery(PrometheusQuerySpec {
                query: self.query,
                series_name_format: self.series_name_format,
                datasource,
            }),
        }
    }
}

/// Dashboard variable listing the values of one Prometheus label.
#[derive(Debug, Clone)]
pub struct ListVariable {
    name: String,
    label: String,
    display_name: Option<String>,
    matchers: Vec<String>,
    allow_all: bool,
    allow_multiple: bool,
    hidden: bool,
}

impl ListVariable {
    /// Variable `name` over the values of the label of the same name.
    pub fn label_values(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            display_name: None,
            matchers: Vec::new(),
            allow_all: false,
            allow_multiple: false,
            hidden: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Series selector restricting the values offered, e.g. `up{job=~"$job"}`.
    pub fn matcher(mut self, selector: &Expr) -> Self {
        self.matchers.push(selector.to_string());
        self
    }

    pub fn allow_all(mut self) -> Self {
        self.allow_all = true;
        self
    }

    pub fn allow_multiple(mut self) -> Self {
        self.allow_multiple = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    fn build(self, datasource: Option<&str>) -> Variable {
        Variable::ListVariable(ListVariableSpec {
            display: VariableDisplay {
                name: self.display_name.unwrap_or_else(|| self.name.clone()),
                hidden: self.hidden,
            },
            name: self.name,
            allow_all_value: self.allow_all,
            allow_multiple: self.allow_multiple,
            plugin: VariablePlugin::PrometheusLabelValuesVariable(LabelValuesSpec {
                label_name: self.label,
                matchers: self.matchers,
                datasource: datasource.map(DatasourceSelector::prometheus),
            }),
        })
    }
}
