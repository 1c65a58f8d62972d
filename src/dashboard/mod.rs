//! Perses dashboard construction.
//!
//! - `DashboardBuilder`, `PanelGroup`, `PanelBuilder`: chained builders
//! - `PromQuery`, `ListVariable`: panel queries and dashboard variables
//! - `DashboardResult`: a dashboard tagged with its output component

mod builder;
pub mod model;

pub use builder::{
    DEFAULT_DURATION, DEFAULT_PANEL_HEIGHT, DEFAULT_PANELS_PER_LINE, DashboardBuilder,
    GRID_COLUMNS, ListVariable, PanelBuilder, PanelGroup, PromQuery,
};
pub use model::Dashboard;

use crate::output::{ComponentResult, Document};

pub type DashboardResult = ComponentResult<Dashboard>;

impl Document for Dashboard {
    fn document_name(&self) -> &str {
        self.name()
    }
}
