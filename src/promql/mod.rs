//! PromQL expression building.
//!
//! - `label`, `LabelMatcher`: selector constraints
//! - `Expr`: expression tree with single-line and pretty rendering
//! - `sum_by_rate`, `sum_by`, ...: helpers for common query shapes
//! - `QueryCatalog`: named expressions shared between panels

mod catalog;
mod expr;
mod helpers;
mod label;

pub use catalog::QueryCatalog;
pub use expr::{AggregateOp, Aggregation, BinaryExpr, BinaryOp, Expr, VectorSelector};
pub use helpers::{
    RATE_INTERVAL, aggregate_by, rate, rate_over, sum_by, sum_by_rate, vector,
};
pub use label::{LabelMatcher, LabelName, MatchOp, label};
