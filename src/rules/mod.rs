//! Prometheus alerting and recording rules.
//!
//! - `PrometheusRuleBuilder`, `RuleGroupBuilder`: chained builders
//! - `AlertBuilder`, `RecordBuilder`: individual rules
//! - `RuleGroupResult`: a rule document tagged with its output component

mod builder;
pub mod model;

pub use builder::{AlertBuilder, PrometheusRuleBuilder, RecordBuilder, RuleGroupBuilder};
pub use model::PrometheusRule;

use crate::output::{ComponentResult, Document};

pub type RuleGroupResult = ComponentResult<PrometheusRule>;

impl Document for PrometheusRule {
    fn document_name(&self) -> &str {
        self.name()
    }
}
