pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod mixins;
pub mod output;
pub mod promql;
pub mod rules;
pub mod utils;

pub use config::{GeneratorConfig, OutputTarget};
pub use dashboard::{DashboardBuilder, DashboardResult};
pub use error::{MixinError, Result};
pub use mixins::{MixinScope, register_all};
pub use output::{Artifact, ArtifactRegistry, ArtifactWriter, IntoArtifact, OutputFormat};
pub use promql::{Expr, QueryCatalog};
pub use rules::{PrometheusRuleBuilder, RuleGroupResult};
