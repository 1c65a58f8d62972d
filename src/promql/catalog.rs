use indexmap::IndexMap;

use super::expr::Expr;
use crate::error::{MixinError, Result};

/// Named query expressions, built once and looked up by identifier.
#[derive(Debug, Clone, Default)]
pub struct QueryCatalog {
    queries: IndexMap<String, Expr>,
}

impl QueryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, expr: impl Into<Expr>) -> Self {
        self.insert(id, expr);
        self
    }

    /// Insert or replace the expression stored under `id`.
    pub fn insert(&mut self, id: impl Into<String>, expr: impl Into<Expr>) {
        self.queries.insert(id.into(), expr.into());
    }

    pub fn get(&self, id: &str) -> Result<&Expr> {
        self.queries
            .get(id)
            .ok_or_else(|| MixinError::UnknownQuery(id.to_string()))
    }

    /// Pretty-printed query text, ready to drop into a panel or rule.
    pub fn pretty(&self, id: &str) -> Result<String> {
        Ok(self.get(id)?.pretty(0))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
