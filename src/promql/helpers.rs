//! Shorthands for the query shapes dashboards and rules use over and over.

use super::expr::{AggregateOp, Aggregation, Expr, VectorSelector};
use super::label::LabelMatcher;

/// Range window that lets Perses pick a rate interval matching the scrape interval.
pub const RATE_INTERVAL: &str = "$__rate_interval";

/// `metric{matchers}`
pub fn vector(metric: &str, matchers: impl IntoIterator<Item = LabelMatcher>) -> Expr {
    VectorSelector::new(metric).with_matchers(matchers).into()
}

/// `rate(metric{matchers}[$__rate_interval])`
pub fn rate(metric: &str, matchers: impl IntoIterator<Item = LabelMatcher>) -> Expr {
    rate_over(metric, RATE_INTERVAL, matchers)
}

/// `rate(metric{matchers}[window])`
pub fn rate_over(
    metric: &str,
    window: &str,
    matchers: impl IntoIterator<Item = LabelMatcher>,
) -> Expr {
    let selector = VectorSelector::new(metric)
        .with_matchers(matchers)
        .with_range(window);
    Expr::call("rate", vec![selector.into()])
}

/// `sum by (by) (rate(metric{matchers}[$__rate_interval]))`
pub fn sum_by_rate(
    metric: &str,
    by: &[&str],
    matchers: impl IntoIterator<Item = LabelMatcher>,
) -> Expr {
    Aggregation::new(AggregateOp::Sum, rate(metric, matchers))
        .by(by.iter().copied())
        .into()
}

/// `sum by (by) (metric{matchers})`
pub fn sum_by(metric: &str, by: &[&str], matchers: impl IntoIterator<Item = LabelMatcher>) -> Expr {
    aggregate_by(AggregateOp::Sum, vector(metric, matchers), by)
}

/// `<op> by (by) (expr)`
pub fn aggregate_by(op: AggregateOp, expr: impl Into<Expr>, by: &[&str]) -> Expr {
    Aggregation::new(op, expr).by(by.iter().copied()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promql::label;

    #[test]
    fn test_sum_by_rate() {
        let expr = sum_by_rate(
            "http_requests_total",
            &["code", "method"],
            [label("job").equal("demo-app")],
        );
        assert_eq!(
            expr.to_string(),
            r#"sum by (code, method) (rate(http_requests_total{job="demo-app"}[$__rate_interval]))"#
        );
    }

    #[test]
    fn test_sum_by() {
        let expr = sum_by(
            "http_requests_total",
            &["code"],
            [label("job").equal("demo-app")],
        );
        assert_eq!(
            expr.to_string(),
            r#"sum by (code) (http_requests_total{job="demo-app"})"#
        );
    }

    #[test]
    fn test_vector_without_matchers() {
        assert_eq!(vector("up", []).to_string(), "up");
    }

    #[test]
    fn test_rate_over_fixed_window() {
        assert_eq!(
            rate_over("probe_success", "5m", []).to_string(),
            "rate(probe_success[5m])"
        );
    }
}
