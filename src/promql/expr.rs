use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use super::label::LabelMatcher;

/// Prometheus breaks expressions that do not fit in this many columns.
const MAX_CHARS_PER_LINE: usize = 100;
const INDENT: &str = "  ";

/// A PromQL expression tree.
///
/// Operator precedence is not inferred: wrap a nested binary expression with
/// [`Expr::parenthesize`] when it must bind tighter than its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Vector(VectorSelector),
    Call { func: String, args: Vec<Expr> },
    Aggregate(Aggregation),
    Binary(BinaryExpr),
    Number(f64),
    Paren(Box<Expr>),
}

impl Expr {
    pub fn call(func: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            func: func.into(),
            args,
        }
    }

    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn parenthesize(self) -> Self {
        Self::Paren(Box::new(self))
    }

    pub fn binary(self, op: BinaryOp, rhs: impl Into<Expr>) -> Self {
        Self::Binary(BinaryExpr::new(self, op, rhs))
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Gtr, rhs)
    }

    pub fn gte(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Gte, rhs)
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Lss, rhs)
    }

    pub fn lte(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Lte, rhs)
    }

    pub fn equal(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Eql, rhs)
    }

    pub fn or(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Or, rhs)
    }

    /// Render the expression the way `promtool` formats it, starting at `level`
    /// indentation steps.
    ///
    /// Anything that fits on one line stays on one line. Otherwise calls,
    /// aggregations and parentheses move their operand onto its own indented
    /// lines, and binary operations put the operator on a line between both sides.
    pub fn pretty(&self, level: usize) -> String {
        let indent = INDENT.repeat(level);
        let single = self.to_string();
        if indent.len() + single.len() <= MAX_CHARS_PER_LINE {
            return format!("{}{}", indent, single);
        }

        match self {
            Self::Vector(_) | Self::Number(_) => format!("{}{}", indent, single),
            Self::Paren(inner) => format!("{indent}(\n{}\n{indent})", inner.pretty(level + 1)),
            Self::Call { func, args } => {
                let body = args
                    .iter()
                    .map(|arg| arg.pretty(level + 1))
                    .collect::<Vec<_>>()
                    .join(",\n");
                format!("{indent}{func}(\n{body}\n{indent})")
            }
            Self::Aggregate(agg) => format!(
                "{indent}{}(\n{}\n{indent})",
                agg.head(),
                agg.expr.pretty(level + 1)
            ),
            Self::Binary(bin) => format!(
                "{}\n{indent}{}\n{}",
                bin.lhs.pretty(level),
                bin.operator(),
                bin.rhs.pretty(level)
            ),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector(selector) => fmt::Display::fmt(selector, f),
            Self::Call { func, args } => {
                write!(f, "{}(", func)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(arg, f)?;
                }
                f.write_str(")")
            }
            Self::Aggregate(agg) => write!(f, "{}({})", agg.head(), agg.expr),
            Self::Binary(bin) => write!(f, "{} {} {}", bin.lhs, bin.operator(), bin.rhs),
            Self::Number(value) => write_number(f, *value),
            Self::Paren(inner) => write!(f, "({})", inner),
        }
    }
}

macro_rules! impl_arith {
    ($($trait:ident, $method:ident, $op:expr;)*) => {
        $(
            impl<R: Into<Expr>> $trait<R> for Expr {
                type Output = Expr;

                fn $method(self, rhs: R) -> Expr {
                    self.binary($op, rhs)
                }
            }
        )*
    };
}

impl_arith! {
    Add, add, BinaryOp::Add;
    Sub, sub, BinaryOp::Sub;
    Mul, mul, BinaryOp::Mul;
    Div, div, BinaryOp::Div;
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<VectorSelector> for Expr {
    fn from(selector: VectorSelector) -> Self {
        Self::Vector(selector)
    }
}

impl From<Aggregation> for Expr {
    fn from(agg: Aggregation) -> Self {
        Self::Aggregate(agg)
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        write!(f, "{}", value as i64)
    } else if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        write!(f, "{}", value)
    }
}

/// `metric{matchers}` with an optional `[range]` window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorSelector {
    pub metric: String,
    pub matchers: Vec<LabelMatcher>,
    pub range: Option<String>,
}

impl VectorSelector {
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            matchers: Vec::new(),
            range: None,
        }
    }

    pub fn with_matcher(mut self, matcher: LabelMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn with_matchers(mut self, matchers: impl IntoIterator<Item = LabelMatcher>) -> Self {
        self.matchers.extend(matchers);
        self
    }

    /// Range window, either a duration (`5m`) or a dashboard variable (`$__rate_interval`).
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }
}

impl fmt::Display for VectorSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.metric)?;
        if !self.matchers.is_empty() {
            f.write_str("{")?;
            for (i, matcher) in self.matchers.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                fmt::Display::fmt(matcher, f)?;
            }
            f.write_str("}")?;
        }
        if let Some(range) = &self.range {
            write!(f, "[{}]", range)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

impl AggregateOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
            Self::Count => "count",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub op: AggregateOp,
    pub grouping: Vec<String>,
    pub without: bool,
    pub expr: Box<Expr>,
}

impl Aggregation {
    pub fn new(op: AggregateOp, expr: impl Into<Expr>) -> Self {
        Self {
            op,
            grouping: Vec::new(),
            without: false,
            expr: Box::new(expr.into()),
        }
    }

    pub fn by<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.grouping = labels.into_iter().map(Into::into).collect();
        self.without = false;
        self
    }

    pub fn without<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.grouping = labels.into_iter().map(Into::into).collect();
        self.without = true;
        self
    }

    /// Operator plus grouping clause, e.g. `sum by (code, method) `.
    fn head(&self) -> String {
        if self.grouping.is_empty() && !self.without {
            return self.op.as_str().to_string();
        }
        let keyword = if self.without { "without" } else { "by" };
        format!(
            "{} {} ({}) ",
            self.op.as_str(),
            keyword,
            self.grouping.join(", ")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eql,
    Neq,
    Gtr,
    Gte,
    Lss,
    Lte,
    And,
    Or,
    Unless,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eql => "==",
            Self::Neq => "!=",
            Self::Gtr => ">",
            Self::Gte => ">=",
            Self::Lss => "<",
            Self::Lte => "<=",
            Self::And => "and",
            Self::Or => "or",
            Self::Unless => "unless",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eql | Self::Neq | Self::Gtr | Self::Gte | Self::Lss | Self::Lte
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub return_bool: bool,
}

impl BinaryExpr {
    pub fn new(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Self {
        Self {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
            return_bool: false,
        }
    }

    /// Comparison returns 0/1 instead of filtering. Ignored for non-comparison operators.
    pub fn bool_modifier(mut self) -> Self {
        self.return_bool = self.op.is_comparison();
        self
    }

    fn operator(&self) -> String {
        if self.return_bool {
            format!("{} bool", self.op.as_str())
        } else {
            self.op.as_str().to_string()
        }
    }
}

impl From<BinaryExpr> for Expr {
    fn from(bin: BinaryExpr) -> Self {
        Self::Binary(bin)
    }
}
