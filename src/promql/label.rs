use std::fmt;

/// Comparison applied by a label matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    Equal,
    NotEqual,
    Regexp,
    NotRegexp,
}

impl MatchOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Regexp => "=~",
            Self::NotRegexp => "!~",
        }
    }
}

/// A single `name<op>"value"` selector constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatcher {
    pub name: String,
    pub op: MatchOp,
    pub value: String,
}

impl LabelMatcher {
    pub fn new(name: impl Into<String>, op: MatchOp, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op,
            value: value.into(),
        }
    }
}

impl fmt::Display for LabelMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.op.as_str())?;
        write_quoted(f, &self.value)
    }
}

/// Entry point for building matchers: `label("job").equal("demo-app")`.
pub fn label(name: impl Into<String>) -> LabelName {
    LabelName(name.into())
}

pub struct LabelName(String);

impl LabelName {
    pub fn equal(self, value: impl Into<String>) -> LabelMatcher {
        LabelMatcher::new(self.0, MatchOp::Equal, value)
    }

    pub fn not_equal(self, value: impl Into<String>) -> LabelMatcher {
        LabelMatcher::new(self.0, MatchOp::NotEqual, value)
    }

    pub fn equal_regexp(self, value: impl Into<String>) -> LabelMatcher {
        LabelMatcher::new(self.0, MatchOp::Regexp, value)
    }

    pub fn not_equal_regexp(self, value: impl Into<String>) -> LabelMatcher {
        LabelMatcher::new(self.0, MatchOp::NotRegexp, value)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str("\\n")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}
