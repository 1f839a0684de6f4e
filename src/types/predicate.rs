use std::fmt;

use super::Value;

/// Comparison operators supported in condition predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A single-argument boolean test over the input value bound to a condition
/// key.
///
/// Two predicates are the same branch in the compiled tree iff they are equal
/// by value: the merge step only shares a path when both the key and the
/// predicate match exactly.
///
/// The input is an `Option` because a key may be missing from the lookup map
/// entirely; the predicate decides whether absence matches. `Compare` fails
/// on a missing key, while [`Predicate::Absent`] requires one.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Compare the input value against a fixed operand.
    Compare { op: CompareOp, value: Value },
    /// Match any present value.
    Exists,
    /// Match only when no value is bound to the key.
    Absent,
}

impl Predicate {
    /// Shorthand for the most common predicate, an equality compare.
    pub fn equals(value: impl Into<Value>) -> Self {
        Predicate::Compare {
            op: CompareOp::Eq,
            value: value.into(),
        }
    }

    /// Build a comparison predicate with an explicit operator.
    pub fn compare(op: CompareOp, value: impl Into<Value>) -> Self {
        Predicate::Compare {
            op,
            value: value.into(),
        }
    }

    /// Test an input value. Total: incompatible types and missing keys simply
    /// fail to match.
    #[must_use]
    pub fn matches(&self, input: Option<&Value>) -> bool {
        match self {
            Predicate::Compare { op, value } => input
                .and_then(|v| v.compare(*op, value))
                .unwrap_or(false),
            Predicate::Exists => input.is_some(),
            Predicate::Absent => input.is_none(),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "="),
            CompareOp::Neq => write!(f, "!="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

/// Renders without the key, so a test step can print as `{key}{predicate}`:
/// `kind=directory`, `size>=1024`, `owner:absent`.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { op, value } => write!(f, "{op}{value}"),
            Predicate::Exists => write!(f, ":exists"),
            Predicate::Absent => write!(f, ":absent"),
        }
    }
}
