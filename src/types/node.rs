use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::predicate::Predicate;
use super::value::Value;

/// The compiled decision structure: every rule merged so far, with shared
/// condition prefixes collapsed into a single path and divergent rules held
/// as ordered fork branches.
///
/// Produced by [`Compiler::build()`](super::Compiler::build) and immutable
/// from then on. Thread-safe and designed to live behind `Arc`: evaluation
/// takes `&self`, never allocates, and never blocks.
///
/// # Example
///
/// ```
/// use trellis::{Compiler, RuleSpec, Value};
/// use std::collections::HashMap;
///
/// let node = Compiler::new()
///     .add(RuleSpec::new("ONE").with_equals("dir", "d").with_equals("file", "f1"))
///     .unwrap()
///     .add(RuleSpec::new("TWO").with_equals("dir", "d").with_equals("file", "f2"))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let mut input = HashMap::new();
/// input.insert("dir", Value::from("d"));
/// input.insert("file", Value::from("f2"));
/// assert_eq!(node.evaluate(&input), Some(&"TWO"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionNode<K, T> {
    /// Nothing registered yet. Only the compiler's initial state; never
    /// reachable from a built tree.
    Empty,
    /// Every condition on the path here held; return this target.
    Terminal(T),
    /// Test the predicate against the input value bound to `key`. On success
    /// continue into `next`; on failure the lookup at this node fails. There
    /// is no implicit backtracking, alternatives exist only as fork siblings.
    Test {
        key: K,
        predicate: Predicate,
        next: Box<DecisionNode<K, T>>,
    },
    /// Ordered alternatives that disagree on at least one condition,
    /// tried left to right; the first branch that matches wins.
    Fork(Vec<DecisionNode<K, T>>),
}

impl<K: Eq + Hash, T> DecisionNode<K, T> {
    /// Evaluate this tree against a map of input values.
    ///
    /// Returns the target of the first rule whose conditions all hold, or
    /// `None` if no rule matches. A key missing from `values` is handed to
    /// the predicate as absent. Total and non-allocating; "no match" is a
    /// normal outcome, not an error.
    #[must_use]
    pub fn evaluate(&self, values: &HashMap<K, Value>) -> Option<&T> {
        crate::evaluate::evaluate(self, values)
    }
}

impl<K, T> DecisionNode<K, T> {
    /// Number of reachable terminals, i.e. distinct merged rule endpoints.
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        match self {
            DecisionNode::Empty => 0,
            DecisionNode::Terminal(_) => 1,
            DecisionNode::Test { next, .. } => next.terminal_count(),
            DecisionNode::Fork(branches) => branches.iter().map(Self::terminal_count).sum(),
        }
    }

    /// Longest condition path through the tree: the worst-case number of
    /// predicate tests a single lookup can perform down one branch.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        match self {
            DecisionNode::Empty | DecisionNode::Terminal(_) => 0,
            DecisionNode::Test { next, .. } => 1 + next.max_depth(),
            DecisionNode::Fork(branches) => {
                branches.iter().map(Self::max_depth).max().unwrap_or(0)
            }
        }
    }
}

/// Deterministic diagnostic rendering: same structure, same string.
///
/// A test chain renders as `key=test & key2=test2 -> target`; fork branches
/// render parenthesized and joined with `" | "`; the empty tree renders as
/// the empty string. Presentation only, not meant to be parsed back.
impl<K: fmt::Display, T: fmt::Display> fmt::Display for DecisionNode<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionNode::Empty => Ok(()),
            DecisionNode::Terminal(target) => write!(f, "-> {target}"),
            DecisionNode::Test {
                key,
                predicate,
                next,
            } => {
                write!(f, "{key}{predicate}")?;
                match next.as_ref() {
                    DecisionNode::Empty => Ok(()),
                    DecisionNode::Terminal(target) => write!(f, " -> {target}"),
                    other => write!(f, " & {other}"),
                }
            }
            DecisionNode::Fork(branches) => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "({branch})")?;
                }
                Ok(())
            }
        }
    }
}
