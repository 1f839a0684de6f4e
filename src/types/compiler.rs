use std::fmt;
use std::mem;

use super::error::CompileError;
use super::node::DecisionNode;
use super::rule::RuleSpec;

/// Builder that folds [`RuleSpec`]s one at a time into a shared
/// [`DecisionNode`] tree.
///
/// Single-writer: all `add` calls happen on one owner during the build
/// phase, and [`build()`](Self::build) is the only way to get the tree out.
/// The order rules are added in may change the tree's shape (how much
/// prefix sharing occurs) but never changes the result of any lookup.
///
/// # Example
///
/// ```
/// use trellis::{Compiler, RuleSpec, Value};
/// use std::collections::HashMap;
///
/// let node = Compiler::new()
///     .add(RuleSpec::new("dir").with_equals("kind", "directory"))
///     .unwrap()
///     .add(RuleSpec::new("file").with_equals("kind", "regular"))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let mut input = HashMap::new();
/// input.insert("kind", Value::from("regular"));
/// assert_eq!(node.evaluate(&input), Some(&"file"));
/// ```
#[derive(Debug)]
pub struct Compiler<K, T> {
    root: DecisionNode<K, T>,
}

impl<K, T> Compiler<K, T>
where
    K: Eq,
    T: PartialEq + fmt::Display,
{
    /// Create a compiler with no rules registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DecisionNode::Empty,
        }
    }

    /// Merge one rule into the current tree.
    ///
    /// Rules sharing a condition prefix with an existing path extend it;
    /// rules that diverge fork into a new branch. Re-adding a rule that is
    /// an exact duplicate (same conditions, same target) is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::ConflictingRule`] if the rule reaches an
    /// already-realized terminal it cannot legally extend or replace: an
    /// identical condition path with a different target, or extra conditions
    /// past a rule that already matched completely.
    pub fn add(mut self, rule: RuleSpec<K, T>) -> Result<Self, CompileError> {
        let root = mem::replace(&mut self.root, DecisionNode::Empty);
        self.root = crate::compile::merge(root, rule.target, rule.conditions)?;
        Ok(self)
    }

    /// Freeze the tree and hand it to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::EmptyRuleSet`] if no rule was ever added.
    pub fn build(self) -> Result<DecisionNode<K, T>, CompileError> {
        match self.root {
            DecisionNode::Empty => Err(CompileError::EmptyRuleSet),
            node => Ok(node),
        }
    }
}

impl<K, T> Default for Compiler<K, T>
where
    K: Eq,
    T: PartialEq + fmt::Display,
{
    fn default() -> Self {
        Self::new()
    }
}
