use super::predicate::Predicate;
use super::value::Value;

/// An immutable description of one rule: a target value plus an ordered set
/// of named conditions that must all hold for the target to be selected.
///
/// Conditions keep insertion order, which fixes the shape (and the rendered
/// form) of the compiled tree but never affects which target a lookup
/// returns. Builder methods consume `self`; clone a partially built spec to
/// reuse it as a shared prefix:
///
/// ```
/// use trellis::RuleSpec;
///
/// let base = RuleSpec::new("readable").with_equals("kind", "file");
/// let hidden = base.clone().with_equals("hidden", true);
/// let plain = base.with_equals("hidden", false);
/// # let _ = (hidden, plain);
/// ```
#[derive(Debug, Clone)]
pub struct RuleSpec<K, T> {
    pub(crate) target: T,
    pub(crate) conditions: Vec<(K, Predicate)>,
}

impl<K: PartialEq, T> RuleSpec<K, T> {
    /// Start a rule with its target and no conditions.
    #[must_use]
    pub fn new(target: T) -> Self {
        Self {
            target,
            conditions: Vec::new(),
        }
    }

    /// Add a condition. Re-adding an existing key overwrites its predicate
    /// in place, keeping the key's original position.
    #[must_use]
    pub fn with_condition(mut self, key: K, predicate: Predicate) -> Self {
        match self.conditions.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = predicate,
            None => self.conditions.push((key, predicate)),
        }
        self
    }

    /// Sugar for the common case of an equality condition.
    #[must_use]
    pub fn with_equals(self, key: K, value: impl Into<Value>) -> Self {
        self.with_condition(key, Predicate::equals(value))
    }

    /// The target returned when every condition of this rule holds.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The conditions in insertion order.
    #[must_use]
    pub fn conditions(&self) -> &[(K, Predicate)] {
        &self.conditions
    }
}
