use std::collections::HashMap;
use std::hash::Hash;

use crate::{DecisionNode, Value};

/// Walk the tree against one input map.
///
/// Pure and total: no mutation, no allocation, no error channel. A failed
/// predicate fails the whole path it guards; fork branches are tried in
/// stored order and the first match wins.
pub(crate) fn evaluate<'a, K, T>(
    node: &'a DecisionNode<K, T>,
    values: &HashMap<K, Value>,
) -> Option<&'a T>
where
    K: Eq + Hash,
{
    match node {
        DecisionNode::Empty => None,
        DecisionNode::Terminal(target) => Some(target),
        DecisionNode::Test {
            key,
            predicate,
            next,
        } => {
            if predicate.matches(values.get(key)) {
                evaluate(next, values)
            } else {
                None
            }
        }
        DecisionNode::Fork(branches) => branches.iter().find_map(|b| evaluate(b, values)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{CompareOp, Compiler, Predicate, RuleSpec, Value};

    fn input(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, Value> {
        pairs.iter().map(|(k, v)| (*k, Value::from(*v))).collect()
    }

    #[test]
    fn exact_match_ignores_unrelated_keys() {
        let node = Compiler::new()
            .add(
                RuleSpec::new("T1")
                    .with_equals("A", "x")
                    .with_equals("B", "y"),
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            node.evaluate(&input(&[("A", "x"), ("B", "y"), ("C", "z")])),
            Some(&"T1")
        );
        assert_eq!(node.evaluate(&input(&[("A", "x"), ("B", "other")])), None);
    }

    #[test]
    fn shared_prefix_does_not_corrupt_siblings() {
        let node = Compiler::new()
            .add(
                RuleSpec::new("ONE")
                    .with_equals("A", "d")
                    .with_equals("B", "f1"),
            )
            .unwrap()
            .add(
                RuleSpec::new("TWO")
                    .with_equals("A", "d")
                    .with_equals("B", "f2"),
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(node.evaluate(&input(&[("A", "d"), ("B", "f1")])), Some(&"ONE"));
        assert_eq!(node.evaluate(&input(&[("A", "d"), ("B", "f2")])), Some(&"TWO"));
        assert_eq!(node.evaluate(&input(&[("A", "d"), ("B", "other")])), None);
    }

    #[test]
    fn divergent_top_level_fork() {
        let node = Compiler::new()
            .add(RuleSpec::new("ONE").with_equals("A", "d1"))
            .unwrap()
            .add(RuleSpec::new("TWO").with_equals("A", "d2"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(node.evaluate(&input(&[("A", "d1")])), Some(&"ONE"));
        assert_eq!(node.evaluate(&input(&[("A", "d2")])), Some(&"TWO"));
        assert_eq!(node.evaluate(&input(&[("A", "d3")])), None);
    }

    #[test]
    fn missing_key_fails_compare_predicate() {
        let node = Compiler::new()
            .add(RuleSpec::new("T").with_equals("A", "x"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(node.evaluate(&HashMap::new()), None);
    }

    #[test]
    fn absent_predicate_matches_missing_key() {
        let node = Compiler::new()
            .add(
                RuleSpec::new("anon")
                    .with_equals("kind", "request")
                    .with_condition("user", Predicate::Absent),
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(node.evaluate(&input(&[("kind", "request")])), Some(&"anon"));
        assert_eq!(
            node.evaluate(&input(&[("kind", "request"), ("user", "alice")])),
            None
        );
    }

    #[test]
    fn ordered_predicate_on_numeric_value() {
        let node = Compiler::new()
            .add(
                RuleSpec::new("adult")
                    .with_condition("age", Predicate::compare(CompareOp::Gte, 18_i64)),
            )
            .unwrap()
            .build()
            .unwrap();

        let mut values = HashMap::new();
        values.insert("age", Value::Int(21));
        assert_eq!(node.evaluate(&values), Some(&"adult"));

        values.insert("age", Value::Int(12));
        assert_eq!(node.evaluate(&values), None);
    }

    #[test]
    fn fork_first_match_wins() {
        // An exists predicate and an equality predicate on the same key both
        // match; the earlier-registered branch is returned.
        let node = Compiler::new()
            .add(RuleSpec::new("first").with_condition("A", Predicate::Exists))
            .unwrap()
            .add(RuleSpec::new("second").with_equals("A", "x"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(node.evaluate(&input(&[("A", "x")])), Some(&"first"));
    }

    #[test]
    fn repeated_evaluation_is_deterministic() {
        let node = Compiler::new()
            .add(
                RuleSpec::new("T")
                    .with_equals("A", "x")
                    .with_equals("B", "y"),
            )
            .unwrap()
            .build()
            .unwrap();

        let values = input(&[("A", "x"), ("B", "y")]);
        let first = node.evaluate(&values);
        for _ in 0..5 {
            assert_eq!(node.evaluate(&values), first);
        }
    }
}
