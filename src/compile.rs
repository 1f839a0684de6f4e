use std::fmt;

use crate::types::Predicate;
use crate::{CompileError, DecisionNode};

/// Fold one rule into an existing tree.
///
/// Shared prefixes are detected at `Test` nodes: when the rule still carries
/// an equal predicate for the tested key, that condition is consumed and the
/// merge recurses into the existing continuation. Anywhere the rule diverges
/// it expands into a fresh chain on its own branch, re-testing all of its
/// remaining conditions independently. Both `node` and `remaining` are
/// consumed by value; unchanged subtrees move into the rebuilt parent, so
/// each recursive call owns its own remainder and nothing is aliased.
pub(crate) fn merge<K, T>(
    node: DecisionNode<K, T>,
    target: T,
    mut remaining: Vec<(K, Predicate)>,
) -> Result<DecisionNode<K, T>, CompileError>
where
    K: Eq,
    T: PartialEq + fmt::Display,
{
    match node {
        // Bootstrap: nothing to share with yet.
        DecisionNode::Empty => Ok(expand(target, remaining)),

        DecisionNode::Terminal(existing) => {
            if remaining.is_empty() && existing == target {
                // Exact duplicate of an already registered rule.
                return Ok(DecisionNode::Terminal(existing));
            }
            // Either a different target on an identical path, or an attempt
            // to hang further conditions below a fully matched rule. Fail
            // fast instead of silently shadowing.
            Err(CompileError::ConflictingRule {
                existing: existing.to_string(),
                incoming: target.to_string(),
            })
        }

        DecisionNode::Test {
            key,
            predicate,
            next,
        } => {
            let shared = remaining
                .iter()
                .position(|(k, p)| *k == key && *p == predicate);
            match shared {
                Some(pos) => {
                    // The rule agrees on this step: consume the condition and
                    // continue merging below it.
                    remaining.remove(pos);
                    Ok(DecisionNode::Test {
                        key,
                        predicate,
                        next: Box::new(merge(*next, target, remaining)?),
                    })
                }
                // Divergence (key absent, or same key under a different
                // predicate, or no conditions left): the rule gets its own
                // branch and re-tests everything it still carries.
                None => Ok(DecisionNode::Fork(vec![
                    DecisionNode::Test {
                        key,
                        predicate,
                        next,
                    },
                    expand(target, remaining),
                ])),
            }
        }

        // A fork only ever grows its degree. Merging into an existing branch
        // happens through the Test case alone, never by probing branches.
        DecisionNode::Fork(mut branches) => {
            branches.push(expand(target, remaining));
            Ok(DecisionNode::Fork(branches))
        }
    }
}

/// Expand a rule into a fresh chain of tests in condition insertion order,
/// ending in its terminal. A rule with no conditions is just the terminal.
fn expand<K, T>(target: T, conditions: Vec<(K, Predicate)>) -> DecisionNode<K, T> {
    let mut node = DecisionNode::Terminal(target);
    for (key, predicate) in conditions.into_iter().rev() {
        node = DecisionNode::Test {
            key,
            predicate,
            next: Box::new(node),
        };
    }
    node
}
