use thiserror::Error;

/// Errors raised while building a decision tree.
///
/// Both kinds surface synchronously at the `add`/`build` call that caused
/// them. Evaluation has no error channel at all: an unmatched input is a
/// normal `None`, never an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("no rules were added; at least one rule is required")]
    EmptyRuleSet,

    #[error("rule for target '{incoming}' conflicts with fully matched rule for target '{existing}'")]
    ConflictingRule { existing: String, incoming: String },
}
