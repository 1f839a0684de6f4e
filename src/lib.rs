mod compile;
mod evaluate;
mod types;

pub use types::{CompareOp, CompileError, Compiler, DecisionNode, Predicate, RuleSpec, Value};
