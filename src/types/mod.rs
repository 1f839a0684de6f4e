mod compiler;
mod error;
mod node;
mod predicate;
mod rule;
mod value;

pub use compiler::Compiler;
pub use error::CompileError;
pub use node::DecisionNode;
pub use predicate::{CompareOp, Predicate};
pub use rule::RuleSpec;
pub use value::Value;
