//! Inline expression extension point
//!
//! Lines, options and commands may declare a count of inline expressions.
//! Each `{i}` placeholder in the resolved text is replaced by the Display
//! form of the value the evaluator produces for index `i`.

use core_types::{DialogueResult, Value};

use crate::state::ExecutionState;

/// Produces the values substituted into `{0}`, `{1}`, ... placeholders
///
/// The evaluator receives the live execution state and may consume values
/// from the stack.
pub trait ExpressionEvaluator {
    /// Evaluate the expression at `index`
    fn evaluate(&mut self, state: &mut ExecutionState, index: usize) -> DialogueResult<Value>;
}

impl<F> ExpressionEvaluator for F
where
    F: FnMut(&mut ExecutionState, usize) -> DialogueResult<Value>,
{
    fn evaluate(&mut self, state: &mut ExecutionState, index: usize) -> DialogueResult<Value> {
        self(state, index)
    }
}

/// Replace `{index}` placeholders with already evaluated values
pub(crate) fn substitute(text: &str, values: &[Value]) -> String {
    let mut output = text.to_string();
    for (index, value) in values.iter().enumerate() {
        output = output.replace(&format!("{{{}}}", index), &value.to_string());
    }
    output
}
