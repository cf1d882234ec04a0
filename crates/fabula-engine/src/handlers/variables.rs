//! `set_var` and `roll`.

use fabula_core::event::PresentationEvent;
use fabula_expr::evaluate_with;
use tracing::debug;

use crate::interpreter::Interpreter;

/// Variable a roll writes to when it names none.
pub(crate) const DEFAULT_ROLL_TARGET: &str = "rollResult";

impl Interpreter<'_> {
    pub(crate) fn set_var(&mut self, name: &str, expression: &str) {
        let value = evaluate_with(expression, &self.state.variables, &mut *self.rng);
        debug!(var = name, %value, "variable set");
        self.state.variables.insert(name.to_owned(), value);
    }

    pub(crate) fn roll(&mut self, expression: &str, target: Option<&str>) {
        let value = evaluate_with(expression, &self.state.variables, &mut *self.rng);
        let target = target.unwrap_or(DEFAULT_ROLL_TARGET);
        self.state
            .variables
            .insert(target.to_owned(), value.clone());
        self.emit(PresentationEvent::RollResult {
            expr: expression.to_owned(),
            to: target.to_owned(),
            value,
        });
    }
}
