//! Command handlers, one `impl Interpreter` block per command family.

mod dialogue;
mod flow;
mod media;
mod menu;
mod variables;

use fabula_expr::is_satisfied;

use crate::interpreter::Interpreter;

impl Interpreter<'_> {
    /// An absent condition always holds.
    pub(crate) fn condition_holds(&mut self, condition: Option<&str>) -> bool {
        match condition {
            None => true,
            Some(condition) => is_satisfied(condition, &self.state.variables, &mut *self.rng),
        }
    }
}
