//! Branching menus.

use fabula_core::command::{ChoiceOption, Menu};
use fabula_core::error::ScriptError;
use fabula_core::event::{ChoiceItem, PresentationEvent};
use tracing::debug;

use crate::interpreter::{Flow, Interpreter, Resume};

impl Interpreter<'_> {
    /// Offers the visible options and jumps to the selected target.
    ///
    /// Disabled options are shown but re-prompt when picked. A menu whose
    /// own `when` or `enable` fails is skipped entirely. With nothing
    /// visible the player only acknowledges an `INFO` and the script moves
    /// on.
    pub(crate) fn choose(&mut self, menu: &Menu) -> Result<Flow, ScriptError> {
        if !self.condition_holds(menu.when.as_deref())
            || !self.condition_holds(menu.enable.as_deref())
        {
            debug!("menu skipped by its conditions");
            return Ok(Flow::Continue);
        }

        let visible: Vec<&ChoiceOption> = menu
            .options
            .iter()
            .filter(|option| self.condition_holds(option.when.as_deref()))
            .collect();
        if visible.is_empty() {
            self.emit(PresentationEvent::info("[No available choices]"));
            return Ok(self.await_continue().flow());
        }

        let items: Vec<ChoiceItem> = visible
            .iter()
            .map(|option| ChoiceItem {
                id: option.target.clone(),
                text: option.text.clone(),
                enabled: self.condition_holds(option.enable.as_deref()),
            })
            .collect();
        let valid_ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();
        self.emit(PresentationEvent::Choices { items });

        loop {
            let selected = match self.await_choice(&valid_ids) {
                Resume::Reply(id) => id,
                Resume::Cancelled => {
                    debug!("choice wait cancelled by load");
                    return Ok(Flow::Continue);
                }
                Resume::Disconnected => return Ok(Flow::Disconnected),
            };
            let Some(option) = visible.iter().find(|option| option.target == selected) else {
                continue;
            };
            if self.condition_holds(option.enable.as_deref()) {
                debug!(option = %selected, "choice selected");
                return if self.state.jump_to(&selected) {
                    Ok(Flow::Continue)
                } else {
                    Err(ScriptError::UnknownLabel(selected))
                };
            }
            self.emit(PresentationEvent::info("That option is currently unavailable"));
        }
    }
}
