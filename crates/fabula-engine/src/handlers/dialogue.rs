//! `say` and `input`.

use std::sync::LazyLock;

use fabula_core::event::PresentationEvent;
use fabula_core::state::Variables;
use fabula_core::value::Value;
use regex::{Captures, Regex};

use crate::interpreter::{Flow, Interpreter, Resume};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder regex must compile"));

/// Replaces `{name}` with the bound variable. Unbound names are left as
/// written.
pub(crate) fn interpolate(text: &str, variables: &Variables) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            variables
                .get(&caps[1])
                .map_or_else(|| caps[0].to_owned(), ToString::to_string)
        })
        .into_owned()
}

impl Interpreter<'_> {
    pub(crate) fn say(&mut self, text: &str, speaker: Option<&str>) -> Flow {
        self.emit(PresentationEvent::ShowText {
            text: interpolate(text, &self.state.variables),
            speaker: speaker.map(str::to_owned),
        });
        self.await_continue().flow()
    }

    pub(crate) fn input(&mut self, var: &str, prompt: Option<&str>) -> Flow {
        let prompt = prompt
            .filter(|prompt| !prompt.is_empty())
            .map_or_else(|| format!("Enter {var}: "), str::to_owned);
        self.emit(PresentationEvent::InputRequest {
            prompt: prompt.clone(),
            var: var.to_owned(),
        });

        let resume = self.await_text(&prompt);
        if let Resume::Reply(raw) = &resume {
            self.state
                .variables
                .insert(var.to_owned(), Value::from_input(raw));
        }
        resume.flow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_substitutes_bound_names_only() {
        // Arrange
        let mut vars = Variables::new();
        vars.insert("name".to_owned(), Value::from("Mara"));
        vars.insert("gold".to_owned(), Value::Int(12));

        // Act
        let text = interpolate("{name} has {gold} gold and {silver} silver", &vars);

        // Assert
        assert_eq!(text, "Mara has 12 gold and {silver} silver");
    }

    #[test]
    fn test_interpolate_leaves_non_identifier_braces() {
        let vars = Variables::new();

        assert_eq!(interpolate("{ spaced } {}", &vars), "{ spaced } {}");
    }
}
