//! Interactive confirm/alert prompts.
//!
//! Controllers ask for confirmation and report outcomes through [`Dialogs`]
//! so the same flows run against the terminal or a scripted stand-in.

/// Blocking user prompts
pub trait Dialogs {
    /// Ask a yes/no question; true means go ahead
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a message and wait for it to be acknowledged
    fn alert(&mut self, message: &str);
}

/// Prompts answered from a fixed script, recording everything shown.
///
/// Used when no interactive terminal is attached and in tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    /// Answer given to every confirmation
    pub answer: bool,
    /// Confirmation questions asked, in order
    pub confirms: Vec<String>,
    /// Alerts shown, in order
    pub alerts: Vec<String>,
}

impl ScriptedDialogs {
    /// Confirms everything
    pub fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    /// Declines everything
    pub fn declining() -> Self {
        Self::default()
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.answer
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
