//! Text state for the high-score name prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{DEFAULT_PLAYER_NAME, MAX_NAME_LEN};

/// Result of feeding one key to the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// Still editing
    Pending,
    /// Enter pressed; carries the final name (blank becomes the default)
    Submit(String),
    /// Esc or Ctrl-C; the round is recorded under the default name
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct NamePrompt {
    text: String,
}

impl NamePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Name to record: trimmed input, or the default when blank
    pub fn name(&self) -> String {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptEvent {
        if key.kind == KeyEventKind::Release {
            return PromptEvent::Pending;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return PromptEvent::Cancel;
        }
        match key.code {
            KeyCode::Enter => PromptEvent::Submit(self.name()),
            KeyCode::Esc => PromptEvent::Cancel,
            KeyCode::Backspace => {
                self.text.pop();
                PromptEvent::Pending
            }
            KeyCode::Char(c) if !c.is_control() => {
                if self.text.chars().count() < MAX_NAME_LEN {
                    self.text.push(c);
                }
                PromptEvent::Pending
            }
            _ => PromptEvent::Pending,
        }
    }
}
