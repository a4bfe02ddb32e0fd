//! Presentation seam for the chat widget.
//! The widget decides what to show; a Transcript decides how.

use crate::conversation::MenuChoice;
use crate::rich_text::RichText;

/// Capabilities the chat widget needs from whatever draws it.
pub trait Transcript {
    fn append_user(&mut self, text: &str);

    fn append_bot(&mut self, message: &RichText);

    /// Offer the menu entries as choice controls.
    fn render_menu(&mut self, choices: &[MenuChoice]);

    /// Drop the choice controls once one has been taken.
    fn remove_menu(&mut self);

    /// Show the prompt and open a text input under it.
    fn render_text_prompt(&mut self, prompt: &str);

    /// Replace the live suggestions under the text input.
    fn render_suggestions(&mut self, names: &[String]);

    fn clear_input(&mut self);

    fn set_visible(&mut self, visible: bool);
}

/// One rendered transcript item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    User(String),
    Bot(RichText),
    Menu(Vec<MenuChoice>),
    Prompt(String),
}

/// In-memory transcript, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTranscript {
    pub entries: Vec<Entry>,
    pub suggestions: Vec<String>,
    pub input_open: bool,
    pub visible: bool,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    /// Plain text of every bot message, in order.
    pub fn bot_messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                Entry::Bot(m) => Some(m.to_plain()),
                _ => None,
            })
            .collect()
    }

    pub fn menus_on_screen(&self) -> usize {
        self.entries.iter().filter(|e| matches!(e, Entry::Menu(_))).count()
    }

    pub fn has_menu(&self) -> bool {
        self.entries.iter().any(|e| matches!(e, Entry::Menu(_)))
    }
}

impl Transcript for MemoryTranscript {
    fn append_user(&mut self, text: &str) {
        self.entries.push(Entry::User(text.to_string()));
    }

    fn append_bot(&mut self, message: &RichText) {
        self.entries.push(Entry::Bot(message.clone()));
    }

    fn render_menu(&mut self, choices: &[MenuChoice]) {
        self.entries.push(Entry::Menu(choices.to_vec()));
    }

    fn remove_menu(&mut self) {
        self.entries.retain(|e| !matches!(e, Entry::Menu(_)));
    }

    fn render_text_prompt(&mut self, prompt: &str) {
        self.entries.push(Entry::Prompt(prompt.to_string()));
        self.suggestions.clear();
        self.input_open = true;
    }

    fn render_suggestions(&mut self, names: &[String]) {
        self.suggestions = names.to_vec();
    }

    fn clear_input(&mut self) {
        self.suggestions.clear();
        self.input_open = false;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
