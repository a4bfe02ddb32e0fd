//! Line-oriented terminal front end for the chat widget.

use std::io::{self, Write};
use std::sync::Arc;

use crate::catalogue::{Catalogue, Level, TechnologyRecord};
use crate::conversation::MenuChoice;
use crate::rich_text::RichText;
use crate::search::{CategoryFilter, CursorAction, FilterViewState, NavKey, SuggestionCursor};
use crate::tradeoffs;
use crate::transcript::Transcript;

/// Writes the transcript to stdout as plain text.
#[derive(Debug, Default)]
pub struct TerminalTranscript {
    visible: bool,
}

impl TerminalTranscript {
    pub fn new() -> Self {
        Self { visible: true }
    }

    fn emit(&self, text: &str) {
        if !self.visible {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

impl Transcript for TerminalTranscript {
    fn append_user(&mut self, text: &str) {
        self.emit(&format!("you> {text}"));
    }

    fn append_bot(&mut self, message: &RichText) {
        self.emit(&format!("bot> {}", message.to_plain().trim_end()));
    }

    fn render_menu(&mut self, choices: &[MenuChoice]) {
        for choice in choices {
            self.emit(&format!("     [{choice}]"));
        }
    }

    fn remove_menu(&mut self) {}

    fn render_text_prompt(&mut self, prompt: &str) {
        self.emit(&format!("bot> {prompt}"));
        self.emit("     (type a name, or ?prefix for suggestions)");
    }

    fn render_suggestions(&mut self, names: &[String]) {
        if names.is_empty() {
            self.emit("     (no suggestions)");
        } else {
            self.emit(&format!("     suggestions: {}", names.join(" | ")));
        }
    }

    fn clear_input(&mut self) {}

    fn set_visible(&mut self, visible: bool) {
        if !visible {
            self.emit("(chat closed, :open to reopen)");
        }
        self.visible = visible;
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Choose(MenuChoice),
    Suggest(String),
    /// Enter on an empty line: take the suggestions as listed.
    Enter,
    Submit(String),
    Open,
    Close,
    Quit,
    /// Main page search box. Empty text clears the search.
    Search(String),
    /// Keyboard navigation over the search-box suggestions.
    Nav(NavKey),
    /// Filter button by label (`all`, `technologies`, ...).
    Filter(String),
    /// Trade-offs of an execution type.
    Execution(String),
    /// Description and members of a level.
    Level(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Command::Enter,
            ":open" => Command::Open,
            ":close" => Command::Close,
            ":quit" | ":q" => Command::Quit,
            ":search" => Command::Search(String::new()),
            ":down" => Command::Nav(NavKey::Down),
            ":up" => Command::Nav(NavKey::Up),
            ":pick" => Command::Nav(NavKey::Enter),
            ":esc" => Command::Nav(NavKey::Escape),
            _ => {
                if let Some((keyword, arg)) = line.split_once(' ') {
                    let arg = arg.trim().to_string();
                    match keyword {
                        ":search" => return Command::Search(arg),
                        ":filter" => return Command::Filter(arg),
                        ":exec" => return Command::Execution(arg),
                        ":level" => return Command::Level(arg),
                        _ => {}
                    }
                }
                if let Some(prefix) = line.strip_prefix('?') {
                    return Command::Suggest(prefix.to_string());
                }
                match line.parse::<usize>().ok().and_then(MenuChoice::from_number) {
                    Some(choice) => Command::Choose(choice),
                    None => Command::Submit(line.to_string()),
                }
            }
        }
    }
}

/// The card page behind the chat: filter buttons, search box, info panels.
pub struct Page {
    catalogue: Arc<Catalogue>,
    view: FilterViewState,
    cursor: SuggestionCursor,
    suggestion_limit: usize,
}

impl Page {
    pub fn new(catalogue: Arc<Catalogue>, suggestion_limit: usize) -> Self {
        Self {
            catalogue,
            view: FilterViewState::new(),
            cursor: SuggestionCursor::new(),
            suggestion_limit,
        }
    }

    pub fn view(&self) -> &FilterViewState {
        &self.view
    }

    pub fn cursor(&self) -> &SuggestionCursor {
        &self.cursor
    }

    /// Lines to print for a page command; `None` for chat commands.
    pub fn handle(&mut self, command: &Command) -> Option<Vec<String>> {
        let lines = match command {
            Command::Search(query) => {
                self.view.set_query(query.as_str());
                let names = self
                    .view
                    .suggestions(&self.catalogue, self.suggestion_limit)
                    .iter()
                    .map(|r| r.name.clone())
                    .collect();
                self.cursor.refresh(names);
                let mut lines = self.suggestion_lines();
                lines.extend(self.cards());
                lines
            }
            Command::Nav(key) => match self.cursor.press(*key) {
                CursorAction::None => vec!["(no suggestions)".to_string()],
                CursorAction::Highlight(_) => self.suggestion_lines(),
                CursorAction::Select(name) => {
                    self.view.set_query(name);
                    self.cards()
                }
                CursorAction::Dismiss => vec!["(suggestions closed)".to_string()],
            },
            Command::Filter(label) => match CategoryFilter::from_label(label) {
                Some(filter) => {
                    self.view.set_category(filter);
                    self.cursor.clear();
                    self.cards()
                }
                None => {
                    let labels: Vec<_> = CategoryFilter::buttons().iter().map(|b| b.label()).collect();
                    vec![format!("unknown filter; choose one of: {}", labels.join(", "))]
                }
            },
            Command::Execution(kind) => match tradeoffs::execution_tradeoff(kind) {
                Some(t) => vec![
                    kind.clone(),
                    format!("  + {}", t.advantage),
                    format!("  - {}", t.disadvantage),
                ],
                None => vec![format!("no notes on execution type {kind:?}")],
            },
            Command::Level(raw) => match raw.parse::<Level>() {
                Ok(level) => {
                    let members: Vec<_> = tradeoffs::records_at_level(&self.catalogue, level)
                        .iter()
                        .map(|r| r.name.as_str())
                        .collect();
                    vec![
                        level.to_string(),
                        format!("  {}", tradeoffs::level_description(level)),
                        format!("  {}", members.join(", ")),
                    ]
                }
                Err(e) => vec![e],
            },
            _ => return None,
        };
        Some(lines)
    }

    /// Current dropdown; the highlighted entry is starred.
    fn suggestion_lines(&self) -> Vec<String> {
        let active = self.cursor.active();
        self.cursor
            .items()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let marker = if active == Some(i) { '*' } else { '>' };
                format!("  {marker} {name}")
            })
            .collect()
    }

    fn cards(&self) -> Vec<String> {
        let cards = self.view.visible_records(&self.catalogue);
        if cards.is_empty() {
            return vec!["(no technologies match)".to_string()];
        }
        cards.into_iter().map(card_line).collect()
    }
}

fn card_line(record: &TechnologyRecord) -> String {
    format!(
        "{} ({}) [{}] {}, {}",
        record.name, record.year, record.category, record.level, record.execution_type
    )
}
