//! Conversation engine.
//!
//! `handle` takes one user or timer event, moves the session and returns the
//! effects a transcript should apply, in order. It never touches a view, so
//! every flow can be driven and inspected without one.
//!
//! Submitted text always resolves by exact, case-insensitive name. Live
//! suggestions only help the user type such a name.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalogue::{Catalogue, TechnologyRecord};
use crate::matcher::{self, MatchPolicy};
use crate::rich_text::RichText;

use super::compare::{Comparator, DifferentiatorComparator};
use super::replies;
use super::session::ConversationSession;
use super::state::{ConversationState, MenuChoice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Choose(MenuChoice),
    /// Free text from the prompt input.
    Submit(String),
    /// A clicked live suggestion; always an exact catalogue name.
    PickSuggestion(String),
    /// The re-prompt delay elapsed.
    MenuDue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    UserMessage(String),
    BotMessage(RichText),
    ShowMenu {
        greeting: RichText,
        choices: [MenuChoice; 3],
    },
    RemoveMenu,
    /// Open a text input with live suggestions under this prompt.
    Prompt(String),
    ClearInput,
    /// Arm the delayed menu re-prompt.
    ScheduleMenu,
}

pub struct ConversationEngine {
    catalogue: Arc<Catalogue>,
    session: ConversationSession,
    comparator: Arc<dyn Comparator>,
}

impl ConversationEngine {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self::with_comparator(catalogue, Arc::new(DifferentiatorComparator))
    }

    pub fn with_comparator(catalogue: Arc<Catalogue>, comparator: Arc<dyn Comparator>) -> Self {
        Self {
            catalogue,
            session: ConversationSession::new(),
            comparator,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn state(&self) -> ConversationState {
        self.session.state()
    }

    pub fn pending_comparison_subject(&self) -> Option<&TechnologyRecord> {
        self.session
            .pending_comparison()
            .and_then(|i| self.catalogue.get(i))
    }

    /// Live suggestions for a chat prompt: prefix match over the whole
    /// catalogue, no category filter.
    pub fn live_suggestions(&self, text: &str, limit: usize) -> Vec<String> {
        matcher::suggest(text.trim(), self.catalogue.all(), limit, MatchPolicy::Prefix)
            .into_iter()
            .map(|r| r.name.clone())
            .collect()
    }

    /// First menu of the session.
    pub fn start(&mut self) -> Vec<Effect> {
        self.show_menu()
    }

    /// End the current exchange: back to Idle now, menu after the delay.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.session.finish();
        vec![Effect::ClearInput, Effect::ScheduleMenu]
    }

    pub fn handle(&mut self, event: ChatEvent) -> Vec<Effect> {
        match event {
            ChatEvent::Choose(choice) => self.choose(choice),
            ChatEvent::Submit(text) | ChatEvent::PickSuggestion(text) => self.submit(&text),
            ChatEvent::MenuDue => self.show_menu(),
        }
    }

    fn show_menu(&mut self) -> Vec<Effect> {
        if !self.session.offer_menu() {
            debug!(state = %self.session.state(), "menu_not_offered");
            return Vec::new();
        }
        vec![Effect::ShowMenu {
            greeting: replies::greeting(),
            choices: MenuChoice::ALL,
        }]
    }

    fn choose(&mut self, choice: MenuChoice) -> Vec<Effect> {
        if self.session.take_choice(choice).is_err() {
            return Vec::new();
        }
        vec![
            Effect::RemoveMenu,
            Effect::UserMessage(replies::user_line(choice).to_string()),
            Effect::Prompt(replies::prompt(choice)),
        ]
    }

    fn submit(&mut self, text: &str) -> Vec<Effect> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let state = self.session.state();
        if !state.is_awaiting() {
            warn!(state = %state, "submission_without_prompt");
            return Vec::new();
        }

        let mut effects = vec![Effect::UserMessage(text.to_string())];
        let Some(index) = self.catalogue.position_by_exact_name(text) else {
            warn!(state = %state, query = text, "technology_not_found");
            effects.push(Effect::BotMessage(replies::not_found()));
            return effects;
        };
        let catalogue = Arc::clone(&self.catalogue);
        let record = &catalogue.all()[index];

        match state {
            ConversationState::AwaitingDetailTarget => {
                effects.push(Effect::BotMessage(replies::details(record)));
                effects.extend(self.reset());
            }
            ConversationState::AwaitingComparisonFirst => {
                if self.session.hold_first(index).is_ok() {
                    effects.push(Effect::Prompt(replies::second_prompt(record)));
                }
            }
            ConversationState::AwaitingComparisonSecond => {
                match self.pending_comparison_subject() {
                    Some(first) => {
                        let comparison = self.comparator.compare(first, record);
                        effects.push(Effect::BotMessage(comparison));
                    }
                    None => warn!("comparison_subject_missing"),
                }
                effects.extend(self.reset());
            }
            ConversationState::AwaitingEvolutionTarget => {
                effects.push(Effect::BotMessage(replies::evolution(record)));
                effects.extend(self.reset());
            }
            ConversationState::Idle => {}
        }
        effects
    }
}
