//! Per-widget conversation session.
//!
//! The pending comparison subject is only ever set together with
//! `AwaitingComparisonSecond` and cleared on every other transition, so the
//! two fields cannot disagree.

use tracing::{info, warn};

use super::state::{ConversationState, MenuChoice};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: ConversationState,
    pub to: ConversationState,
}

#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    state: ConversationState,
    /// Catalogue index of the first technology of a comparison.
    pending_comparison: Option<usize>,
    /// The menu is on screen and a choice may be taken.
    menu_offered: bool,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn pending_comparison(&self) -> Option<usize> {
        self.pending_comparison
    }

    pub fn menu_offered(&self) -> bool {
        self.menu_offered
    }

    /// Put the menu on screen. Only meaningful while idle.
    pub fn offer_menu(&mut self) -> bool {
        if self.state != ConversationState::Idle || self.menu_offered {
            return false;
        }
        self.menu_offered = true;
        true
    }

    /// Take a menu entry. The menu is consumed: a choice is not re-offerable.
    pub fn take_choice(&mut self, choice: MenuChoice) -> Result<ConversationState, InvalidTransition> {
        if !self.menu_offered {
            warn!(choice = ?choice, state = %self.state, "choice_without_menu");
            return Err(InvalidTransition {
                from: self.state,
                to: choice.target(),
            });
        }
        let next = self.transition(choice.target())?;
        self.menu_offered = false;
        Ok(next)
    }

    /// Remember the first comparison subject and wait for the second.
    pub fn hold_first(&mut self, index: usize) -> Result<ConversationState, InvalidTransition> {
        let next = self.transition(ConversationState::AwaitingComparisonSecond)?;
        self.pending_comparison = Some(index);
        Ok(next)
    }

    /// Back to Idle, dropping any pending subject. Safe to call repeatedly.
    pub fn finish(&mut self) {
        if self.state != ConversationState::Idle {
            info!(from = %self.state, to = %ConversationState::Idle, "conversation_transition");
        }
        self.state = ConversationState::Idle;
        self.pending_comparison = None;
    }

    fn transition(&mut self, next: ConversationState) -> Result<ConversationState, InvalidTransition> {
        let current = self.state;
        if !current.can_transition_to(next) {
            let err = InvalidTransition { from: current, to: next };
            warn!("{}", err);
            return Err(err);
        }
        self.state = next;
        if next != ConversationState::AwaitingComparisonSecond {
            self.pending_comparison = None;
        }
        info!(from = %current, to = %next, "conversation_transition");
        Ok(next)
    }
}
