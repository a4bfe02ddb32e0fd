//! Conversation states: Idle → Awaiting{Detail,Evolution,ComparisonFirst} →
//! (ComparisonSecond) → Idle. Menu choices leave Idle, resolved names return.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingDetailTarget,
    AwaitingComparisonFirst,
    AwaitingComparisonSecond,
    AwaitingEvolutionTarget,
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationState::Idle => write!(f, "Idle"),
            ConversationState::AwaitingDetailTarget => write!(f, "AwaitingDetailTarget"),
            ConversationState::AwaitingComparisonFirst => write!(f, "AwaitingComparisonFirst"),
            ConversationState::AwaitingComparisonSecond => write!(f, "AwaitingComparisonSecond"),
            ConversationState::AwaitingEvolutionTarget => write!(f, "AwaitingEvolutionTarget"),
        }
    }
}

impl ConversationState {
    /// Returns whether transitioning from `self` to `next` is valid.
    pub fn can_transition_to(self, next: ConversationState) -> bool {
        use ConversationState::*;
        matches!(
            (self, next),
            (Idle, AwaitingDetailTarget)
                | (Idle, AwaitingEvolutionTarget)
                | (Idle, AwaitingComparisonFirst)
                | (AwaitingComparisonFirst, AwaitingComparisonSecond)
                // completed answers and explicit resets
                | (_, Idle)
        )
    }

    /// A technology prompt is open in every state but Idle.
    pub fn is_awaiting(self) -> bool {
        !matches!(self, ConversationState::Idle)
    }
}

/// The three menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuChoice {
    Detail,
    Evolution,
    Compare,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 3] = [MenuChoice::Detail, MenuChoice::Evolution, MenuChoice::Compare];

    /// State the conversation enters when this entry is picked.
    pub fn target(self) -> ConversationState {
        match self {
            MenuChoice::Detail => ConversationState::AwaitingDetailTarget,
            MenuChoice::Evolution => ConversationState::AwaitingEvolutionTarget,
            MenuChoice::Compare => ConversationState::AwaitingComparisonFirst,
        }
    }

    /// 1-based position in the menu.
    pub fn number(self) -> usize {
        match self {
            MenuChoice::Detail => 1,
            MenuChoice::Evolution => 2,
            MenuChoice::Compare => 3,
        }
    }

    pub fn from_number(n: usize) -> Option<Self> {
        MenuChoice::ALL.into_iter().find(|c| c.number() == n)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Detail => "Detail a technology",
            MenuChoice::Evolution => "Show an evolution timeline",
            MenuChoice::Compare => "Compare two technologies",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}
