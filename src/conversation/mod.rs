//! Scripted chat assistant: menu-driven conversation over the catalogue.

pub mod compare;
pub mod engine;
pub mod replies;
pub mod session;
pub mod state;

pub use compare::{Comparator, DifferentiatorComparator};
pub use engine::{ChatEvent, ConversationEngine, Effect};
pub use session::{ConversationSession, InvalidTransition};
pub use state::{ConversationState, MenuChoice};
