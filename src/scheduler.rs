//! Delayed menu re-prompt.
//! After a completed answer the menu comes back only once the reader has had
//! time to see it. At most one re-prompt is ever pending: scheduling again
//! supersedes the previous one, and closing the widget cancels it.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cancellation::PendingSlot;

/// Delay before the menu reappears.
pub const DEFAULT_MENU_DELAY: Duration = Duration::from_millis(1500);

/// Sent to the widget's event loop when a re-prompt delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuDue {
    pub generation: u64,
}

pub struct MenuTimer {
    delay: Duration,
    slot: PendingSlot,
    due_tx: mpsc::UnboundedSender<MenuDue>,
}

impl MenuTimer {
    pub fn new(delay: Duration, due_tx: mpsc::UnboundedSender<MenuDue>) -> Self {
        Self {
            delay,
            slot: PendingSlot::new(),
            due_tx,
        }
    }

    /// Channel pair for a timer and the loop that receives its ticks.
    pub fn channel(delay: Duration) -> (Self, mpsc::UnboundedReceiver<MenuDue>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(delay, tx), rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the re-prompt, replacing any pending one. Must run inside a Tokio runtime.
    pub fn schedule(&self) -> u64 {
        let ticket = self.slot.arm();
        let generation = ticket.generation();
        let delay = self.delay;
        let tx = self.due_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    if ticket.should_fire() {
                        let _ = tx.send(MenuDue { generation });
                    }
                }
                _ = ticket.token().cancelled() => {
                    debug!(generation, "menu_reprompt_cancelled");
                }
            }
        });

        debug!(generation, delay_ms = delay.as_millis() as u64, "menu_reprompt_scheduled");
        generation
    }

    /// Drop whatever is pending.
    pub fn cancel(&self) {
        if self.is_pending() {
            info!(generation = self.slot.generation(), "menu_reprompt_cancel");
        }
        self.slot.disarm();
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_armed()
    }

    /// Claim a tick. Stale or cancelled ticks are refused; an accepted tick
    /// clears the pending state.
    pub fn accept(&self, due: MenuDue) -> bool {
        let claimed = self.slot.claim(due.generation);
        if !claimed {
            debug!(generation = due.generation, "menu_reprompt_stale");
        }
        claimed
    }
}
