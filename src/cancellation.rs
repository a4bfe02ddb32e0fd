//! Single-occupancy slot for delayed work.
//! Arming the slot evicts whatever held it before; a ticket from an evicted
//! or disarmed occupant never passes `should_fire`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

pub struct PendingSlot {
    token: RwLock<CancellationToken>,
    generation: Arc<AtomicU64>,
}

impl PendingSlot {
    pub fn new() -> Self {
        let token = CancellationToken::new();
        // Nothing has been armed yet.
        token.cancel();
        Self {
            token: RwLock::new(token),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Evict the current occupant and hand out a ticket for the new one.
    pub fn arm(&self) -> SlotTicket {
        let mut slot = self.token.write();
        slot.cancel();
        let fresh = CancellationToken::new();
        let ticket_token = fresh.child_token();
        *slot = fresh;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        SlotTicket {
            slot_generation: Arc::clone(&self.generation),
            generation,
            token: ticket_token,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_armed(&self) -> bool {
        !self.token.read().is_cancelled()
    }

    /// Empty the slot. The generation stays put, so late tickets still read
    /// as current but cancelled.
    pub fn disarm(&self) {
        self.token.read().cancel();
    }

    /// Take the occupant out if `generation` is the one still armed.
    pub fn claim(&self, generation: u64) -> bool {
        let slot = self.token.write();
        if slot.is_cancelled() || generation != self.generation() {
            return false;
        }
        slot.cancel();
        true
    }
}

impl Default for PendingSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Held by the task that occupies the slot.
#[derive(Clone)]
pub struct SlotTicket {
    slot_generation: Arc<AtomicU64>,
    generation: u64,
    token: CancellationToken,
}

impl SlotTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn is_evicted(&self) -> bool {
        self.slot_generation.load(Ordering::SeqCst) != self.generation
    }

    #[inline]
    pub fn should_fire(&self) -> bool {
        !self.token.is_cancelled() && !self.is_evicted()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}
