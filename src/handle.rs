//! Entity handles and pool slot state

use std::time::Instant;

/// Opaque identifier for one recyclable entity slot.
///
/// Handles are cheap to copy and stay valid for the lifetime of the slot;
/// once a slot is destroyed its handle is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(pub(crate) u64);

impl EntityHandle {
    /// Raw id, useful for logging and diagnostics.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Lifecycle state of a pool slot.
///
/// `Destroyed` is a distinct terminal state rather than an overload of
/// `Inactive`, so a late destroy notification can never resurrect a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Held by a caller, engine-visible side effects applied.
    Active,

    /// Parked in the pool, eligible for the next acquire scan.
    Inactive,

    /// The underlying entity is gone; the slot is about to be dropped.
    Destroyed,
}

/// One entry in the pool's ordered slot vector.
pub(crate) struct Slot<E> {
    pub id: EntityHandle,
    pub entity: E,
    pub state: SlotState,
    /// Armed on spawn when a lifespan policy is configured, cleared on
    /// release.
    pub expires_at: Option<Instant>,
}

impl<E> Slot<E> {
    pub fn new(id: EntityHandle, entity: E) -> Self {
        Self {
            id,
            entity,
            state: SlotState::Inactive,
            expires_at: None,
        }
    }
}
