//! Contact events surfaced to game logic
//!
//! The resolver is the only producer. Two dynamic shapes overlapping emit a
//! trigger event (no physical response); a dynamic shape bounced or slid
//! against a static one emits a physical-collision event. Everything else
//! (ground state, slope angle, velocity) is read straight from the collider
//! and body accessors.

use crate::collider::ColliderHandle;
use glam::Vec2;

/// What kind of contact an event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Two dynamic shapes overlapped; no physical response was applied
    Trigger,
    /// A dynamic shape was bounced or slid against a static shape
    Physical,
}

/// A contact between two colliders
///
/// For physical contacts `a` is the dynamic collider and `b` the static one.
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    /// First collider
    pub a: ColliderHandle,
    /// Second collider
    pub b: ColliderHandle,
    /// Contact kind
    pub kind: ContactKind,
    /// Unit normal pointing from `a` to `b`
    pub normal: Vec2,
    /// Penetration depth at detection time
    pub depth: f32,
    /// User data of collider `a`
    pub user_data_a: u128,
    /// User data of collider `b`
    pub user_data_b: u128,
}

impl ContactEvent {
    /// Check if this is a trigger event
    pub fn is_trigger(&self) -> bool {
        self.kind == ContactKind::Trigger
    }

    /// Check if this is a physical-collision event
    pub fn is_physical(&self) -> bool {
        self.kind == ContactKind::Physical
    }

    /// Check if the event involves the given collider
    pub fn involves(&self, handle: ColliderHandle) -> bool {
        self.a == handle || self.b == handle
    }

    /// The other collider of the pair, if `handle` is part of it
    pub fn other(&self, handle: ColliderHandle) -> Option<ColliderHandle> {
        if self.a == handle {
            Some(self.b)
        } else if self.b == handle {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Handler trait for contact notifications
///
/// Implemented by the embedding game and driven through
/// [`dispatch_events`](crate::world::PhysicsWorld::dispatch_events) after a
/// step.
pub trait PhysicsEventHandler {
    /// Called for each trigger contact of the last step
    fn on_trigger(&mut self, _event: &ContactEvent) {}

    /// Called for each physical collision of the last step
    fn on_physical_collision(&mut self, _event: &ContactEvent) {}
}

/// Buffer of contact events for one step
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<ContactEvent>,
}

impl EventCollector {
    /// Create a new event collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all collected events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Push an event unless the same pair and kind was already recorded.
    /// Resolution may visit a pair in several passes; game logic should see
    /// one notification per contact per frame.
    pub(crate) fn push_unique(&mut self, event: ContactEvent) {
        let seen = self
            .events
            .iter()
            .any(|e| e.a == event.a && e.b == event.b && e.kind == event.kind);
        if !seen {
            self.events.push(event);
        }
    }

    /// All events of the last step
    pub fn events(&self) -> &[ContactEvent] {
        &self.events
    }

    /// Trigger events of the last step
    pub fn triggers(&self) -> impl Iterator<Item = &ContactEvent> {
        self.events.iter().filter(|e| e.is_trigger())
    }

    /// Physical-collision events of the last step
    pub fn physical_contacts(&self) -> impl Iterator<Item = &ContactEvent> {
        self.events.iter().filter(|e| e.is_physical())
    }
}
