//! Reconciliation of the active selection and the navigation stack.
//!
//! The map writes the active selection, back-navigation writes the stack,
//! and downstream observers (camera, list scroll) react to every write. The
//! two slices are reconciled here, in one place, with writes issued only on
//! actual difference — an accidental self-triggering write would loop the
//! camera animation.
//!
//! Invariant after every transition: the stack is empty iff the active
//! selection is empty; when non-empty it holds exactly the active id.

use crate::record::RecordId;

/// Height of the detail presentation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelDetent {
    #[default]
    Collapsed,
    Medium,
    Expanded,
}

/// The selection state machine. Transitions are total, infallible, and
/// idempotent: feeding a transition its current state changes nothing and
/// emits nothing.
#[derive(Debug, Default)]
pub struct SelectionSync {
    active: Option<RecordId>,
    stack: Vec<RecordId>,
    detent: PanelDetent,
    version: u64,
}

impl SelectionSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record currently focused by the user, if any.
    pub fn active(&self) -> Option<&RecordId> {
        self.active.as_ref()
    }

    /// The navigation stack; empty or exactly one element.
    pub fn navigation_stack(&self) -> &[RecordId] {
        &self.stack
    }

    pub fn detent(&self) -> PanelDetent {
        self.detent
    }

    /// Monotone counter bumped once per transition that changed any state
    /// slice. Observers diff against it to know whether a write happened.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Map- or list-driven selection change. Writes the implied stack only
    /// if it differs from the current one.
    pub fn select_active(&mut self, id: Option<RecordId>) -> bool {
        let implied_stack: Vec<RecordId> = id.iter().cloned().collect();
        let changed_active = self.active != id;
        let changed_stack = self.stack != implied_stack;
        if changed_active {
            self.active = id;
        }
        if changed_stack {
            self.stack = implied_stack;
        }
        self.finish_transition(changed_active || changed_stack)
    }

    /// Navigation-driven change (e.g. the user popped the detail view).
    /// Adopts the incoming stack truncated to its last element and writes
    /// the implied active selection only if it differs.
    pub fn sync_from_navigation(&mut self, new_stack: Vec<RecordId>) -> bool {
        let implied_active = new_stack.last().cloned();
        let adopted_stack: Vec<RecordId> = implied_active.iter().cloned().collect();
        let changed_active = self.active != implied_active;
        let changed_stack = self.stack != adopted_stack;
        if changed_active {
            self.active = implied_active;
        }
        if changed_stack {
            self.stack = adopted_stack;
        }
        self.finish_transition(changed_active || changed_stack)
    }

    /// Explicit user resize of the presentation panel.
    pub fn set_detent(&mut self, detent: PanelDetent) -> bool {
        if self.detent == detent {
            return false;
        }
        self.detent = detent;
        self.version += 1;
        true
    }

    /// A real change collapses the panel back to its default height; a
    /// no-op must leave it alone.
    fn finish_transition(&mut self, changed: bool) -> bool {
        if changed {
            self.detent = PanelDetent::default();
            self.version += 1;
        }
        changed
    }
}
