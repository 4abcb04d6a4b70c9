use std::collections::VecDeque;

use crate::cell::CellWrite;
use crate::keys::{Key, Modifiers};
use crate::primitive::PrimitiveId;
use crate::window::WindowId;

/// User input reported by a toolkit.
///
/// Toolkits only report; they never run caller callbacks themselves. The
/// form layer maps each event to whatever callback it registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolkitEvent {
    /// A button was clicked.
    Command(PrimitiveId),
    /// A checkbox was toggled. The `Edited` event carrying its new value is
    /// queued right before this one.
    Toggled(PrimitiveId),
    /// The user changed the value of a primitive bound to a cell. Applying
    /// `write` runs the cell's watchers, so it happens outside the toolkit.
    Edited {
        primitive: PrimitiveId,
        write: CellWrite,
    },
    /// A bound key was pressed while `window` had focus.
    Key {
        window: WindowId,
        key: Key,
        modifiers: Modifiers,
    },
    /// The user asked to close a window.
    CloseRequested(WindowId),
}

/// Pending toolkit events, close requests first.
#[derive(Debug)]
pub struct EventQueue {
    pending: VecDeque<ToolkitEvent>,

    /// Close requests jump the queue so that input aimed at a closing
    /// window is dropped instead of dispatched.
    priority: VecDeque<ToolkitEvent>,

    stats: EventStats,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(16),
            priority: VecDeque::with_capacity(2),
            stats: EventStats::default(),
        }
    }

    pub fn push(&mut self, event: ToolkitEvent) {
        self.stats.events_received += 1;

        match event {
            ToolkitEvent::CloseRequested(_) => self.priority.push_back(event),
            _ => self.pending.push_back(event),
        }
    }

    pub fn pop(&mut self) -> Option<ToolkitEvent> {
        let event = self
            .priority
            .pop_front()
            .or_else(|| self.pending.pop_front())?;
        self.stats.events_processed += 1;
        Some(event)
    }

    /// Forget queued events that `keep` rejects.
    pub fn retain(&mut self, mut keep: impl FnMut(&ToolkitEvent) -> bool) {
        let before = self.len();
        self.priority.retain(|event| keep(event));
        self.pending.retain(|event| keep(event));
        self.stats.events_dropped += before - self.len();
    }

    /// Queued events in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolkitEvent> + '_ {
        self.priority.iter().chain(self.pending.iter())
    }

    pub fn len(&self) -> usize {
        self.priority.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> &EventStats {
        &self.stats
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct EventStats {
    pub events_received: usize,
    pub events_processed: usize,
    pub events_dropped: usize,
}
