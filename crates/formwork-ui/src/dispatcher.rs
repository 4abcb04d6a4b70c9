//! Maps toolkit events to the callbacks registered for them.

use formwork_core::alloc::HashMap;
use formwork_toolkit::{KeyBinding, PrimitiveId, ToolkitEvent, WindowId};

use crate::content::Callback;
use crate::factory::Trigger;

/// Owner of every callback registered through a form context.
///
/// The dispatcher only resolves events to callbacks; it never runs them, so
/// the caller can release its borrow before the callback re-enters.
/// Everything is filed under its window so that destroyed windows can be
/// forgotten wholesale.
#[derive(Default)]
pub struct Dispatcher {
    triggers: HashMap<PrimitiveId, (WindowId, Trigger)>,
    keys: HashMap<WindowId, Vec<(KeyBinding, Callback)>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `trigger` for events of `primitive`, which lives in `window`.
    pub fn attach(&mut self, window: WindowId, primitive: PrimitiveId, trigger: Trigger) {
        self.triggers.insert(primitive, (window, trigger));
    }

    /// Bind `callback` to `binding` in `window`, replacing any callback
    /// already bound to the same binding there.
    pub fn bind_key(&mut self, window: WindowId, binding: KeyBinding, callback: Callback) {
        let bindings = self.keys.entry(window).or_default();
        match bindings.iter_mut().find(|(existing, _)| *existing == binding) {
            Some((_, slot)) => *slot = callback,
            None => bindings.push((binding, callback)),
        }
    }

    /// Drop the triggers and key bindings of every window `alive` rejects.
    /// Returns how many callbacks were dropped.
    pub fn retain_windows(&mut self, alive: impl Fn(WindowId) -> bool) -> usize {
        let before = self.trigger_count() + self.keys.values().map(Vec::len).sum::<usize>();
        self.triggers.retain(|_, (window, _)| alive(*window));
        self.keys.retain(|window, _| alive(*window));
        before - self.trigger_count() - self.keys.values().map(Vec::len).sum::<usize>()
    }

    /// The callback `event` should run, if any.
    pub fn resolve(&self, event: &ToolkitEvent) -> Option<Callback> {
        match event {
            ToolkitEvent::Command(primitive) | ToolkitEvent::Toggled(primitive) => {
                self.triggers.get(primitive).map(|(_, trigger)| trigger.resolve())
            }
            ToolkitEvent::Key {
                window,
                key,
                modifiers,
            } => self.keys.get(window).and_then(|bindings| {
                bindings
                    .iter()
                    .find(|(binding, _)| binding.matches(*key, *modifiers))
                    .map(|(_, callback)| callback.clone())
            }),
            ToolkitEvent::Edited { .. } | ToolkitEvent::CloseRequested(_) => None,
        }
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn key_binding_count(&self, window: WindowId) -> usize {
        self.keys.get(&window).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::callback;
    use formwork_toolkit::{BoolCell, Key, Modifiers};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_resolves_commands() {
        let mut dispatcher = Dispatcher::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        dispatcher.attach(
            WindowId(0),
            PrimitiveId(4),
            Trigger::Command(callback(move || counter.set(counter.get() + 1))),
        );

        dispatcher.resolve(&ToolkitEvent::Command(PrimitiveId(4))).unwrap()();
        assert_eq!(hits.get(), 1);
        assert!(dispatcher.resolve(&ToolkitEvent::Command(PrimitiveId(5))).is_none());
    }

    #[test]
    fn test_toggle_picks_branch_from_cell() {
        let mut dispatcher = Dispatcher::new();
        let cell = BoolCell::new(true);
        let checked = Rc::new(Cell::new(0));
        let unchecked = Rc::new(Cell::new(0));
        let (c, u) = (checked.clone(), unchecked.clone());
        dispatcher.attach(
            WindowId(0),
            PrimitiveId(1),
            Trigger::Branches {
                cell: cell.clone(),
                on_checked: callback(move || c.set(c.get() + 1)),
                on_unchecked: callback(move || u.set(u.get() + 1)),
            },
        );

        let event = ToolkitEvent::Toggled(PrimitiveId(1));
        dispatcher.resolve(&event).unwrap()();
        assert_eq!((checked.get(), unchecked.get()), (1, 0));

        cell.set(false);
        dispatcher.resolve(&event).unwrap()();
        assert_eq!((checked.get(), unchecked.get()), (1, 1));
    }

    #[test]
    fn test_key_bindings_are_per_window_and_replaceable() {
        let mut dispatcher = Dispatcher::new();
        let last = Rc::new(Cell::new(""));
        let (a, b) = (last.clone(), last.clone());
        let save = KeyBinding::ctrl(Key::Char('s'));

        dispatcher.bind_key(WindowId(0), save, callback(move || a.set("first")));
        dispatcher.bind_key(WindowId(0), save, callback(move || b.set("second")));
        assert_eq!(dispatcher.key_binding_count(WindowId(0)), 1);

        let pressed = |window| ToolkitEvent::Key {
            window,
            key: Key::Char('s'),
            modifiers: Modifiers::CTRL,
        };
        dispatcher.resolve(&pressed(WindowId(0))).unwrap()();
        assert_eq!(last.get(), "second");
        assert!(dispatcher.resolve(&pressed(WindowId(1))).is_none());

        assert_eq!(dispatcher.retain_windows(|window| window != WindowId(0)), 1);
        assert!(dispatcher.resolve(&pressed(WindowId(0))).is_none());
    }

    #[test]
    fn test_retain_windows_drops_triggers_and_keys() {
        let mut dispatcher = Dispatcher::new();
        for (window, primitive) in [(0, 1), (1, 2), (2, 3)] {
            dispatcher.attach(
                WindowId(window),
                PrimitiveId(primitive),
                Trigger::Command(callback(|| {})),
            );
        }
        dispatcher.bind_key(WindowId(2), KeyBinding::key(Key::Return), callback(|| {}));

        let dropped = dispatcher.retain_windows(|window| window == WindowId(0));

        assert_eq!(dropped, 3);
        assert_eq!(dispatcher.trigger_count(), 1);
        assert_eq!(dispatcher.key_binding_count(WindowId(2)), 0);
        assert!(dispatcher.resolve(&ToolkitEvent::Command(PrimitiveId(2))).is_none());
        assert!(dispatcher.resolve(&ToolkitEvent::Command(PrimitiveId(1))).is_some());
    }
}
