//! In-memory toolkit used by tests and demos.

use std::cell::RefCell;
use std::rc::Rc;

use formwork_toolkit::{
    BoolCell, CellWrite, ClearAnchor, EventQueue, Key, KeyBinding, Modifiers, ObservableCell,
    PackSide, PrimitiveId, PrimitiveKind, PrimitiveSpec, StringCell, Toolkit, ToolkitError,
    ToolkitEvent, ToolkitResult, WidgetState, WindowDescriptor, WindowId,
};

/// Records a toolkit call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolkitCall {
    CreateWindow {
        window: WindowId,
        parent: Option<WindowId>,
        title: String,
    },
    DestroyWindow(WindowId),
    CreatePrimitive {
        primitive: PrimitiveId,
        window: WindowId,
        kind: PrimitiveKind,
    },
    DestroyPrimitive(PrimitiveId),
    Pack {
        primitive: PrimitiveId,
        side: PackSide,
    },
    SetState {
        primitive: PrimitiveId,
        state: WidgetState,
    },
    Clear {
        primitive: PrimitiveId,
        anchor: ClearAnchor,
    },
    SetText(PrimitiveId),
    BindKey {
        window: WindowId,
        binding: KeyBinding,
    },
    ShowError {
        title: String,
        message: String,
    },
    SetProgress {
        primitive: PrimitiveId,
        running: bool,
    },
}

/// An error dialog that was shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownError {
    pub title: String,
    pub message: String,
}

#[derive(Debug)]
pub struct HeadlessWindow {
    pub id: WindowId,
    pub descriptor: WindowDescriptor,
    pub parent: Option<WindowId>,
    pub alive: bool,
    pub bindings: Vec<KeyBinding>,
    /// Packed primitives in layout order.
    pub layout: Vec<PrimitiveId>,
}

#[derive(Debug)]
pub struct HeadlessPrimitive {
    pub id: PrimitiveId,
    pub window: WindowId,
    pub spec: PrimitiveSpec,
    pub state: WidgetState,
    pub packed: Option<PackSide>,
    pub alive: bool,
    /// Buffer of a multi-line text primitive.
    pub buffer: String,
    pub progress_running: bool,
}

impl HeadlessPrimitive {
    pub fn kind(&self) -> PrimitiveKind {
        self.spec.kind()
    }

    pub fn caption(&self) -> Option<&str> {
        match &self.spec {
            PrimitiveSpec::Label { caption, .. }
            | PrimitiveSpec::Button { caption, .. }
            | PrimitiveSpec::Checkbox { caption, .. } => Some(caption),
            _ => None,
        }
    }

    /// Width and height the primitive was configured with, if any.
    pub fn configured_width(&self) -> Option<u32> {
        match &self.spec {
            PrimitiveSpec::Label { size, .. } => size.map(|size| size.width),
            PrimitiveSpec::Button { size, .. } | PrimitiveSpec::Text { size, .. } => {
                Some(size.width)
            }
            PrimitiveSpec::Entry { width, .. } => Some(*width),
            _ => None,
        }
    }

    pub fn configured_height(&self) -> Option<u32> {
        match &self.spec {
            PrimitiveSpec::Label { size, .. } => size.map(|size| size.height),
            PrimitiveSpec::Button { size, .. } | PrimitiveSpec::Text { size, .. } => {
                Some(size.height)
            }
            _ => None,
        }
    }
}

/// A toolkit that keeps everything in memory.
#[derive(Debug, Default)]
pub struct HeadlessToolkit {
    windows: Vec<HeadlessWindow>,
    primitives: Vec<HeadlessPrimitive>,
    events: EventQueue,
    errors: Vec<ShownError>,
    calls: Vec<ToolkitCall>,
}

impl HeadlessToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh toolkit ready to be handed to a form context.
    pub fn shared() -> Rc<RefCell<HeadlessToolkit>> {
        Rc::new(RefCell::new(Self::new()))
    }

    fn window_ref(&self, window: WindowId) -> ToolkitResult<&HeadlessWindow> {
        let entry = self
            .windows
            .get(window.0 as usize)
            .ok_or(ToolkitError::WindowNotFound(window))?;
        if !entry.alive {
            return Err(ToolkitError::WindowDestroyed(window));
        }
        Ok(entry)
    }

    fn window_mut(&mut self, window: WindowId) -> ToolkitResult<&mut HeadlessWindow> {
        let entry = self
            .windows
            .get_mut(window.0 as usize)
            .ok_or(ToolkitError::WindowNotFound(window))?;
        if !entry.alive {
            return Err(ToolkitError::WindowDestroyed(window));
        }
        Ok(entry)
    }

    fn live(&self, primitive: PrimitiveId) -> ToolkitResult<&HeadlessPrimitive> {
        self.primitives
            .get(primitive.0 as usize)
            .filter(|entry| entry.alive)
            .ok_or(ToolkitError::PrimitiveNotFound(primitive))
    }

    fn live_mut(&mut self, primitive: PrimitiveId) -> ToolkitResult<&mut HeadlessPrimitive> {
        self.primitives
            .get_mut(primitive.0 as usize)
            .filter(|entry| entry.alive)
            .ok_or(ToolkitError::PrimitiveNotFound(primitive))
    }

    fn interactive(&self, primitive: PrimitiveId, kind: PrimitiveKind) -> bool {
        self.live(primitive)
            .is_ok_and(|entry| entry.kind() == kind && entry.state == WidgetState::Normal)
    }

    fn new_window(&mut self, descriptor: WindowDescriptor, parent: Option<WindowId>) -> WindowId {
        let id = WindowId(self.windows.len() as u64);
        self.calls.push(ToolkitCall::CreateWindow {
            window: id,
            parent,
            title: descriptor.title.clone(),
        });
        tracing::trace!("headless: create {} ({})", id, descriptor.geometry());
        self.windows.push(HeadlessWindow {
            id,
            descriptor,
            parent,
            alive: true,
            bindings: Vec::new(),
            layout: Vec::new(),
        });
        id
    }

    // -- Event injection --

    /// Click a button. Disabled or destroyed buttons ignore the click.
    pub fn click(&mut self, primitive: PrimitiveId) -> bool {
        if !self.interactive(primitive, PrimitiveKind::Button) {
            return false;
        }
        self.events.push(ToolkitEvent::Command(primitive));
        true
    }

    /// Value `cell` will hold once the queued edits of `primitive` are applied.
    fn staged<T: Clone + 'static>(
        &self,
        primitive: PrimitiveId,
        cell: &ObservableCell<T>,
        pick: impl Fn(&CellWrite) -> Option<T>,
    ) -> T {
        self.events
            .iter()
            .filter_map(|event| match event {
                ToolkitEvent::Edited { primitive: id, write } if *id == primitive => pick(write),
                _ => None,
            })
            .last()
            .unwrap_or_else(|| cell.get())
    }

    fn staged_text(&self, primitive: PrimitiveId, cell: &StringCell) -> String {
        self.staged(primitive, cell, |write| match write {
            CellWrite::String { value, .. } => Some(value.clone()),
            CellWrite::Bool { .. } => None,
        })
    }

    fn staged_flag(&self, primitive: PrimitiveId, cell: &BoolCell) -> bool {
        self.staged(primitive, cell, |write| match write {
            CellWrite::Bool { value, .. } => Some(*value),
            CellWrite::String { .. } => None,
        })
    }

    /// Click a checkbox: queue the flipped value of its bound cell, then
    /// report the toggle.
    pub fn toggle_checkbox(&mut self, primitive: PrimitiveId) -> bool {
        if !self.interactive(primitive, PrimitiveKind::Checkbox) {
            return false;
        }
        let Ok(HeadlessPrimitive {
            spec: PrimitiveSpec::Checkbox { cell, .. },
            ..
        }) = self.live(primitive)
        else {
            return false;
        };

        let cell = cell.clone();
        let value = !self.staged_flag(primitive, &cell);
        self.events.push(ToolkitEvent::Edited {
            primitive,
            write: CellWrite::Bool { cell, value },
        });
        self.events.push(ToolkitEvent::Toggled(primitive));
        true
    }

    /// Type into an entry or text primitive.
    ///
    /// Text buffers change at once; an entry's cell changes when the queued
    /// edit is dispatched.
    pub fn type_text(&mut self, primitive: PrimitiveId, text: &str) -> bool {
        let Ok(entry) = self.live_mut(primitive) else {
            return false;
        };
        if entry.state != WidgetState::Normal {
            return false;
        }
        let cell = match &entry.spec {
            PrimitiveSpec::Entry { cell, .. } => cell.clone(),
            PrimitiveSpec::Text { .. } => {
                entry.buffer.push_str(text);
                return true;
            }
            _ => return false,
        };

        let mut value = self.staged_text(primitive, &cell);
        value.push_str(text);
        self.events.push(ToolkitEvent::Edited {
            primitive,
            write: CellWrite::String { cell, value },
        });
        true
    }

    /// Pick a choice in a dropdown. Unknown choices are ignored.
    pub fn select_option(&mut self, primitive: PrimitiveId, choice: &str) -> bool {
        if !self.interactive(primitive, PrimitiveKind::Dropdown) {
            return false;
        }
        let cell = match self.live(primitive) {
            Ok(HeadlessPrimitive {
                spec: PrimitiveSpec::Dropdown { choices, cell },
                ..
            }) if choices.iter().any(|c| c == choice) => cell.clone(),
            _ => return false,
        };

        self.events.push(ToolkitEvent::Edited {
            primitive,
            write: CellWrite::String {
                cell,
                value: choice.to_string(),
            },
        });
        true
    }

    /// Press a key in `window`. Only bound keys are reported.
    pub fn press_key(&mut self, window: WindowId, key: Key, modifiers: Modifiers) -> bool {
        let bound = self
            .window_ref(window)
            .is_ok_and(|entry| entry.bindings.iter().any(|b| b.matches(key, modifiers)));
        if bound {
            self.events.push(ToolkitEvent::Key {
                window,
                key,
                modifiers,
            });
        }
        bound
    }

    /// Ask for `window` to be closed, as the window manager's close button does.
    pub fn request_close(&mut self, window: WindowId) {
        self.events.push(ToolkitEvent::CloseRequested(window));
    }

    pub fn push_event(&mut self, event: ToolkitEvent) {
        self.events.push(event);
    }

    // -- Inspection --

    pub fn window(&self, window: WindowId) -> Option<&HeadlessWindow> {
        self.windows.get(window.0 as usize)
    }

    pub fn primitive(&self, primitive: PrimitiveId) -> Option<&HeadlessPrimitive> {
        self.primitives.get(primitive.0 as usize)
    }

    /// Live primitives of `window`, in creation order.
    pub fn primitives_in(&self, window: WindowId) -> Vec<PrimitiveId> {
        self.primitives
            .iter()
            .filter(|entry| entry.alive && entry.window == window)
            .map(|entry| entry.id)
            .collect()
    }

    /// Live packed primitives of `window`, in layout order.
    pub fn layout(&self, window: WindowId) -> Vec<PrimitiveId> {
        self.window(window)
            .map(|entry| entry.layout.clone())
            .unwrap_or_default()
    }

    /// First live primitive whose caption equals `caption`.
    pub fn find_by_caption(&self, caption: &str) -> Option<PrimitiveId> {
        self.primitives
            .iter()
            .find(|entry| entry.alive && entry.caption() == Some(caption))
            .map(|entry| entry.id)
    }

    pub fn live_primitive_count(&self) -> usize {
        self.primitives.iter().filter(|entry| entry.alive).count()
    }

    pub fn errors(&self) -> &[ShownError] {
        &self.errors
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<ToolkitCall> {
        self.calls.clone()
    }

    pub fn count_primitive_creates(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ToolkitCall::CreatePrimitive { .. }))
            .count()
    }

    pub fn count_state_changes(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ToolkitCall::SetState { .. }))
            .count()
    }

    pub fn count_clears(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ToolkitCall::Clear { .. }))
            .count()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Toolkit for HeadlessToolkit {
    fn create_window(&mut self, descriptor: WindowDescriptor) -> ToolkitResult<WindowId> {
        Ok(self.new_window(descriptor, None))
    }

    fn create_child_window(
        &mut self,
        parent: WindowId,
        descriptor: WindowDescriptor,
    ) -> ToolkitResult<WindowId> {
        self.window_ref(parent)?;
        Ok(self.new_window(descriptor, Some(parent)))
    }

    fn destroy_window(&mut self, window: WindowId) {
        if self.window_ref(window).is_err() {
            return;
        }

        // Collect the window and every live descendant.
        let mut doomed = vec![window];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor];
            doomed.extend(
                self.windows
                    .iter()
                    .filter(|entry| entry.alive && entry.parent == Some(current))
                    .map(|entry| entry.id),
            );
            cursor += 1;
        }

        for id in &doomed {
            self.windows[id.0 as usize].alive = false;
            self.calls.push(ToolkitCall::DestroyWindow(*id));
            tracing::trace!("headless: destroy {}", id);
        }
        for entry in self.primitives.iter_mut() {
            if doomed.contains(&entry.window) {
                entry.alive = false;
            }
        }

        let windows = &self.windows;
        let primitives = &self.primitives;
        self.events.retain(|event| match event {
            ToolkitEvent::Command(id)
            | ToolkitEvent::Toggled(id)
            | ToolkitEvent::Edited { primitive: id, .. } => primitives[id.0 as usize].alive,
            ToolkitEvent::Key { window, .. } | ToolkitEvent::CloseRequested(window) => {
                windows[window.0 as usize].alive
            }
        });
    }

    fn is_window_alive(&self, window: WindowId) -> bool {
        self.window_ref(window).is_ok()
    }

    fn create_primitive(
        &mut self,
        window: WindowId,
        spec: PrimitiveSpec,
    ) -> ToolkitResult<PrimitiveId> {
        self.window_ref(window)?;

        let id = PrimitiveId(self.primitives.len() as u64);
        self.calls.push(ToolkitCall::CreatePrimitive {
            primitive: id,
            window,
            kind: spec.kind(),
        });
        self.primitives.push(HeadlessPrimitive {
            id,
            window,
            spec,
            state: WidgetState::Normal,
            packed: None,
            alive: true,
            buffer: String::new(),
            progress_running: false,
        });
        Ok(id)
    }

    fn destroy_primitive(&mut self, primitive: PrimitiveId) -> ToolkitResult<()> {
        let entry = self.live_mut(primitive)?;
        entry.alive = false;
        let window = entry.window;
        if let Some(owner) = self.windows.get_mut(window.0 as usize) {
            owner.layout.retain(|id| *id != primitive);
        }
        self.calls.push(ToolkitCall::DestroyPrimitive(primitive));
        Ok(())
    }

    fn primitive_kind(&self, primitive: PrimitiveId) -> ToolkitResult<PrimitiveKind> {
        Ok(self.live(primitive)?.kind())
    }

    fn pack(&mut self, primitive: PrimitiveId, side: PackSide) -> ToolkitResult<()> {
        let entry = self.live_mut(primitive)?;
        let already_packed = entry.packed.is_some();
        entry.packed = Some(side);
        let window = entry.window;

        if !already_packed {
            self.window_mut(window)?.layout.push(primitive);
        }
        self.calls.push(ToolkitCall::Pack { primitive, side });
        Ok(())
    }

    fn state(&self, primitive: PrimitiveId) -> ToolkitResult<WidgetState> {
        Ok(self.live(primitive)?.state)
    }

    fn set_state(&mut self, primitive: PrimitiveId, state: WidgetState) -> ToolkitResult<()> {
        self.live_mut(primitive)?.state = state;
        self.calls.push(ToolkitCall::SetState { primitive, state });
        Ok(())
    }

    fn clear(
        &mut self,
        primitive: PrimitiveId,
        anchor: ClearAnchor,
    ) -> ToolkitResult<Option<CellWrite>> {
        let entry = self.live_mut(primitive)?;
        let kind = entry.kind();
        let invalid = ToolkitError::InvalidAnchor {
            primitive,
            kind,
            anchor,
        };

        let write = match (&entry.spec, anchor) {
            (PrimitiveSpec::Entry { cell, .. }, ClearAnchor::Offset(offset)) => {
                let value: String = cell.get().chars().take(offset).collect();
                Some(CellWrite::String {
                    cell: cell.clone(),
                    value,
                })
            }
            (PrimitiveSpec::Text { .. }, ClearAnchor::BufferStart) => {
                entry.buffer.clear();
                None
            }
            (PrimitiveSpec::Entry { .. } | PrimitiveSpec::Text { .. }, _) => return Err(invalid),
            _ => return Err(ToolkitError::NotClearable { primitive, kind }),
        };

        self.calls.push(ToolkitCall::Clear { primitive, anchor });
        Ok(write)
    }

    fn text(&self, primitive: PrimitiveId) -> ToolkitResult<String> {
        let entry = self.live(primitive)?;
        match entry.spec {
            PrimitiveSpec::Text { .. } => Ok(entry.buffer.clone()),
            _ => Err(ToolkitError::Unsupported {
                primitive,
                kind: entry.kind(),
                operation: "text buffers",
            }),
        }
    }

    fn set_text(&mut self, primitive: PrimitiveId, text: &str) -> ToolkitResult<()> {
        let entry = self.live_mut(primitive)?;
        match entry.spec {
            PrimitiveSpec::Text { .. } => {
                entry.buffer.clear();
                entry.buffer.push_str(text);
            }
            _ => {
                return Err(ToolkitError::Unsupported {
                    primitive,
                    kind: entry.kind(),
                    operation: "text buffers",
                });
            }
        }
        self.calls.push(ToolkitCall::SetText(primitive));
        Ok(())
    }

    fn bind_key(&mut self, window: WindowId, binding: KeyBinding) -> ToolkitResult<()> {
        let entry = self.window_mut(window)?;
        if !entry.bindings.contains(&binding) {
            entry.bindings.push(binding);
        }
        self.calls.push(ToolkitCall::BindKey { window, binding });
        Ok(())
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.calls.push(ToolkitCall::ShowError {
            title: title.to_string(),
            message: message.to_string(),
        });
        self.errors.push(ShownError {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn set_progress_running(&mut self, primitive: PrimitiveId, running: bool) -> ToolkitResult<()> {
        let entry = self.live_mut(primitive)?;
        if entry.kind() != PrimitiveKind::Progress {
            return Err(ToolkitError::Unsupported {
                primitive,
                kind: entry.kind(),
                operation: "progress animation",
            });
        }
        entry.progress_running = running;
        self.calls.push(ToolkitCall::SetProgress { primitive, running });
        Ok(())
    }

    fn next_event(&mut self) -> Option<ToolkitEvent> {
        let event = self.events.pop()?;
        tracing::trace!("headless: deliver {:?}", event);
        Some(event)
    }
}
