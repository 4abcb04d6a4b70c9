use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::CellWrite;
use crate::error::ToolkitResult;
use crate::event::ToolkitEvent;
use crate::keys::KeyBinding;
use crate::primitive::{ClearAnchor, PackSide, PrimitiveId, PrimitiveKind, PrimitiveSpec, WidgetState};
use crate::window::{WindowDescriptor, WindowId};

/// A toolkit shared by every form, cell and dispatcher on the UI thread.
pub type SharedToolkit = Rc<RefCell<dyn Toolkit>>;

/// Operations a desktop widget toolkit provides to the form layer.
///
/// All calls happen on the thread that runs the event loop. Implementations
/// must not invoke caller code from inside any method, and writing a bound
/// cell counts since it runs the cell's watchers. User input, edits of bound
/// values included, is reported through [`Toolkit::next_event`] and
/// dispatched by the caller, which lets callbacks call back into the toolkit
/// without re-entrancy hazards.
pub trait Toolkit {
    /// Create a top-level window.
    fn create_window(&mut self, descriptor: WindowDescriptor) -> ToolkitResult<WindowId>;

    /// Create a window owned by `parent`. Destroying the parent destroys it.
    fn create_child_window(
        &mut self,
        parent: WindowId,
        descriptor: WindowDescriptor,
    ) -> ToolkitResult<WindowId>;

    /// Destroy a window, its primitives and all of its child windows.
    /// Destroying an unknown or already destroyed window does nothing.
    fn destroy_window(&mut self, window: WindowId);

    fn is_window_alive(&self, window: WindowId) -> bool;

    /// Build a primitive inside `window`. The primitive is not laid out until
    /// it is packed.
    fn create_primitive(
        &mut self,
        window: WindowId,
        spec: PrimitiveSpec,
    ) -> ToolkitResult<PrimitiveId>;

    fn destroy_primitive(&mut self, primitive: PrimitiveId) -> ToolkitResult<()>;

    fn primitive_kind(&self, primitive: PrimitiveId) -> ToolkitResult<PrimitiveKind>;

    /// Lay a primitive out against one edge of its window.
    fn pack(&mut self, primitive: PrimitiveId, side: PackSide) -> ToolkitResult<()>;

    fn state(&self, primitive: PrimitiveId) -> ToolkitResult<WidgetState>;

    fn set_state(&mut self, primitive: PrimitiveId, state: WidgetState) -> ToolkitResult<()>;

    /// Delete content from `anchor` to the end.
    ///
    /// Content held in a bound cell is not touched: the returned write
    /// carries the new value and the caller applies it once the toolkit is
    /// released. Fails for kinds without editable content and for anchors
    /// the kind cannot address (a single-line entry has no start-of-buffer
    /// marker).
    fn clear(
        &mut self,
        primitive: PrimitiveId,
        anchor: ClearAnchor,
    ) -> ToolkitResult<Option<CellWrite>>;

    /// Full content of a multi-line text primitive.
    fn text(&self, primitive: PrimitiveId) -> ToolkitResult<String>;

    /// Replace the content of a multi-line text primitive.
    fn set_text(&mut self, primitive: PrimitiveId, text: &str) -> ToolkitResult<()>;

    /// Start reporting `binding` as [`ToolkitEvent::Key`] for `window`.
    fn bind_key(&mut self, window: WindowId, binding: KeyBinding) -> ToolkitResult<()>;

    /// Show a modal error dialog.
    fn show_error(&mut self, title: &str, message: &str);

    /// Start or stop animating a progress primitive.
    fn set_progress_running(&mut self, primitive: PrimitiveId, running: bool) -> ToolkitResult<()>;

    /// Wait for the next user event.
    ///
    /// Returns `None` once the toolkit has nothing left to deliver, which
    /// ends the event loop.
    fn next_event(&mut self) -> Option<ToolkitEvent>;
}
