//! The toolkit seam of Formwork.
//!
//! Everything a form needs from a desktop widget toolkit is expressed by the
//! [`Toolkit`] trait: windows, the six primitive kinds, observable value
//! cells, an error dialog, a progress indicator and an event pump. Backends
//! implement the trait; the form layer never calls toolkit-specific
//! construction code directly.

pub mod cell;
pub mod error;
pub mod event;
pub mod keys;
pub mod primitive;
pub mod toolkit;
pub mod window;

pub use cell::{BoolCell, CellWrite, ObservableCell, StringCell};
pub use error::{KeyParseError, ToolkitError, ToolkitResult};
pub use event::{EventQueue, ToolkitEvent};
pub use keys::{Key, KeyBinding, Modifiers};
pub use primitive::{
    ClearAnchor, PackSide, PrimitiveId, PrimitiveKind, PrimitiveSpec, ProgressMode, WidgetState,
    WrapMode,
};
pub use toolkit::{SharedToolkit, Toolkit};
pub use window::{WindowDescriptor, WindowId};
