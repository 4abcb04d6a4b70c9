//! Formwork UI - declarative forms over a desktop widget toolkit
//!
//! Content is requested by kind and comes back as an opaque [`Handle`] plus a
//! typed value accessor:
//! - Buttons, labels, entries, text boxes, option menus and checkboxes
//! - Composite groups (a caption label and its input share one handle)
//! - Bulk state operations by handle: enable, disable, toggle, clear
//! - Key bindings, info lines, error dialogs and a progress indicator
//!
//! ## Quick Start
//!
//! ```rust
//! # use formwork_test_utils::HeadlessToolkit;
//! use formwork_ui::{Form, FormContext, Layout};
//!
//! # let toolkit = HeadlessToolkit::shared();
//! let context = FormContext::new(toolkit);
//! let form = Form::new_root(&context, 500, 200, "parent").unwrap();
//!
//! let (_, name) = form.add_entry("Name", Layout::default()).unwrap();
//! let (_, color) = form
//!     .add_option_menu("Color", ["red", "green"], Layout::default())
//!     .unwrap();
//! let (agree, _) = form
//!     .add_checkbox("Agree", || {}, || {}, Layout::default())
//!     .unwrap();
//! form.disable(agree).unwrap();
//!
//! assert_eq!(name.get(), "");
//! assert_eq!(color.get(), "choose an option");
//!
//! // Blocks until the root window is closed.
//! form.mainloop();
//! ```

pub mod adapter;
pub mod content;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod factory;
pub mod form;
pub mod handle;
pub mod registry;

pub use adapter::{Adapter, TextCell};
pub use content::{Callback, ContentSpec, ContentTag, callback};
pub use context::FormContext;
pub use dispatcher::Dispatcher;
pub use error::{FormError, FormResult};
pub use form::{Form, FormBuilder, FormState, Layout};
pub use handle::Handle;
pub use registry::{ClearFailure, ClearReport, Placement, Primitive, Registry, WidgetGroup};

// Re-export the toolkit types that appear in the form API
pub use formwork_core::{FormConfig, Size};
pub use formwork_toolkit::{
    BoolCell, Key, KeyBinding, Modifiers, ObservableCell, PrimitiveId, PrimitiveKind,
    SharedToolkit, StringCell, Toolkit, ToolkitError, WindowId,
};
