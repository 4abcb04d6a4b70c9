//! Formwork - declarative forms over desktop widget toolkits
//!
//! Formwork lets an application ask for typed content (buttons, entries,
//! text boxes, labels, option menus, checkboxes) without calling toolkit
//! construction code itself:
//!
//! - **Toolkit seam**: any backend implementing [`Toolkit`]
//! - **Forms**: one window, content addressed by opaque [`Handle`]s
//! - **Value cells**: shared, observable string and boolean cells
//! - **Bulk operations**: enable, disable, toggle and clear by handle
//! - **Event loop**: toolkit events dispatched to callbacks, re-entrantly
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "headless")] {
//! use formwork::prelude::*;
//!
//! let context = FormContext::new(HeadlessToolkit::shared());
//! let form = Form::new_root(&context, 500, 200, "parent").unwrap();
//!
//! let (_, name) = form.add_entry("Name", Layout::default()).unwrap();
//! form.add_button("Submit", Some(callback(move || println!("{}", name.get()))), Layout::default())
//!     .unwrap();
//!
//! form.mainloop();
//! # }
//! ```

pub mod application;

// Re-export sub-crates
pub use formwork_core as core;
pub use formwork_toolkit as toolkit;
pub use formwork_ui as ui;

#[cfg(feature = "headless")]
pub use formwork_test_utils as headless;

pub use application::ApplicationBuilder;
pub use formwork_core::{FormConfig, Size};
pub use formwork_toolkit::{Toolkit, ToolkitError, ToolkitEvent};
pub use formwork_ui::{
    Adapter, ClearReport, ContentSpec, ContentTag, Form, FormBuilder, FormContext, FormError,
    FormResult, FormState, Handle, Layout, Placement, TextCell,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::application::ApplicationBuilder;

    pub use formwork_core::{FormConfig, Size};

    pub use formwork_toolkit::{
        BoolCell, Key, KeyBinding, Modifiers, SharedToolkit, StringCell, Toolkit, WindowId,
    };

    pub use formwork_ui::{
        Adapter, ContentSpec, ContentTag, Form, FormBuilder, FormContext, FormError, FormResult,
        FormState, Handle, Layout, Placement, TextCell, callback,
    };

    #[cfg(feature = "headless")]
    pub use formwork_test_utils::HeadlessToolkit;
}
