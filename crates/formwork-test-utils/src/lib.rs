//! Test utilities for Formwork.
//!
//! The main component is [`HeadlessToolkit`], an in-memory implementation of
//! [`formwork_toolkit::Toolkit`]. It builds no native widgets; it keeps just
//! enough state to behave like a desktop toolkit (enabled state, text
//! buffers, bound cells, window parenting with cascading destruction) and
//! records every call for verification.
//!
//! # Example
//!
//! ```rust
//! use formwork_test_utils::HeadlessToolkit;
//! use formwork_toolkit::{PrimitiveSpec, Toolkit, WindowDescriptor};
//!
//! let mut toolkit = HeadlessToolkit::new();
//! let window = toolkit.create_window(WindowDescriptor::new(300, 200, "test")).unwrap();
//! let label = toolkit.create_primitive(window, PrimitiveSpec::label("Hello")).unwrap();
//!
//! assert_eq!(toolkit.count_primitive_creates(), 1);
//! assert_eq!(toolkit.find_by_caption("Hello"), Some(label));
//! ```
//!
//! Events are injected with the `click`, `toggle_checkbox`, `type_text`,
//! `press_key` and `request_close` helpers and drained by
//! [`Toolkit::next_event`]. When the queue is empty `next_event` returns
//! `None`, so a form's event loop returns instead of blocking. Edits of
//! bound cells travel through the queue as well, so a cell changes only when
//! the event loop applies the edit.

pub mod headless;

pub use headless::{HeadlessPrimitive, HeadlessToolkit, HeadlessWindow, ShownError, ToolkitCall};
