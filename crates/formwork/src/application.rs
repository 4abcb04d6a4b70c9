//! High-level builder for starting a form application.
//!
//! Installs logging, creates the form context and the root form, lets the
//! caller fill the form, then runs the event loop.

use std::rc::Rc;

use formwork_core::{FormConfig, logging};
use formwork_toolkit::SharedToolkit;
use formwork_ui::{Form, FormContext, FormResult};

/// Builder for a single-root form application.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "headless")] {
/// use formwork::prelude::*;
///
/// ApplicationBuilder::new()
///     .with_title("parent")
///     .with_size(500, 200)
///     .run(HeadlessToolkit::shared(), |form| {
///         form.add_label("Hello", Layout::default())?;
///         Ok(())
///     })
///     .unwrap();
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationBuilder {
    title: String,
    size: (u32, u32),
    config: FormConfig,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationBuilder {
    /// Defaults: title "Formwork", 400x300, default [`FormConfig`].
    pub fn new() -> Self {
        Self {
            title: "Formwork".to_string(),
            size: (400, 300),
            config: FormConfig::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the root form on `toolkit`, hand it to `build`, then block in
    /// the event loop until the root window is closed.
    pub fn run(
        self,
        toolkit: SharedToolkit,
        build: impl FnOnce(&Rc<Form>) -> FormResult<()>,
    ) -> FormResult<()> {
        logging::init_with(&self.config);

        let (width, height) = self.size;
        let context = FormContext::with_config(toolkit, self.config);
        let form = Rc::new(Form::new_root(&context, width, height, self.title)?);

        build(&form)?;
        form.mainloop();
        tracing::info!("Application finished");
        Ok(())
    }
}
