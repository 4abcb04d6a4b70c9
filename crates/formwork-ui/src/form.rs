//! The form facade.
//!
//! A [`Form`] owns one window and one [`Registry`]. Content is requested by
//! kind and comes back as a [`Handle`] plus a typed value accessor; every
//! later operation goes through the handle.
//!
//! # Example
//!
//! ```rust
//! use formwork_test_utils::HeadlessToolkit;
//! use formwork_ui::{Form, FormContext, Layout};
//!
//! let context = FormContext::new(HeadlessToolkit::shared());
//! let form = Form::new_root(&context, 500, 200, "parent").unwrap();
//!
//! let (name, cell) = form.add_entry("Name", Layout::default()).unwrap();
//! cell.set("Ada");
//! form.clear(name).unwrap();
//! assert_eq!(cell.get(), "");
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formwork_core::geometry::Size;
use formwork_toolkit::{
    BoolCell, CellWrite, KeyBinding, PackSide, PrimitiveId, PrimitiveSpec, ProgressMode,
    StringCell, WindowDescriptor, WindowId,
};

use crate::adapter::{Adapter, TextCell};
use crate::content::{Callback, ContentSpec, callback};
use crate::context::FormContext;
use crate::error::{FormError, FormResult};
use crate::factory::{self, Binding, Built};
use crate::handle::Handle;
use crate::registry::{ClearReport, Placement, Primitive, Registry, WidgetGroup};

/// Where and how big new content should be.
///
/// Converts from a [`Placement`] or a [`Size`], so either can be passed
/// directly to the `add_*` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    /// `None` uses the form's default placement.
    pub placement: Option<Placement>,
    /// `None` sizes the content from its caption.
    pub size: Option<Size>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deferred() -> Self {
        Self {
            placement: Some(Placement::Deferred),
            size: None,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }
}

impl From<Placement> for Layout {
    fn from(placement: Placement) -> Self {
        Self {
            placement: Some(placement),
            size: None,
        }
    }
}

impl From<Size> for Layout {
    fn from(size: Size) -> Self {
        Self {
            placement: None,
            size: Some(size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Active,
    Destroyed,
}

/// A form that has not created its window yet.
#[derive(Debug, Clone)]
pub struct FormBuilder {
    descriptor: WindowDescriptor,
    placement: Placement,
}

impl FormBuilder {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            descriptor: WindowDescriptor::new(width, height, title),
            placement: Placement::Pack,
        }
    }

    /// Default placement of content added without an explicit one.
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Create the form in a new top-level window.
    ///
    /// Any root window the context already has is destroyed first, together
    /// with its children.
    pub fn build_root(self, context: &Rc<FormContext>) -> FormResult<Form> {
        let window = {
            let mut toolkit = context.toolkit().borrow_mut();
            if let Some(previous) = context.root()
                && toolkit.is_window_alive(previous)
            {
                tracing::info!("Replacing root {}", previous);
                toolkit.destroy_window(previous);
            }
            toolkit.create_window(self.descriptor.clone())?
        };

        context.forget_destroyed();
        context.set_root(window);
        tracing::info!(
            "Created root {} \"{}\" ({})",
            window,
            self.descriptor.title,
            self.descriptor.geometry()
        );
        Ok(Form::assemble(context.clone(), window, self.placement))
    }

    /// Create the form in a window owned by `parent`. The parent is left
    /// untouched.
    pub fn build_child(self, parent: &Form) -> FormResult<Form> {
        parent.ensure_active()?;
        let context = parent.context.clone();
        let window = context
            .toolkit()
            .borrow_mut()
            .create_child_window(parent.window, self.descriptor.clone())?;

        tracing::info!(
            "Created {} \"{}\" ({}) under {}",
            window,
            self.descriptor.title,
            self.descriptor.geometry(),
            parent.window
        );
        Ok(Form::assemble(context, window, self.placement))
    }
}

/// A window plus the content created in it.
pub struct Form {
    context: Rc<FormContext>,
    window: WindowId,
    placement: Placement,
    registry: RefCell<Registry>,
    info: RefCell<Vec<PrimitiveId>>,
    progress: Cell<Option<PrimitiveId>>,
}

impl Form {
    fn assemble(context: Rc<FormContext>, window: WindowId, placement: Placement) -> Self {
        let registry = Registry::new(context.allocate_registry());
        Self {
            context,
            window,
            placement,
            registry: RefCell::new(registry),
            info: RefCell::new(Vec::new()),
            progress: Cell::new(None),
        }
    }

    pub fn builder(width: u32, height: u32, title: impl Into<String>) -> FormBuilder {
        FormBuilder::new(width, height, title)
    }

    /// Create a root form, replacing the context's previous root.
    pub fn new_root(
        context: &Rc<FormContext>,
        width: u32,
        height: u32,
        title: impl Into<String>,
    ) -> FormResult<Form> {
        FormBuilder::new(width, height, title).build_root(context)
    }

    /// Create a form whose window is a child of this form's window.
    pub fn generate_child(
        &self,
        width: u32,
        height: u32,
        title: impl Into<String>,
    ) -> FormResult<Form> {
        FormBuilder::new(width, height, title).build_child(self)
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn context(&self) -> &Rc<FormContext> {
        &self.context
    }

    pub fn state(&self) -> FormState {
        if self.context.toolkit().borrow().is_window_alive(self.window) {
            FormState::Active
        } else {
            FormState::Destroyed
        }
    }

    fn ensure_active(&self) -> FormResult<()> {
        match self.state() {
            FormState::Active => Ok(()),
            FormState::Destroyed => Err(FormError::WindowDestroyed(self.window)),
        }
    }

    // -- Content creation --

    /// Create the primitives of `built`, register them and attach its
    /// trigger to the element. Returns the handle and the element.
    ///
    /// If the element cannot be created the caption label is destroyed again.
    fn install(&self, built: Built, layout: Layout) -> FormResult<(Handle, PrimitiveId)> {
        self.ensure_active()?;
        let placement = layout.placement.unwrap_or(self.placement);
        let Built {
            tag,
            size,
            caption,
            element,
            trigger,
        } = built;

        let (handle, element, count) = {
            let mut toolkit = self.context.toolkit().borrow_mut();
            let mut primitives = Vec::with_capacity(2);
            if let Some(spec) = caption {
                let kind = spec.kind();
                let id = toolkit.create_primitive(self.window, spec)?;
                primitives.push(Primitive { id, kind });
            }

            let kind = element.kind();
            let element = match toolkit.create_primitive(self.window, element) {
                Ok(id) => id,
                Err(err) => {
                    for created in &primitives {
                        let _ = toolkit.destroy_primitive(created.id);
                    }
                    return Err(err.into());
                }
            };
            primitives.push(Primitive { id: element, kind });
            let count = primitives.len();

            let handle = self.registry.borrow_mut().register(
                &mut *toolkit,
                tag,
                size,
                primitives,
                placement,
            )?;
            (handle, element, count)
        };

        if let Some(trigger) = trigger {
            self.context
                .dispatcher()
                .borrow_mut()
                .attach(self.window, element, trigger);
        }

        tracing::debug!(
            "Added {} {} ({}, {} primitives) to {}",
            tag,
            handle,
            size,
            count,
            self.window
        );
        Ok((handle, element))
    }

    /// Add a button running `command` when clicked.
    ///
    /// Without a command no primitive is created: the returned handle is
    /// fresh but nothing is registered under it, so operations on it fail
    /// with [`FormError::UnknownHandle`].
    pub fn add_button(
        &self,
        caption: &str,
        command: Option<Callback>,
        layout: impl Into<Layout>,
    ) -> FormResult<Handle> {
        self.ensure_active()?;
        let layout = layout.into();
        match factory::button(caption, command, layout.size, self.context.config()) {
            Ok(built) => Ok(self.install(built, layout)?.0),
            Err(err @ FormError::MissingCallback { .. }) => Ok(self.skip_missing_callback(err)),
            Err(err) => Err(err),
        }
    }

    fn skip_missing_callback(&self, err: FormError) -> Handle {
        let handle = self.registry.borrow_mut().reserve();
        tracing::warn!("{}; {} left empty", err, handle);
        handle
    }

    pub fn add_label(&self, caption: &str, layout: impl Into<Layout>) -> FormResult<Handle> {
        let layout = layout.into();
        let built = factory::label(caption, layout.size, self.context.config());
        Ok(self.install(built, layout)?.0)
    }

    /// Add a caption and a single-line input. Only the width of an explicit
    /// size applies.
    pub fn add_entry(
        &self,
        caption: &str,
        layout: impl Into<Layout>,
    ) -> FormResult<(Handle, StringCell)> {
        let layout = layout.into();
        let (built, cell) = factory::entry(caption, layout.size, self.context.config());
        let (handle, _) = self.install(built, layout)?;
        Ok((handle, cell))
    }

    /// Add a word-wrapping multi-line input, with a caption above it when
    /// `caption` is not empty.
    pub fn add_text(&self, caption: &str, layout: impl Into<Layout>) -> FormResult<(Handle, TextCell)> {
        let layout = layout.into();
        let built = factory::text(caption, layout.size, self.context.config());
        let (handle, element) = self.install(built, layout)?;
        Ok((handle, TextCell::new(self.context.toolkit().clone(), element)))
    }

    /// Add a dropdown of `choices`. Its cell holds the placeholder until the
    /// user picks a choice.
    pub fn add_option_menu<I, S>(
        &self,
        caption: &str,
        choices: I,
        layout: impl Into<Layout>,
    ) -> FormResult<(Handle, StringCell)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let layout = layout.into();
        let choices = choices.into_iter().map(Into::into).collect();
        let (built, cell) = factory::options(caption, choices, layout.size, self.context.config());
        let (handle, _) = self.install(built, layout)?;
        Ok((handle, cell))
    }

    /// Add a checkbox, initially checked. Each toggle runs `on_checked` or
    /// `on_unchecked` depending on the new value.
    pub fn add_checkbox(
        &self,
        caption: &str,
        on_checked: impl Fn() + 'static,
        on_unchecked: impl Fn() + 'static,
        layout: impl Into<Layout>,
    ) -> FormResult<(Handle, BoolCell)> {
        let layout = layout.into();
        let (built, cell) = factory::checkbox(
            caption,
            callback(on_checked),
            callback(on_unchecked),
            layout.size,
            self.context.config(),
        );
        let (handle, _) = self.install(built, layout)?;
        Ok((handle, cell))
    }

    /// Add any kind of content.
    pub fn add(&self, spec: ContentSpec, layout: impl Into<Layout>) -> FormResult<(Handle, Adapter)> {
        self.ensure_active()?;
        let layout = layout.into();
        let (built, binding) = match factory::create(spec, layout.size, self.context.config()) {
            Ok(created) => created,
            Err(err @ FormError::MissingCallback { .. }) => {
                return Ok((self.skip_missing_callback(err), Adapter::Absent));
            }
            Err(err) => return Err(err),
        };

        let (handle, element) = self.install(built, layout)?;
        let adapter = match binding {
            Binding::String(cell) => Adapter::String(cell),
            Binding::Bool(cell) => Adapter::Bool(cell),
            Binding::Text => Adapter::Text(TextCell::new(self.context.toolkit().clone(), element)),
            Binding::Absent => Adapter::Absent,
        };
        Ok((handle, adapter))
    }

    // -- Group operations --

    pub fn enable(&self, handle: Handle) -> FormResult<()> {
        let mut toolkit = self.context.toolkit().borrow_mut();
        self.registry.borrow().enable(&mut *toolkit, handle)
    }

    pub fn disable(&self, handle: Handle) -> FormResult<()> {
        let mut toolkit = self.context.toolkit().borrow_mut();
        self.registry.borrow().disable(&mut *toolkit, handle)
    }

    /// Flip each primitive of the group from its own current state.
    pub fn toggle(&self, handle: Handle) -> FormResult<()> {
        let mut toolkit = self.context.toolkit().borrow_mut();
        self.registry.borrow().toggle(&mut *toolkit, handle)
    }

    /// Clear the content of the group. Labels are skipped; primitives that
    /// cannot be cleared are reported, not fatal.
    ///
    /// Watchers of cleared cells run after the toolkit is released, so they
    /// may use the form.
    pub fn clear(&self, handle: Handle) -> FormResult<ClearReport> {
        let (report, writes) = {
            let mut toolkit = self.context.toolkit().borrow_mut();
            self.registry.borrow().clear(&mut *toolkit, handle)?
        };
        writes.into_iter().for_each(CellWrite::apply);
        Ok(report)
    }

    pub fn clear_all(&self) -> ClearReport {
        let (report, writes) = {
            let mut toolkit = self.context.toolkit().borrow_mut();
            self.registry.borrow().clear_all(&mut *toolkit)
        };
        writes.into_iter().for_each(CellWrite::apply);
        report
    }

    /// Lay out a group added with deferred placement.
    pub fn pack(&self, handle: Handle) -> FormResult<()> {
        let mut toolkit = self.context.toolkit().borrow_mut();
        self.registry.borrow_mut().pack(&mut *toolkit, handle)
    }

    /// The primitives of a group, label first.
    pub fn primitives(&self, handle: Handle) -> FormResult<Vec<PrimitiveId>> {
        self.registry
            .borrow()
            .group(handle)
            .map(|group| group.ids().collect())
            .ok_or(FormError::UnknownHandle(handle))
    }

    pub fn group(&self, handle: Handle) -> Option<WidgetGroup> {
        self.registry.borrow().group(handle).cloned()
    }

    /// Handles of every registered group, in creation order.
    pub fn handles(&self) -> Vec<Handle> {
        self.registry.borrow().iter().map(|(handle, _)| handle).collect()
    }

    // -- Window services --

    /// Run `callback` whenever `sequence` is pressed in this window.
    ///
    /// Sequences use the `<Modifier-key>` notation: `"<Return>"`,
    /// `"<Control-s>"`, or a bare character such as `"q"`.
    pub fn bind(&self, sequence: &str, callback: impl Fn() + 'static) -> FormResult<()> {
        let binding = KeyBinding::parse(sequence)?;
        self.bind_key(binding, callback)
    }

    pub fn bind_key(&self, binding: KeyBinding, f: impl Fn() + 'static) -> FormResult<()> {
        self.ensure_active()?;
        self.context
            .toolkit()
            .borrow_mut()
            .bind_key(self.window, binding)?;
        self.context
            .dispatcher()
            .borrow_mut()
            .bind_key(self.window, binding, callback(f));
        tracing::debug!("Bound {} in {}", binding, self.window);
        Ok(())
    }

    /// Show a line of information at the bottom of the window, replacing the
    /// previous lines or appending to them.
    ///
    /// Lines are packed against the bottom edge, so each appended line sits
    /// above the lines shown before it.
    pub fn show_info(&self, text: &str, replace: bool) -> FormResult<()> {
        self.ensure_active()?;
        if replace {
            self.clear_info();
        }

        let mut toolkit = self.context.toolkit().borrow_mut();
        let label = toolkit.create_primitive(self.window, PrimitiveSpec::label(text))?;
        toolkit.pack(label, PackSide::Bottom)?;
        self.info.borrow_mut().push(label);
        Ok(())
    }

    /// [`Form::show_info`] with the configured replace behaviour.
    pub fn info(&self, text: &str) -> FormResult<()> {
        self.show_info(text, self.context.config().replace_info)
    }

    /// Remove every info line.
    pub fn clear_info(&self) {
        let lines = self.info.take();
        let mut toolkit = self.context.toolkit().borrow_mut();
        for label in lines {
            if let Err(err) = toolkit.destroy_primitive(label) {
                tracing::debug!("Info line already gone: {}", err);
            }
        }
    }

    pub fn info_lines(&self) -> Vec<PrimitiveId> {
        self.info.borrow().clone()
    }

    /// Show an error dialog.
    ///
    /// The message is padded so that narrow dialogs do not cut off the title.
    pub fn message_box(&self, message: &str, title: &str) {
        let padded = pad_message(message, title, self.context.config().message_title_padding);
        self.context.toolkit().borrow_mut().show_error(title, &padded);
    }

    /// Show a running indeterminate progress indicator at the bottom of the
    /// window. Does nothing if one is already running.
    pub fn start_progress(&self) -> FormResult<()> {
        self.ensure_active()?;
        let mut toolkit = self.context.toolkit().borrow_mut();

        if let Some(existing) = self.progress.get()
            && toolkit.primitive_kind(existing).is_ok()
        {
            tracing::debug!("Progress indicator {} already running", existing);
            return Ok(());
        }

        let progress = toolkit.create_primitive(
            self.window,
            PrimitiveSpec::Progress {
                mode: ProgressMode::Indeterminate,
                maximum: 100,
            },
        )?;
        toolkit.pack(progress, PackSide::Bottom)?;
        toolkit.set_progress_running(progress, true)?;
        self.progress.set(Some(progress));
        Ok(())
    }

    /// Stop and remove the progress indicator.
    pub fn stop_progress(&self) -> FormResult<()> {
        let Some(progress) = self.progress.take() else {
            tracing::warn!("No progress indicator running in {}", self.window);
            return Ok(());
        };

        let mut toolkit = self.context.toolkit().borrow_mut();
        toolkit.set_progress_running(progress, false)?;
        toolkit.destroy_primitive(progress)?;
        Ok(())
    }

    pub fn progress_running(&self) -> bool {
        self.progress.get().is_some()
    }

    /// Destroy the window, its content and every child window.
    pub fn destroy(&self) {
        tracing::info!("Destroying {}", self.window);
        self.context
            .toolkit()
            .borrow_mut()
            .destroy_window(self.window);
        self.context.forget_destroyed();
    }

    /// Run the event loop until the root window is closed.
    pub fn mainloop(&self) {
        self.context.run();
    }
}

/// Pad `message` with trailing spaces to at least `title + padding` chars.
fn pad_message(message: &str, title: &str, padding: usize) -> String {
    let width = (title.chars().count() + padding).max(message.chars().count());
    format!("{:<width$}", message, width = width)
}
