use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formwork_core::FormConfig;
use formwork_core::profiling::{self, profile_function};
use formwork_toolkit::{SharedToolkit, ToolkitEvent, WindowId};

use crate::dispatcher::Dispatcher;

/// State shared by every form of one application.
///
/// Holds the toolkit, the current root window, the callback dispatcher and
/// the configuration. Forms keep an `Rc` to their context.
pub struct FormContext {
    toolkit: SharedToolkit,
    root: Cell<Option<WindowId>>,
    dispatcher: RefCell<Dispatcher>,
    config: FormConfig,
    next_registry: Cell<u32>,
}

impl FormContext {
    pub fn new(toolkit: SharedToolkit) -> Rc<Self> {
        Self::with_config(toolkit, FormConfig::default())
    }

    pub fn with_config(toolkit: SharedToolkit, config: FormConfig) -> Rc<Self> {
        Rc::new(Self {
            toolkit,
            root: Cell::new(None),
            dispatcher: RefCell::new(Dispatcher::new()),
            config,
            next_registry: Cell::new(0),
        })
    }

    pub fn toolkit(&self) -> &SharedToolkit {
        &self.toolkit
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// The current root window, if one was created.
    pub fn root(&self) -> Option<WindowId> {
        self.root.get()
    }

    pub(crate) fn set_root(&self, window: WindowId) {
        self.root.set(Some(window));
    }

    pub(crate) fn dispatcher(&self) -> &RefCell<Dispatcher> {
        &self.dispatcher
    }

    pub(crate) fn allocate_registry(&self) -> u32 {
        let id = self.next_registry.get();
        self.next_registry.set(id + 1);
        id
    }

    /// Drop the callbacks of every window the toolkit no longer has,
    /// including children destroyed along with their parent.
    pub(crate) fn forget_destroyed(&self) {
        let toolkit = self.toolkit.borrow();
        let dropped = self
            .dispatcher
            .borrow_mut()
            .retain_windows(|window| toolkit.is_window_alive(window));
        if dropped > 0 {
            tracing::debug!("Dropped {} callbacks of destroyed windows", dropped);
        }
    }

    /// Whether the root window exists and has not been destroyed.
    pub fn root_alive(&self) -> bool {
        self.root
            .get()
            .is_some_and(|root| self.toolkit.borrow().is_window_alive(root))
    }

    /// Handle one toolkit event.
    ///
    /// No borrow of the toolkit or the dispatcher is held while the
    /// resolved callback runs.
    pub fn dispatch(&self, event: ToolkitEvent) {
        profile_function!();

        match event {
            ToolkitEvent::CloseRequested(window) => {
                tracing::info!("Closing {}", window);
                self.toolkit.borrow_mut().destroy_window(window);
                self.forget_destroyed();
                return;
            }
            ToolkitEvent::Edited { write, .. } => {
                write.apply();
                return;
            }
            _ => {}
        }

        let callback = self.dispatcher.borrow().resolve(&event);
        match callback {
            Some(callback) => callback(),
            None => tracing::trace!("No callback for {:?}", event),
        }
    }

    /// Pump toolkit events until the root window is destroyed or the toolkit
    /// has nothing left to deliver.
    pub fn run(&self) {
        tracing::debug!("Entering event loop");
        while self.root_alive() {
            let event = self.toolkit.borrow_mut().next_event();
            let Some(event) = event else {
                break;
            };
            self.dispatch(event);
            profiling::new_frame();
        }
        tracing::debug!("Event loop finished");
    }
}
