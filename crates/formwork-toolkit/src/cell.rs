//! Observable value cells shared between a primitive and its caller.
//!
//! A cell is a reference-counted slot: the toolkit writes into it when the
//! user types or clicks, and the caller reads or writes the same slot through
//! its own clone. Watchers run after every `set`.
//!
//! Watchers are caller code, so a toolkit never writes a cell while it is
//! borrowed. It hands back a [`CellWrite`] instead, which the caller applies
//! once the toolkit is released.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Watcher<T> = Rc<dyn Fn(&T)>;

struct CellInner<T> {
    value: RefCell<T>,
    watchers: RefCell<Vec<Watcher<T>>>,
}

/// A shared, observable value.
///
/// Cloning a cell yields another view of the same value, never a copy.
pub struct ObservableCell<T> {
    inner: Rc<CellInner<T>>,
}

/// String-valued cell bound to entries and option menus.
pub type StringCell = ObservableCell<String>;

/// Boolean-valued cell bound to checkboxes.
pub type BoolCell = ObservableCell<bool>;

impl<T: Clone + 'static> ObservableCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(CellInner {
                value: RefCell::new(value),
                watchers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Store a new value and notify watchers.
    pub fn set(&self, value: impl Into<T>) {
        let value = value.into();
        *self.inner.value.borrow_mut() = value.clone();

        // Watchers may set the cell again; iterate over a snapshot.
        let watchers = self.inner.watchers.borrow().clone();
        for watcher in watchers {
            watcher(&value);
        }
    }

    /// Apply `f` to the current value in place, then notify watchers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let value = {
            let mut slot = self.inner.value.borrow_mut();
            f(&mut slot);
            slot.clone()
        };
        let watchers = self.inner.watchers.borrow().clone();
        for watcher in watchers {
            watcher(&value);
        }
    }

    /// Register a callback invoked with the new value after every change.
    pub fn watch(&self, watcher: impl Fn(&T) + 'static) {
        self.inner.watchers.borrow_mut().push(Rc::new(watcher));
    }

    /// Whether both cells are views of the same slot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for ObservableCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default + Clone + 'static> Default for ObservableCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObservableCell")
            .field(&*self.inner.value.borrow())
            .finish()
    }
}

/// A value a toolkit wants stored in a bound cell.
#[derive(Debug, Clone)]
pub enum CellWrite {
    String { cell: StringCell, value: String },
    Bool { cell: BoolCell, value: bool },
}

impl CellWrite {
    /// Store the value, running the cell's watchers.
    pub fn apply(self) {
        match self {
            CellWrite::String { cell, value } => cell.set(value),
            CellWrite::Bool { cell, value } => cell.set(value),
        }
    }
}

// Two writes are equal when they target the same slot with the same value.
impl PartialEq for CellWrite {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                CellWrite::String { cell: a, value: x },
                CellWrite::String { cell: b, value: y },
            ) => a.ptr_eq(b) && x == y,
            (CellWrite::Bool { cell: a, value: x }, CellWrite::Bool { cell: b, value: y }) => {
                a.ptr_eq(b) && x == y
            }
            _ => false,
        }
    }
}

impl Eq for CellWrite {}
