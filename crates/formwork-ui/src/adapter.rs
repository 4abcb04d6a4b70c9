//! Typed value accessors handed back with created content.

use std::fmt;

use formwork_toolkit::{BoolCell, PrimitiveId, SharedToolkit, StringCell};

use crate::error::FormResult;

/// Accessor for the buffer of a multi-line text input.
///
/// Unlike the string cells, a text buffer is owned by the toolkit; every
/// `get` reads the live content.
#[derive(Clone)]
pub struct TextCell {
    toolkit: SharedToolkit,
    primitive: PrimitiveId,
}

impl TextCell {
    pub(crate) fn new(toolkit: SharedToolkit, primitive: PrimitiveId) -> Self {
        Self { toolkit, primitive }
    }

    /// Full content of the buffer.
    pub fn get(&self) -> FormResult<String> {
        Ok(self.toolkit.borrow().text(self.primitive)?)
    }

    /// Replace the content of the buffer.
    pub fn set(&self, text: &str) -> FormResult<()> {
        Ok(self.toolkit.borrow_mut().set_text(self.primitive, text)?)
    }

    pub fn primitive(&self) -> PrimitiveId {
        self.primitive
    }
}

impl fmt::Debug for TextCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextCell")
            .field("primitive", &self.primitive)
            .finish_non_exhaustive()
    }
}

/// The value accessor bound to a piece of content.
#[derive(Debug, Clone, Default)]
pub enum Adapter {
    /// Entry input or option menu selection.
    String(StringCell),
    /// Checkbox state.
    Bool(BoolCell),
    /// Multi-line text buffer.
    Text(TextCell),
    /// Buttons and labels carry no value.
    #[default]
    Absent,
}

impl Adapter {
    pub fn as_string(&self) -> Option<&StringCell> {
        match self {
            Adapter::String(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<&BoolCell> {
        match self {
            Adapter::Bool(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextCell> {
        match self {
            Adapter::Text(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Adapter::Absent)
    }
}
