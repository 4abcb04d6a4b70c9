//! Content factory.
//!
//! Turns a content request into the ordered primitive specs the toolkit
//! should build, the computed size and the value binding. The factory never
//! touches the toolkit; [`crate::Form`] creates and registers what it returns.
//!
//! A group is an optional caption label followed by one element. Callbacks
//! are attached to the element.

use std::fmt;

use formwork_core::FormConfig;
use formwork_core::geometry::Size;
use formwork_core::profiling::profile_function;
use formwork_toolkit::{BoolCell, PrimitiveSpec, StringCell, WrapMode};

use crate::content::{Callback, ContentSpec, ContentTag};
use crate::error::{FormError, FormResult};

/// What runs when the interactive primitive of a group fires.
#[derive(Clone)]
pub enum Trigger {
    /// Button click.
    Command(Callback),
    /// Checkbox toggle: one branch per state of `cell`.
    Branches {
        cell: BoolCell,
        on_checked: Callback,
        on_unchecked: Callback,
    },
}

impl Trigger {
    /// The callback to run now. Checkbox branches are chosen by the current
    /// value of the bound cell.
    pub fn resolve(&self) -> Callback {
        match self {
            Trigger::Command(command) => command.clone(),
            Trigger::Branches {
                cell,
                on_checked,
                on_unchecked,
            } => {
                if cell.get() {
                    on_checked.clone()
                } else {
                    on_unchecked.clone()
                }
            }
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Command(_) => f.write_str("Command"),
            Trigger::Branches { cell, .. } => f.debug_tuple("Branches").field(&cell.get()).finish(),
        }
    }
}

/// Value binding of built content, before its primitives exist.
#[derive(Debug, Clone)]
pub enum Binding {
    String(StringCell),
    Bool(BoolCell),
    /// Bound to the buffer of the element once it is created.
    Text,
    Absent,
}

/// Everything needed to create one widget group.
#[derive(Debug)]
pub struct Built {
    pub tag: ContentTag,
    pub size: Size,
    /// Caption label created before the element.
    pub caption: Option<PrimitiveSpec>,
    pub element: PrimitiveSpec,
    pub trigger: Option<Trigger>,
}

impl Built {
    fn new(tag: ContentTag, size: Size, element: PrimitiveSpec) -> Self {
        Self {
            tag,
            size,
            caption: None,
            element,
            trigger: None,
        }
    }

    fn with_label(mut self, caption: &str) -> Self {
        self.caption = Some(PrimitiveSpec::label(caption));
        self
    }

    /// Label only when `caption` is not empty.
    fn with_caption_label(self, caption: &str) -> Self {
        if caption.is_empty() {
            self
        } else {
            self.with_label(caption)
        }
    }

    fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn primitive_count(&self) -> usize {
        usize::from(self.caption.is_some()) + 1
    }

    /// Primitive specs in creation order.
    pub fn specs(&self) -> impl Iterator<Item = &PrimitiveSpec> + '_ {
        self.caption.iter().chain(std::iter::once(&self.element))
    }
}

/// Explicit size wins; otherwise the caption length plus padding by the
/// default height.
pub fn resolve_size(caption: &str, size: Option<Size>, config: &FormConfig) -> Size {
    size.unwrap_or_else(|| Size::fit_caption(caption, config.size_padding, config.default_height))
}

/// A clickable button. Fails with [`FormError::MissingCallback`] when no
/// command is given.
pub fn button(
    caption: &str,
    command: Option<Callback>,
    size: Option<Size>,
    config: &FormConfig,
) -> FormResult<Built> {
    profile_function!();
    let Some(command) = command else {
        return Err(FormError::MissingCallback {
            tag: ContentTag::Button,
        });
    };

    let size = resolve_size(caption, size, config);
    let element = PrimitiveSpec::Button {
        caption: caption.to_string(),
        size,
    };
    Ok(Built::new(ContentTag::Button, size, element).with_trigger(Trigger::Command(command)))
}

/// A static caption.
pub fn label(caption: &str, size: Option<Size>, config: &FormConfig) -> Built {
    profile_function!();
    let size = resolve_size(caption, size, config);
    let element = PrimitiveSpec::Label {
        caption: caption.to_string(),
        size: Some(size),
    };
    Built::new(ContentTag::Label, size, element)
}

/// A caption label, always present, followed by a single-line input.
///
/// Only the width of the size applies to the input.
pub fn entry(caption: &str, size: Option<Size>, config: &FormConfig) -> (Built, StringCell) {
    profile_function!();
    let size = resolve_size(caption, size, config);
    let cell = StringCell::default();
    let element = PrimitiveSpec::Entry {
        width: size.width,
        cell: cell.clone(),
    };
    (Built::new(ContentTag::Entry, size, element).with_label(caption), cell)
}

/// An optional caption label followed by a word-wrapping multi-line input.
pub fn text(caption: &str, size: Option<Size>, config: &FormConfig) -> Built {
    profile_function!();
    let size = resolve_size(caption, size, config);
    let element = PrimitiveSpec::Text {
        size,
        wrap: WrapMode::Word,
    };
    Built::new(ContentTag::Text, size, element).with_caption_label(caption)
}

/// An optional caption label followed by a dropdown of `choices`.
///
/// The bound cell starts at the configured placeholder, not at a choice.
pub fn options(
    caption: &str,
    choices: Vec<String>,
    size: Option<Size>,
    config: &FormConfig,
) -> (Built, StringCell) {
    profile_function!();
    let size = resolve_size(caption, size, config);
    let cell = StringCell::new(config.options_placeholder.clone());
    let element = PrimitiveSpec::Dropdown {
        choices,
        cell: cell.clone(),
    };
    (Built::new(ContentTag::Options, size, element).with_caption_label(caption), cell)
}

/// A checkbox bound to a cell that starts checked.
pub fn checkbox(
    caption: &str,
    on_checked: Callback,
    on_unchecked: Callback,
    size: Option<Size>,
    config: &FormConfig,
) -> (Built, BoolCell) {
    profile_function!();
    let size = resolve_size(caption, size, config);
    let cell = BoolCell::new(true);
    let element = PrimitiveSpec::Checkbox {
        caption: caption.to_string(),
        cell: cell.clone(),
    };
    let built = Built::new(ContentTag::Checkbox, size, element).with_trigger(Trigger::Branches {
        cell: cell.clone(),
        on_checked,
        on_unchecked,
    });
    (built, cell)
}

/// Build any kind of content.
pub fn create(
    spec: ContentSpec,
    size: Option<Size>,
    config: &FormConfig,
) -> FormResult<(Built, Binding)> {
    let built = match spec {
        ContentSpec::Button { caption, command } => {
            (button(&caption, command, size, config)?, Binding::Absent)
        }
        ContentSpec::Label { caption } => (label(&caption, size, config), Binding::Absent),
        ContentSpec::Entry { caption } => {
            let (built, cell) = entry(&caption, size, config);
            (built, Binding::String(cell))
        }
        ContentSpec::Text { caption } => (text(&caption, size, config), Binding::Text),
        ContentSpec::Options { caption, choices } => {
            let (built, cell) = options(&caption, choices, size, config);
            (built, Binding::String(cell))
        }
        ContentSpec::Checkbox {
            caption,
            on_checked,
            on_unchecked,
        } => {
            let (built, cell) = checkbox(&caption, on_checked, on_unchecked, size, config);
            (built, Binding::Bool(cell))
        }
    };
    Ok(built)
}
