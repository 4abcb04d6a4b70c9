//! Primitive widget descriptions.
//!
//! A primitive is one native element (a label, a button, an input...). The
//! form layer composes several primitives into one content group.

use std::fmt;

use formwork_core::geometry::Size;

use crate::cell::{BoolCell, StringCell};

/// Identifier of a primitive inside a toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimitiveId(pub u64);

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive#{}", self.0)
    }
}

/// The kinds of primitive a toolkit must be able to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Static text.
    Label,
    /// Clickable button.
    Button,
    /// Single-line text input.
    Entry,
    /// Multi-line text input.
    Text,
    /// Drop-down selection.
    Dropdown,
    /// Boolean toggle.
    Checkbox,
    /// Progress indicator.
    Progress,
}

impl PrimitiveKind {
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Label => "label",
            PrimitiveKind::Button => "button",
            PrimitiveKind::Entry => "entry",
            PrimitiveKind::Text => "text",
            PrimitiveKind::Dropdown => "dropdown",
            PrimitiveKind::Checkbox => "checkbox",
            PrimitiveKind::Progress => "progress",
        }
    }

    /// Static labels carry no user content.
    pub const fn is_static(self) -> bool {
        matches!(self, PrimitiveKind::Label)
    }

    /// Where content deletion has to start for this kind.
    ///
    /// Multi-line buffers are addressed by line/column and clear from the
    /// start-of-buffer marker; every other kind clears from offset zero.
    pub const fn clear_anchor(self) -> ClearAnchor {
        match self {
            PrimitiveKind::Text => ClearAnchor::BufferStart,
            _ => ClearAnchor::Offset(0),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Interactive state of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetState {
    #[default]
    Normal,
    Disabled,
}

impl WidgetState {
    pub const fn flipped(self) -> Self {
        match self {
            WidgetState::Normal => WidgetState::Disabled,
            WidgetState::Disabled => WidgetState::Normal,
        }
    }
}

/// Start position of a content deletion; deletion always runs to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClearAnchor {
    /// First line, first column of a multi-line buffer.
    BufferStart,
    /// Character offset into single-line content.
    Offset(usize),
}

impl fmt::Display for ClearAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClearAnchor::BufferStart => f.write_str("1.0"),
            ClearAnchor::Offset(offset) => write!(f, "{}", offset),
        }
    }
}

/// Which edge of the window a packed primitive stacks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackSide {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    None,
    Char,
    #[default]
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgressMode {
    Determinate,
    #[default]
    Indeterminate,
}

/// Construction parameters for one primitive.
#[derive(Debug, Clone)]
pub enum PrimitiveSpec {
    Label {
        caption: String,
        size: Option<Size>,
    },
    Button {
        caption: String,
        size: Size,
    },
    Entry {
        width: u32,
        cell: StringCell,
    },
    Text {
        size: Size,
        wrap: WrapMode,
    },
    Dropdown {
        choices: Vec<String>,
        cell: StringCell,
    },
    Checkbox {
        caption: String,
        cell: BoolCell,
    },
    Progress {
        mode: ProgressMode,
        maximum: u32,
    },
}

impl PrimitiveSpec {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveSpec::Label { .. } => PrimitiveKind::Label,
            PrimitiveSpec::Button { .. } => PrimitiveKind::Button,
            PrimitiveSpec::Entry { .. } => PrimitiveKind::Entry,
            PrimitiveSpec::Text { .. } => PrimitiveKind::Text,
            PrimitiveSpec::Dropdown { .. } => PrimitiveKind::Dropdown,
            PrimitiveSpec::Checkbox { .. } => PrimitiveKind::Checkbox,
            PrimitiveSpec::Progress { .. } => PrimitiveKind::Progress,
        }
    }

    pub fn label(caption: impl Into<String>) -> Self {
        PrimitiveSpec::Label {
            caption: caption.into(),
            size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_anchor_per_kind() {
        assert_eq!(PrimitiveKind::Text.clear_anchor(), ClearAnchor::BufferStart);
        assert_eq!(PrimitiveKind::Entry.clear_anchor(), ClearAnchor::Offset(0));
        assert_eq!(PrimitiveKind::Button.clear_anchor(), ClearAnchor::Offset(0));
    }

    #[test]
    fn test_state_flip() {
        assert_eq!(WidgetState::Normal.flipped(), WidgetState::Disabled);
        assert_eq!(WidgetState::Disabled.flipped(), WidgetState::Normal);
    }

    #[test]
    fn test_spec_kind() {
        assert_eq!(PrimitiveSpec::label("Name").kind(), PrimitiveKind::Label);
        let entry = PrimitiveSpec::Entry {
            width: 9,
            cell: StringCell::default(),
        };
        assert_eq!(entry.kind(), PrimitiveKind::Entry);
    }
}
