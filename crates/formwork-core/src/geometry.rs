use std::fmt;

/// Widget size measured in character cells (width) and text lines (height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }

    /// Heuristic size for a caption: one cell per character plus `padding`.
    ///
    /// This is not a measured layout; it only gives the toolkit a sensible
    /// starting width when the caller did not ask for one.
    pub fn fit_caption(caption: &str, padding: u32, height: u32) -> Self {
        let chars = u32::try_from(caption.chars().count()).unwrap_or(u32::MAX);
        Size {
            width: chars.saturating_add(padding),
            height,
        }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Size { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
