use std::fmt;

use formwork_core::geometry::Size;

/// Identifier of a toolkit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Parameters for creating a window.
///
/// Window sizes are in pixels, unlike primitive sizes which count cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDescriptor {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowDescriptor {
    fn default() -> Self {
        Self {
            title: "Formwork".to_string(),
            width: 400,
            height: 300,
        }
    }
}

impl WindowDescriptor {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width,
            height,
        }
    }

    /// Geometry string in the `WIDTHxHEIGHT` form most toolkits accept.
    pub fn geometry(&self) -> String {
        Size::new(self.width, self.height).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_string() {
        let desc = WindowDescriptor::new(500, 200, "parent");
        assert_eq!(desc.geometry(), "500x200");
        assert_eq!(desc.title, "parent");
    }
}
