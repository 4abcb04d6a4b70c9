//! Opaque handles to widget groups.

use std::fmt;
use std::num::NonZeroU64;

use static_assertions::assert_eq_size;

/// Handle to a widget group created through a form.
///
/// The high 32 bits hold the id of the registry that issued the handle, the
/// low 32 bits its index plus one. Indices are never reused within a
/// registry and registry ids are unique within a [`crate::FormContext`], so a
/// handle from one form is never valid in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(NonZeroU64);

assert_eq_size!(Handle, u64);
assert_eq_size!(Handle, Option<Handle>);

impl Handle {
    pub(crate) fn new(registry: u32, index: u32) -> Self {
        debug_assert!(index < u32::MAX, "handle index space exhausted");
        let packed = ((registry as u64) << 32) | index as u64;
        Self(NonZeroU64::MIN.saturating_add(packed))
    }

    /// Id of the registry that issued this handle.
    pub fn registry(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }

    /// Position of this handle in its registry's issue order.
    pub fn index(&self) -> u32 {
        (self.0.get() & u32::MAX as u64) as u32 - 1
    }

    pub fn to_bits(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle#{}:{}", self.registry(), self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_packing() {
        let handle = Handle::new(3, 0);
        assert_eq!(handle.registry(), 3);
        assert_eq!(handle.index(), 0);
        assert_eq!(handle.to_bits(), (3 << 32) | 1);

        let handle = Handle::new(u32::MAX, u32::MAX - 1);
        assert_eq!(handle.registry(), u32::MAX);
        assert_eq!(handle.index(), u32::MAX - 1);
    }

    #[test]
    fn test_handles_differ_across_registries() {
        assert_ne!(Handle::new(0, 5), Handle::new(1, 5));
        assert_eq!(Handle::new(2, 7).to_string(), "handle#2:7");
    }
}
