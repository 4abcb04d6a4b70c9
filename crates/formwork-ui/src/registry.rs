//! Widget registry: handle to widget group bookkeeping and bulk operations.

use std::fmt;

use formwork_core::geometry::Size;
use formwork_core::profiling::profile_function;
use formwork_toolkit::{
    CellWrite, PackSide, PrimitiveId, PrimitiveKind, Toolkit, ToolkitError, WidgetState,
};
use indexmap::IndexMap;
use thiserror::Error;

use crate::content::ContentTag;
use crate::error::{FormError, FormResult};
use crate::handle::Handle;

/// One toolkit primitive belonging to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    pub id: PrimitiveId,
    pub kind: PrimitiveKind,
}

/// Whether a group is laid out as soon as it is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Pack,
    /// Left out of the layout until [`Registry::pack`] is called.
    Deferred,
}

/// The primitives created for one content request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetGroup {
    pub tag: ContentTag,
    pub size: Size,
    /// Label first when present, interactive element last.
    pub primitives: Vec<Primitive>,
    pub packed: bool,
}

impl WidgetGroup {
    pub fn ids(&self) -> impl Iterator<Item = PrimitiveId> + '_ {
        self.primitives.iter().map(|primitive| primitive.id)
    }
}

/// A primitive that could not be cleared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("can't clear {kind} {primitive}: {source}")]
pub struct ClearFailure {
    pub primitive: PrimitiveId,
    pub kind: PrimitiveKind,
    pub source: ToolkitError,
}

/// Outcome of a clear over one or more groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub cleared: Vec<PrimitiveId>,
    /// Static labels, left untouched.
    pub skipped: Vec<PrimitiveId>,
    pub failures: Vec<ClearFailure>,
}

impl ClearReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn merge(&mut self, other: ClearReport) {
        self.cleared.extend(other.cleared);
        self.skipped.extend(other.skipped);
        self.failures.extend(other.failures);
    }

    /// The cleared primitives, or the first failure.
    pub fn into_result(self) -> Result<Vec<PrimitiveId>, ClearFailure> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure),
            None => Ok(self.cleared),
        }
    }
}

impl fmt::Display for ClearReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cleared, {} skipped, {} failed",
            self.cleared.len(),
            self.skipped.len(),
            self.failures.len()
        )
    }
}

/// Tracks the widget groups of one form.
///
/// Groups live as long as the registry; there is no per-group removal.
/// Handles are issued in increasing order and never reused.
#[derive(Debug)]
pub struct Registry {
    id: u32,
    next_index: u32,
    groups: IndexMap<Handle, WidgetGroup>,
}

impl Registry {
    /// Create an empty registry. `id` must be unique among the registries
    /// whose handles may meet.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            next_index: 0,
            groups: IndexMap::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Issue a fresh handle without storing anything under it.
    pub fn reserve(&mut self) -> Handle {
        let handle = Handle::new(self.id, self.next_index);
        self.next_index += 1;
        handle
    }

    /// Store `primitives` under a fresh handle, packing them unless
    /// `placement` defers layout.
    pub fn register(
        &mut self,
        toolkit: &mut dyn Toolkit,
        tag: ContentTag,
        size: Size,
        primitives: Vec<Primitive>,
        placement: Placement,
    ) -> FormResult<Handle> {
        profile_function!();
        debug_assert!(!primitives.is_empty(), "widget groups are never empty");

        let packed = placement == Placement::Pack;
        if packed {
            for primitive in &primitives {
                toolkit.pack(primitive.id, PackSide::Top)?;
            }
        }

        let handle = self.reserve();
        self.groups.insert(
            handle,
            WidgetGroup {
                tag,
                size,
                primitives,
                packed,
            },
        );
        Ok(handle)
    }

    pub fn group(&self, handle: Handle) -> Option<&WidgetGroup> {
        self.groups.get(&handle)
    }

    fn lookup(&self, handle: Handle) -> FormResult<&WidgetGroup> {
        self.groups
            .get(&handle)
            .ok_or(FormError::UnknownHandle(handle))
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.groups.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &WidgetGroup)> + '_ {
        self.groups.iter().map(|(handle, group)| (*handle, group))
    }

    fn set_state(
        &self,
        toolkit: &mut dyn Toolkit,
        handle: Handle,
        state: WidgetState,
    ) -> FormResult<()> {
        profile_function!();
        for id in self.lookup(handle)?.ids() {
            toolkit.set_state(id, state)?;
        }
        Ok(())
    }

    pub fn enable(&self, toolkit: &mut dyn Toolkit, handle: Handle) -> FormResult<()> {
        self.set_state(toolkit, handle, WidgetState::Normal)
    }

    pub fn disable(&self, toolkit: &mut dyn Toolkit, handle: Handle) -> FormResult<()> {
        self.set_state(toolkit, handle, WidgetState::Disabled)
    }

    /// Flip every primitive of the group from its own current state.
    ///
    /// Primitives are flipped independently, so a group whose primitives
    /// disagree ends up inverted element by element rather than uniform.
    pub fn toggle(&self, toolkit: &mut dyn Toolkit, handle: Handle) -> FormResult<()> {
        profile_function!();
        for id in self.lookup(handle)?.ids() {
            let state = toolkit.state(id)?;
            toolkit.set_state(id, state.flipped())?;
        }
        Ok(())
    }

    /// Clear the content of every non-label primitive of the group.
    ///
    /// Per-primitive failures are logged and collected; the remaining
    /// primitives are still cleared. Bound cells are not written here: the
    /// returned writes must be applied once the toolkit is released.
    pub fn clear(
        &self,
        toolkit: &mut dyn Toolkit,
        handle: Handle,
    ) -> FormResult<(ClearReport, Vec<CellWrite>)> {
        let group = self.lookup(handle)?;
        let mut writes = Vec::new();
        let report = clear_group(toolkit, group, &mut writes);
        Ok((report, writes))
    }

    /// Clear every group, in creation order.
    pub fn clear_all(&self, toolkit: &mut dyn Toolkit) -> (ClearReport, Vec<CellWrite>) {
        profile_function!();
        let mut report = ClearReport::default();
        let mut writes = Vec::new();
        for group in self.groups.values() {
            report.merge(clear_group(toolkit, group, &mut writes));
        }
        (report, writes)
    }

    /// Lay out a group registered with [`Placement::Deferred`]. Packing an
    /// already packed group does nothing.
    pub fn pack(&mut self, toolkit: &mut dyn Toolkit, handle: Handle) -> FormResult<()> {
        let group = self
            .groups
            .get_mut(&handle)
            .ok_or(FormError::UnknownHandle(handle))?;
        if group.packed {
            return Ok(());
        }
        for primitive in &group.primitives {
            toolkit.pack(primitive.id, PackSide::Top)?;
        }
        group.packed = true;
        Ok(())
    }
}

fn clear_group(
    toolkit: &mut dyn Toolkit,
    group: &WidgetGroup,
    writes: &mut Vec<CellWrite>,
) -> ClearReport {
    profile_function!();
    let mut report = ClearReport::default();

    for primitive in &group.primitives {
        if primitive.kind.is_static() {
            report.skipped.push(primitive.id);
            continue;
        }

        match toolkit.clear(primitive.id, primitive.kind.clear_anchor()) {
            Ok(write) => {
                writes.extend(write);
                report.cleared.push(primitive.id);
            }
            Err(source) => {
                tracing::warn!("can't clear {} {}: {}", primitive.kind, primitive.id, source);
                report.failures.push(ClearFailure {
                    primitive: primitive.id,
                    kind: primitive.kind,
                    source,
                });
            }
        }
    }

    report
}
