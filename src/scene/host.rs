use serde::Serialize;
use std::fmt;

use super::Ray;
use crate::model::{ElementId, Material, VolumeSpec};

/// Handle to a visual placed in a scene host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VisualHandle(pub u64);

impl fmt::Display for VisualHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "visual#{}", self.0)
    }
}

/// What the session needs from whatever renders the elements.
///
/// Visuals are never patched in place: regeneration removes the old handle
/// and places a new one.
pub trait SceneHost {
    /// Materializes a box visual for `owner` and returns its handle.
    fn place_volume(
        &mut self,
        owner: ElementId,
        volume: &VolumeSpec,
        material: Material,
    ) -> VisualHandle;

    /// Releases a visual. Returns `false` when the handle is unknown.
    fn remove_volume(&mut self, handle: VisualHandle) -> bool;

    /// Owner of the nearest visual hit by `ray`.
    fn pick(&self, ray: &Ray) -> Option<ElementId>;
}
