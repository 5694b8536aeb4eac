use std::collections::BTreeMap;

use super::{Ray, SceneHost, VisualHandle};
use crate::model::{ElementId, Material, VolumeSpec};

/// A box placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub owner: ElementId,
    pub volume: VolumeSpec,
    pub material: Material,
}

/// Scene host that keeps visuals in memory and hit-tests them analytically.
#[derive(Debug, Default)]
pub struct InMemoryScene {
    visuals: BTreeMap<VisualHandle, Visual>,
    next_handle: u64,
}

impl InMemoryScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, handle: VisualHandle) -> Option<&Visual> {
        self.visuals.get(&handle)
    }

    /// Visuals in placement order.
    pub fn visuals(&self) -> impl Iterator<Item = (VisualHandle, &Visual)> {
        self.visuals.iter().map(|(h, v)| (*h, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}

impl SceneHost for InMemoryScene {
    fn place_volume(
        &mut self,
        owner: ElementId,
        volume: &VolumeSpec,
        material: Material,
    ) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.visuals.insert(
            handle,
            Visual {
                owner,
                volume: *volume,
                material,
            },
        );
        tracing::trace!(%handle, %owner, "placed visual");
        handle
    }

    fn remove_volume(&mut self, handle: VisualHandle) -> bool {
        let removed = self.visuals.remove(&handle).is_some();
        tracing::trace!(%handle, removed, "removed visual");
        removed
    }

    fn pick(&self, ray: &Ray) -> Option<ElementId> {
        self.visuals
            .values()
            .filter_map(|v| {
                v.volume
                    .ray_distance(&ray.origin, &ray.direction)
                    .map(|t| (t, v.owner))
            })
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, owner)| owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{compute_slab_volume, compute_wall_volume};
    use nalgebra::Point3;
    use pretty_assertions::assert_eq;

    #[test]
    fn handles_are_never_reused() {
        let mut scene = InMemoryScene::new();
        let id = ElementId::new();
        let v = compute_slab_volume(5.0, 5.0, 0.2);
        let a = scene.place_volume(id, &v, Material::SLAB);
        assert!(scene.remove_volume(a));
        let b = scene.place_volume(id, &v, Material::SLAB);
        assert_ne!(a, b);
        assert!(!scene.remove_volume(a));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn pick_returns_nearest_hit() {
        let mut scene = InMemoryScene::new();
        let slab = ElementId::new();
        let wall = ElementId::new();
        scene.place_volume(slab, &compute_slab_volume(10.0, 10.0, 0.2), Material::SLAB);
        let wall_volume =
            compute_wall_volume(&Point3::new(-2.0, 0.0, 0.0), &Point3::new(2.0, 0.0, 0.0), 3.0, 0.2)
                .unwrap();
        scene.place_volume(wall, &wall_volume, Material::WALL);

        assert_eq!(scene.pick(&Ray::vertical(0.0, 0.0)), Some(wall));
        assert_eq!(scene.pick(&Ray::vertical(0.0, 3.0)), Some(slab));
        assert_eq!(scene.pick(&Ray::vertical(20.0, 20.0)), None);
    }
}
