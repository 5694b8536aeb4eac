pub mod element;
pub mod volume;

pub use element::{
    ArchitecturalElement, ElementId, ElementKind, ElementParams, ElementState, FurnitureParams,
    Material, SlabParams, WallParams,
};
pub use volume::{Aabb, Extents, VolumeSpec};
