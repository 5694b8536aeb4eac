use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Extents, VolumeSpec};

/// Opaque element identifier, generated once at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, enough to tell elements apart in a list.
    #[must_use]
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Wall,
    Slab,
    Furniture,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Wall => "Wall",
            ElementKind::Slab => "Slab",
            ElementKind::Furniture => "Furniture",
        };
        f.write_str(name)
    }
}

/// Lifecycle state of a placed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementState {
    Created,
    Selected,
    Editing,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallParams {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub height: f64,
    pub thickness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabParams {
    pub width: f64,
    pub depth: f64,
    pub thickness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureParams {
    pub source_path: String,
    pub position_x: f64,
    pub position_z: f64,
    /// Bounds of the loaded asset. Fixed at placement time.
    pub bounds: Extents,
}

/// Parameter set of an element, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementParams {
    Wall(WallParams),
    Slab(SlabParams),
    Furniture(FurnitureParams),
}

impl ElementParams {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementParams::Wall(_) => ElementKind::Wall,
            ElementParams::Slab(_) => ElementKind::Slab,
            ElementParams::Furniture(_) => ElementKind::Furniture,
        }
    }
}

/// RGB colour of an element, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Material {
    pub color: u32,
}

impl Material {
    pub const WALL: Material = Material { color: 0x0080_8080 };
    pub const SLAB: Material = Material { color: 0x0040_4040 };
    pub const FURNITURE: Material = Material { color: 0x00C8_A165 };

    #[must_use]
    pub fn new(color: u32) -> Self {
        Self {
            color: color & 0x00FF_FFFF,
        }
    }

    #[must_use]
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Wall => Self::WALL,
            ElementKind::Slab => Self::SLAB,
            ElementKind::Furniture => Self::FURNITURE,
        }
    }

    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        let [_, r, g, b] = self.color.to_be_bytes();
        (r, g, b)
    }

    /// Parses `#RRGGBB`, `0xRRGGBB` or bare hex.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Self::new)
    }
}

impl From<u32> for Material {
    fn from(color: u32) -> Self {
        Self::new(color)
    }
}

impl From<Material> for u32 {
    fn from(material: Material) -> Self {
        material.color
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.color)
    }
}

/// One placed volumetric element.
///
/// `volume` is always the builder's output for the current `params`.
#[derive(Debug, Clone, Serialize)]
pub struct ArchitecturalElement {
    pub id: ElementId,
    pub state: ElementState,
    pub params: ElementParams,
    pub material: Material,
    pub volume: VolumeSpec,
}

impl ArchitecturalElement {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.params.kind()
    }

    /// Wall length derived from the current endpoints.
    #[must_use]
    pub fn length(&self) -> Option<f64> {
        match &self.params {
            ElementParams::Wall(wall) => Some(nalgebra::distance(&wall.start, &wall.end)),
            _ => None,
        }
    }

    /// Placement point of the element. Furniture sits on the ground plane.
    #[must_use]
    pub fn placement(&self) -> Point3<f64> {
        match &self.params {
            ElementParams::Furniture(f) => Point3::new(f.position_x, 0.0, f.position_z),
            _ => self.volume.center,
        }
    }

    /// Short label for lists, e.g. `Wall 5.00 m`.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.params {
            ElementParams::Wall(_) => format!("Wall {:.2} m", self.length().unwrap_or(0.0)),
            ElementParams::Slab(s) => format!("Slab {:.2} × {:.2} m", s.width, s.depth),
            ElementParams::Furniture(f) => {
                let name = f
                    .source_path
                    .rsplit('/')
                    .next()
                    .unwrap_or(&f.source_path);
                format!("Furniture {name}")
            }
        }
    }
}
