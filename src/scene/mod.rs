//! Scene host boundary and the in-memory host used by the terminal UI.

pub mod assets;
pub mod camera;
pub mod host;
pub mod memory;

pub use assets::{
    AssetLoader, Catalogue, CatalogueEntry, CatalogueLoader, FallbackLoader, FsAssetLoader,
    LoadedAsset,
};
pub use camera::{Camera, Ray};
pub use host::{SceneHost, VisualHandle};
pub use memory::{InMemoryScene, Visual};
