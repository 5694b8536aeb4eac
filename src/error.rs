//! Error types for the BIM configurator.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::{ElementId, ElementKind};

/// Errors raised by the parametric element builder.
///
/// Out-of-range dimensions are never errors, they are replaced by defaults
/// and reported as [`crate::builder::ParameterWarning`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// Wall endpoints coincide on the ground plane.
    #[error("degenerate geometry: wall endpoints coincide at ({x:.3}, {z:.3})")]
    DegenerateGeometry { x: f64, z: f64 },

    /// A wall endpoint has a NaN or infinite coordinate.
    #[error("wall {endpoint} point is not finite")]
    NonFiniteEndpoint { endpoint: &'static str },

    /// The wall length does not fit in an `f64`.
    #[error("wall endpoints are too far apart to measure")]
    LengthOverflow,

    /// Parameter changes were aimed at an element of another kind.
    #[error("cannot apply {found} changes to {expected} element")]
    KindMismatch {
        expected: ElementKind,
        found: ElementKind,
    },
}

/// Errors returned when the session rejects a command.
///
/// A rejected command never changes session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No element with this id was ever created in the session.
    #[error("unknown element {id}")]
    UnknownElement { id: ElementId },

    /// The element was removed and can no longer be targeted.
    #[error("element {id} has been removed")]
    ElementRemoved { id: ElementId },

    /// The command needs a selected element.
    #[error("no element is selected")]
    NothingSelected,

    /// The command targets the newest live element but the scene is empty.
    #[error("the scene has no live elements")]
    EmptyScene,

    /// The command needs the element to be in edit mode.
    #[error("element {id} is not being edited")]
    NotEditing { id: ElementId },

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Asset(#[from] AssetLoadError),
}

/// Errors raised while resolving a furniture asset.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    /// The asset was not found under any of the searched roots.
    #[error("asset '{path}' not found (searched: {searched})")]
    NotFound { path: String, searched: String },

    /// The asset exists but could not be read.
    #[error("failed to read asset '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that can occur when loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The TOML is malformed or has the wrong shape.
    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The `[camera]` section cannot produce picking rays.
    #[error("invalid camera in '{path}': {reason}")]
    InvalidCamera { path: PathBuf, reason: &'static str },
}

/// Errors that can occur when loading a command script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Failed to read the script file from disk.
    #[error("failed to read script '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The script is not a valid JSON command list.
    #[error("invalid script: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}
