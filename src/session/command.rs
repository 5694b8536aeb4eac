use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::builder::{ParameterChanges, ParameterWarning};
use crate::model::{ElementId, Material};

/// Element a command applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The currently selected element.
    #[default]
    Selected,
    /// The most recently created element that is still live.
    Last,
    Id(ElementId),
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Target::Id(id)
    }
}

/// A user action, dispatched through [`super::Session::dispatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    AddWall {
        start: Point3<f64>,
        end: Point3<f64>,
        height: f64,
        thickness: f64,
        #[serde(default)]
        material: Option<Material>,
    },
    AddSlab {
        width: f64,
        depth: f64,
        thickness: f64,
        #[serde(default)]
        material: Option<Material>,
    },
    PlaceFurniture {
        source_path: String,
        #[serde(default)]
        position_x: f64,
        #[serde(default)]
        position_z: f64,
        #[serde(default)]
        material: Option<Material>,
    },
    Select {
        #[serde(default)]
        target: Target,
    },
    /// Hit-test a screen coordinate through the session camera.
    Pick {
        x: f64,
        y: f64,
        viewport_width: f64,
        viewport_height: f64,
    },
    /// Hit-test straight down onto a plan position.
    PickPlan { x: f64, z: f64 },
    /// Hit-test along an explicit world ray.
    PickRay {
        origin: Point3<f64>,
        direction: Vector3<f64>,
    },
    Deselect,
    BeginEdit {
        #[serde(default)]
        target: Target,
    },
    /// Stage changes without touching geometry.
    EditElement {
        #[serde(default)]
        target: Target,
        #[serde(default)]
        changes: Option<ParameterChanges>,
        #[serde(default)]
        material: Option<Material>,
    },
    ApplyEdit {
        #[serde(default)]
        target: Target,
    },
    CancelEdit {
        #[serde(default)]
        target: Target,
    },
    Remove {
        #[serde(default)]
        target: Target,
    },
    ClearScene,
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Created {
        id: ElementId,
        warnings: Vec<ParameterWarning>,
    },
    Selected {
        id: ElementId,
    },
    Deselected,
    NothingPicked,
    EditStarted {
        id: ElementId,
    },
    Staged {
        id: ElementId,
    },
    Regenerated {
        id: ElementId,
        warnings: Vec<ParameterWarning>,
    },
    EditCancelled {
        id: ElementId,
    },
    Removed {
        id: ElementId,
    },
    Cleared {
        count: usize,
    },
}

impl Outcome {
    /// Substitution warnings carried by the outcome, if any.
    #[must_use]
    pub fn warnings(&self) -> &[ParameterWarning] {
        match self {
            Outcome::Created { warnings, .. } | Outcome::Regenerated { warnings, .. } => warnings,
            _ => &[],
        }
    }
}
