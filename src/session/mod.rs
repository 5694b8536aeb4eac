//! Element records and the command handler driving their lifecycle.
//!
//! ```text
//! Created ──select──▶ Selected ──begin/edit──▶ Editing
//!    ▲                  │   ▲                    │
//!    └───select other───┘   └──apply / cancel────┘
//!
//! any live state ──remove / clear──▶ Removed (terminal)
//! ```

pub mod command;

pub use command::{Command, Outcome, Target};

use crate::builder::{self, Built, Defaults};
use crate::error::{BuildError, SessionError};
use crate::model::{
    ArchitecturalElement, ElementId, ElementParams, ElementState, FurnitureParams, Material,
    SlabParams, WallParams,
};
use crate::scene::{AssetLoader, Camera, Ray, SceneHost, VisualHandle};

/// Unapplied edits of the element being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub id: ElementId,
    pub params: ElementParams,
    pub material: Material,
}

#[derive(Debug)]
struct ElementRecord {
    element: ArchitecturalElement,
    handle: Option<VisualHandle>,
}

/// Interactive session state: the elements placed in one scene host.
///
/// Every mutation goes through [`Session::dispatch`]. A command that fails
/// leaves the session exactly as it was.
pub struct Session<H: SceneHost> {
    host: H,
    loader: Box<dyn AssetLoader>,
    defaults: Defaults,
    camera: Camera,
    records: Vec<ElementRecord>,
    selection: Option<ElementId>,
    draft: Option<Draft>,
}

impl<H: SceneHost> Session<H> {
    pub fn new(host: H, loader: Box<dyn AssetLoader>) -> Self {
        Self {
            host,
            loader,
            defaults: Defaults::default(),
            camera: Camera::default(),
            records: Vec::new(),
            selection: None,
            draft: None,
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, SessionError> {
        tracing::debug!(?command, "dispatch");
        match command {
            Command::AddWall {
                start,
                end,
                height,
                thickness,
                material,
            } => self.add(
                ElementParams::Wall(WallParams {
                    start,
                    end,
                    height,
                    thickness,
                }),
                material.unwrap_or(Material::WALL),
            ),
            Command::AddSlab {
                width,
                depth,
                thickness,
                material,
            } => self.add(
                ElementParams::Slab(SlabParams {
                    width,
                    depth,
                    thickness,
                }),
                material.unwrap_or(Material::SLAB),
            ),
            Command::PlaceFurniture {
                source_path,
                position_x,
                position_z,
                material,
            } => self.place_furniture(&source_path, position_x, position_z, material),
            Command::Select { target } => {
                let id = self.resolve(target)?;
                Ok(self.select(id))
            }
            Command::Pick {
                x,
                y,
                viewport_width,
                viewport_height,
            } => match self
                .camera
                .ray_from_screen(x, y, viewport_width, viewport_height)
            {
                Some(ray) => Ok(self.pick(&ray)),
                None => Ok(self.pick_nothing()),
            },
            Command::PickPlan { x, z } => Ok(self.pick(&Ray::vertical(x, z))),
            Command::PickRay { origin, direction } => Ok(self.pick(&Ray { origin, direction })),
            Command::Deselect => Ok(self.deselect()),
            Command::BeginEdit { target } => {
                let id = self.resolve(target)?;
                Ok(self.begin_edit(id))
            }
            Command::EditElement {
                target,
                changes,
                material,
            } => {
                let id = self.resolve(target)?;
                self.stage(id, changes.as_ref(), material)
            }
            Command::ApplyEdit { target } => {
                let id = self.resolve(target)?;
                self.apply(id)
            }
            Command::CancelEdit { target } => {
                let id = self.resolve(target)?;
                self.cancel(id)
            }
            Command::Remove { target } => {
                let id = self.resolve(target)?;
                Ok(self.remove(id))
            }
            Command::ClearScene => Ok(self.clear()),
        }
    }

    /// Live elements in creation order.
    pub fn elements(&self) -> impl Iterator<Item = &ArchitecturalElement> {
        self.records
            .iter()
            .map(|r| &r.element)
            .filter(|e| e.state != ElementState::Removed)
    }

    /// Any element ever created in this session, removed ones included.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&ArchitecturalElement> {
        self.records
            .iter()
            .find(|r| r.element.id == id)
            .map(|r| &r.element)
    }

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ArchitecturalElement> {
        self.selection.and_then(|id| self.element(id))
    }

    #[must_use]
    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Volume the current draft would produce if applied now.
    #[must_use]
    pub fn preview(&self) -> Option<Result<Built, BuildError>> {
        self.draft
            .as_ref()
            .map(|d| builder::build(&d.params, &self.defaults))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Visual currently representing `id`.
    #[must_use]
    pub fn handle_of(&self, id: ElementId) -> Option<VisualHandle> {
        self.records
            .iter()
            .find(|r| r.element.id == id)
            .and_then(|r| r.handle)
    }

    fn resolve(&self, target: Target) -> Result<ElementId, SessionError> {
        let id = match target {
            Target::Selected => self.selection.ok_or(SessionError::NothingSelected)?,
            Target::Last => self
                .elements()
                .last()
                .map(|e| e.id)
                .ok_or(SessionError::EmptyScene)?,
            Target::Id(id) => id,
        };
        match self.element(id) {
            None => Err(SessionError::UnknownElement { id }),
            Some(e) if e.state == ElementState::Removed => Err(SessionError::ElementRemoved { id }),
            Some(_) => Ok(id),
        }
    }

    fn record_mut(&mut self, id: ElementId) -> Option<&mut ElementRecord> {
        self.records.iter_mut().find(|r| r.element.id == id)
    }

    fn set_state(&mut self, id: ElementId, state: ElementState) {
        if let Some(record) = self.record_mut(id) {
            record.element.state = state;
        }
    }

    fn add(&mut self, params: ElementParams, material: Material) -> Result<Outcome, SessionError> {
        let built = builder::build(&params, &self.defaults)?;
        let id = ElementId::new();
        let handle = self.host.place_volume(id, &built.volume, material);
        let element = ArchitecturalElement {
            id,
            state: ElementState::Created,
            params: built.params,
            material,
            volume: built.volume,
        };
        tracing::info!(%id, kind = %element.kind(), "element created");
        self.records.push(ElementRecord {
            element,
            handle: Some(handle),
        });
        Ok(Outcome::Created {
            id,
            warnings: built.warnings,
        })
    }

    fn place_furniture(
        &mut self,
        source_path: &str,
        position_x: f64,
        position_z: f64,
        material: Option<Material>,
    ) -> Result<Outcome, SessionError> {
        let asset = self.loader.load(source_path)?;
        self.add(
            ElementParams::Furniture(FurnitureParams {
                source_path: asset.path,
                position_x,
                position_z,
                bounds: asset.bounds,
            }),
            material.unwrap_or(Material::FURNITURE),
        )
    }

    fn select(&mut self, id: ElementId) -> Outcome {
        if self.selection == Some(id) {
            return Outcome::Selected { id };
        }
        self.deselect();
        self.selection = Some(id);
        self.set_state(id, ElementState::Selected);
        tracing::info!(%id, "element selected");
        Outcome::Selected { id }
    }

    fn deselect(&mut self) -> Outcome {
        if let Some(previous) = self.selection.take() {
            if self.draft.take().is_some() {
                tracing::debug!(id = %previous, "discarding unapplied edits");
            }
            self.set_state(previous, ElementState::Created);
        }
        Outcome::Deselected
    }

    fn pick(&mut self, ray: &Ray) -> Outcome {
        match self.host.pick(ray) {
            Some(id) => self.select(id),
            None => self.pick_nothing(),
        }
    }

    fn pick_nothing(&mut self) -> Outcome {
        self.deselect();
        Outcome::NothingPicked
    }

    fn begin_edit(&mut self, id: ElementId) -> Outcome {
        if matches!(&self.draft, Some(d) if d.id == id) {
            return Outcome::EditStarted { id };
        }
        self.select(id);
        let (params, material) = match self.element(id) {
            Some(e) => (e.params.clone(), e.material),
            None => return Outcome::EditStarted { id },
        };
        self.draft = Some(Draft {
            id,
            params,
            material,
        });
        self.set_state(id, ElementState::Editing);
        tracing::info!(%id, "editing element");
        Outcome::EditStarted { id }
    }

    fn stage(
        &mut self,
        id: ElementId,
        changes: Option<&builder::ParameterChanges>,
        material: Option<Material>,
    ) -> Result<Outcome, SessionError> {
        let expected = self
            .element(id)
            .map(ArchitecturalElement::kind)
            .ok_or(SessionError::UnknownElement { id })?;
        if let Some(changes) = changes {
            if changes.kind() != expected {
                return Err(BuildError::KindMismatch {
                    expected,
                    found: changes.kind(),
                }
                .into());
            }
        }

        self.begin_edit(id);
        let draft = self
            .draft
            .as_mut()
            .ok_or(SessionError::NotEditing { id })?;
        if let Some(changes) = changes {
            changes.merge_into(&mut draft.params)?;
        }
        if let Some(material) = material {
            draft.material = material;
        }
        Ok(Outcome::Staged { id })
    }

    fn apply(&mut self, id: ElementId) -> Result<Outcome, SessionError> {
        let draft = match &self.draft {
            Some(d) if d.id == id => d.clone(),
            _ => return Err(SessionError::NotEditing { id }),
        };
        let built = builder::build(&draft.params, &self.defaults)?;

        let old_handle = self.record_mut(id).and_then(|r| r.handle.take());
        if let Some(handle) = old_handle {
            self.host.remove_volume(handle);
        }
        let handle = self.host.place_volume(id, &built.volume, draft.material);

        if let Some(record) = self.record_mut(id) {
            record.handle = Some(handle);
            record.element.params = built.params;
            record.element.volume = built.volume;
            record.element.material = draft.material;
            record.element.state = ElementState::Selected;
        }
        self.draft = None;
        tracing::info!(%id, "element regenerated");
        Ok(Outcome::Regenerated {
            id,
            warnings: built.warnings,
        })
    }

    fn cancel(&mut self, id: ElementId) -> Result<Outcome, SessionError> {
        match &self.draft {
            Some(d) if d.id == id => {
                self.draft = None;
                self.set_state(id, ElementState::Selected);
                Ok(Outcome::EditCancelled { id })
            }
            _ => Err(SessionError::NotEditing { id }),
        }
    }

    fn remove(&mut self, id: ElementId) -> Outcome {
        if self.selection == Some(id) {
            self.selection = None;
            self.draft = None;
        }
        let handle = self.record_mut(id).and_then(|r| r.handle.take());
        if let Some(handle) = handle {
            self.host.remove_volume(handle);
        }
        self.set_state(id, ElementState::Removed);
        tracing::info!(%id, "element removed");
        Outcome::Removed { id }
    }

    fn clear(&mut self) -> Outcome {
        let live: Vec<ElementId> = self.elements().map(|e| e.id).collect();
        for id in &live {
            self.remove(*id);
        }
        Outcome::Cleared { count: live.len() }
    }
}
