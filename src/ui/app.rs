use crate::builder::{FurnitureChanges, ParameterChanges, SlabChanges, WallChanges};
use crate::config::{Config, Presets};
use crate::model::{ArchitecturalElement, ElementKind, ElementParams, Material};
use crate::scene::{CatalogueEntry, InMemoryScene};
use crate::session::{Command, Draft, Outcome, Session, Target};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use nalgebra::Point3;
use ratatui::layout::Rect;
use ratatui::{DefaultTerminal, Frame};
use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Scene,
    Editing,
}

/// A property panel field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    StartX,
    StartZ,
    EndX,
    EndZ,
    Height,
    Thickness,
    Width,
    Depth,
    PositionX,
    PositionZ,
    Color,
}

impl EditField {
    #[must_use]
    pub fn for_kind(kind: ElementKind) -> &'static [EditField] {
        match kind {
            ElementKind::Wall => &[
                EditField::StartX,
                EditField::StartZ,
                EditField::EndX,
                EditField::EndZ,
                EditField::Height,
                EditField::Thickness,
                EditField::Color,
            ],
            ElementKind::Slab => &[
                EditField::Width,
                EditField::Depth,
                EditField::Thickness,
                EditField::Color,
            ],
            ElementKind::Furniture => {
                &[EditField::PositionX, EditField::PositionZ, EditField::Color]
            }
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EditField::StartX => "Start X",
            EditField::StartZ => "Start Z",
            EditField::EndX => "End X",
            EditField::EndZ => "End Z",
            EditField::Height => "Height",
            EditField::Thickness => "Thickness",
            EditField::Width => "Width",
            EditField::Depth => "Depth",
            EditField::PositionX => "Position X",
            EditField::PositionZ => "Position Z",
            EditField::Color => "Color",
        }
    }

    /// Current value of the field in `draft`, formatted for editing.
    #[must_use]
    pub fn value(self, draft: &Draft) -> String {
        if self == EditField::Color {
            return draft.material.to_string();
        }
        let v = match (&draft.params, self) {
            (ElementParams::Wall(w), EditField::StartX) => w.start.x,
            (ElementParams::Wall(w), EditField::StartZ) => w.start.z,
            (ElementParams::Wall(w), EditField::EndX) => w.end.x,
            (ElementParams::Wall(w), EditField::EndZ) => w.end.z,
            (ElementParams::Wall(w), EditField::Height) => w.height,
            (ElementParams::Wall(w), EditField::Thickness) => w.thickness,
            (ElementParams::Slab(s), EditField::Width) => s.width,
            (ElementParams::Slab(s), EditField::Depth) => s.depth,
            (ElementParams::Slab(s), EditField::Thickness) => s.thickness,
            (ElementParams::Furniture(f), EditField::PositionX) => f.position_x,
            (ElementParams::Furniture(f), EditField::PositionZ) => f.position_z,
            _ => return String::new(),
        };
        format!("{v}")
    }

    /// Turns typed text into a staged edit for `draft`'s element.
    ///
    /// Returns `None` when the text does not parse.
    #[must_use]
    pub fn to_command(self, draft: &Draft, input: &str) -> Option<Command> {
        if self == EditField::Color {
            return Material::parse(input).map(|material| Command::EditElement {
                target: Target::Id(draft.id),
                changes: None,
                material: Some(material),
            });
        }

        let v: f64 = input.trim().parse().ok()?;
        let changes = match &draft.params {
            ElementParams::Wall(w) => {
                let mut c = WallChanges::default();
                match self {
                    EditField::StartX => c.start = Some(Point3::new(v, w.start.y, w.start.z)),
                    EditField::StartZ => c.start = Some(Point3::new(w.start.x, w.start.y, v)),
                    EditField::EndX => c.end = Some(Point3::new(v, w.end.y, w.end.z)),
                    EditField::EndZ => c.end = Some(Point3::new(w.end.x, w.end.y, v)),
                    EditField::Height => c.height = Some(v),
                    EditField::Thickness => c.thickness = Some(v),
                    _ => return None,
                }
                ParameterChanges::Wall(c)
            }
            ElementParams::Slab(_) => {
                let mut c = SlabChanges::default();
                match self {
                    EditField::Width => c.width = Some(v),
                    EditField::Depth => c.depth = Some(v),
                    EditField::Thickness => c.thickness = Some(v),
                    _ => return None,
                }
                ParameterChanges::Slab(c)
            }
            ElementParams::Furniture(_) => {
                let mut c = FurnitureChanges::default();
                match self {
                    EditField::PositionX => c.position_x = Some(v),
                    EditField::PositionZ => c.position_z = Some(v),
                    _ => return None,
                }
                ParameterChanges::Furniture(c)
            }
        };
        Some(Command::EditElement {
            target: Target::Id(draft.id),
            changes: Some(changes),
            material: None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

pub struct App {
    pub session: Session<InMemoryScene>,
    pub presets: Presets,
    pub catalogue: Vec<CatalogueEntry>,
    pub next_furniture: usize,
    pub view: View,
    pub selected_index: usize,
    pub field_index: usize,
    pub input: String,
    pub status: Option<(String, StatusKind)>,
    /// Inner area of the plan canvas from the last frame, for mouse picking.
    pub plan_area: Cell<Rect>,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let session = Session::new(InMemoryScene::new(), config.assets.loader())
            .with_defaults(config.defaults)
            .with_camera(config.camera);
        Self {
            session,
            presets: config.presets.clone(),
            catalogue: config.assets.catalogue.entries.clone(),
            next_furniture: 0,
            view: View::Scene,
            selected_index: 0,
            field_index: 0,
            input: String::new(),
            status: None,
            plan_area: Cell::new(Rect::default()),
            should_quit: false,
        }
    }

    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        super::dashboard::draw_dashboard(frame, self);
    }

    fn handle_events(&mut self) -> Result<()> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match self.view {
                View::Scene => self.handle_scene_keys(key.code),
                View::Editing => self.handle_edit_keys(key.code),
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.click_plan(mouse.column, mouse.row);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn handle_scene_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                self.run_command(Command::Deselect);
            }
            KeyCode::Up | KeyCode::Char('k') => self.previous_element(),
            KeyCode::Down | KeyCode::Char('j') => self.next_element(),
            KeyCode::Char('w') => {
                self.run_command(self.presets.wall.command());
            }
            KeyCode::Char('s') => {
                self.run_command(self.presets.slab.command());
            }
            KeyCode::Char('f') => self.place_next_furniture(),
            KeyCode::Char('e') | KeyCode::Enter => self.enter_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected(),
            KeyCode::Char('c') => {
                self.run_command(Command::ClearScene);
            }
            _ => {}
        }
    }

    pub fn handle_edit_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.run_command(Command::CancelEdit {
                    target: Target::Selected,
                });
                self.leave_edit();
            }
            KeyCode::Tab | KeyCode::Down => {
                if self.commit_field() {
                    self.move_field(1);
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if self.commit_field() {
                    self.move_field(-1);
                }
            }
            KeyCode::Enter => {
                if self.commit_field()
                    && self.run_command(Command::ApplyEdit {
                        target: Target::Selected,
                    })
                {
                    self.leave_edit();
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_hexdigit() || matches!(c, '.' | '-' | '#' | 'x') => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    /// Dispatches `command` and reports the result in the status line.
    /// Returns whether the command succeeded.
    pub fn run_command(&mut self, command: Command) -> bool {
        match self.session.dispatch(command) {
            Ok(outcome) => {
                self.report(&outcome);
                self.sync_list_to_selection();
                true
            }
            Err(e) => {
                self.status = Some((e.to_string(), StatusKind::Error));
                false
            }
        }
    }

    fn report(&mut self, outcome: &Outcome) {
        if let Some(w) = outcome.warnings().first() {
            self.status = Some((w.to_string(), StatusKind::Warning));
            return;
        }
        let message = match outcome {
            Outcome::Created { id, .. } => format!("Created {}", id.short()),
            Outcome::Regenerated { id, .. } => format!("Updated {}", id.short()),
            Outcome::Removed { id } => format!("Removed {}", id.short()),
            Outcome::Cleared { count } => format!("Cleared {count} elements"),
            Outcome::NothingPicked => "Nothing under cursor".to_string(),
            _ => return,
        };
        self.status = Some((message, StatusKind::Info));
    }

    #[must_use]
    pub fn elements(&self) -> Vec<&ArchitecturalElement> {
        self.session.elements().collect()
    }

    fn sync_list_to_selection(&mut self) {
        if let Some(id) = self.session.selection() {
            if let Some(i) = self.session.elements().position(|e| e.id == id) {
                self.selected_index = i;
            }
        }
        let count = self.session.len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    fn select_index(&mut self, index: usize) {
        let id = self.session.elements().nth(index).map(|e| e.id);
        if let Some(id) = id {
            self.run_command(Command::Select {
                target: Target::Id(id),
            });
        }
    }

    fn previous_element(&mut self) {
        if self.session.selection().is_none() {
            self.select_index(self.selected_index);
        } else if self.selected_index > 0 {
            self.select_index(self.selected_index - 1);
        }
    }

    fn next_element(&mut self) {
        if self.session.selection().is_none() {
            self.select_index(self.selected_index);
        } else if self.selected_index + 1 < self.session.len() {
            self.select_index(self.selected_index + 1);
        }
    }

    fn place_next_furniture(&mut self) {
        if self.catalogue.is_empty() {
            self.status = Some(("Furniture catalogue is empty".to_string(), StatusKind::Error));
            return;
        }
        let entry = &self.catalogue[self.next_furniture % self.catalogue.len()];
        let command = Command::PlaceFurniture {
            source_path: entry.path.clone(),
            position_x: 0.0,
            position_z: 0.0,
            material: None,
        };
        if self.run_command(command) {
            self.next_furniture += 1;
        }
    }

    fn remove_selected(&mut self) {
        if self.session.selection().is_some() {
            self.run_command(Command::Remove {
                target: Target::Selected,
            });
        }
    }

    fn enter_edit(&mut self) {
        if self.session.selection().is_none() {
            self.select_index(self.selected_index);
        }
        if self.session.selection().is_some()
            && self.run_command(Command::BeginEdit {
                target: Target::Selected,
            })
        {
            self.view = View::Editing;
            self.field_index = 0;
            self.load_field();
        }
    }

    fn leave_edit(&mut self) {
        self.view = View::Scene;
        self.input.clear();
    }

    #[must_use]
    pub fn fields(&self) -> &'static [EditField] {
        match self.session.selected() {
            Some(e) => EditField::for_kind(e.kind()),
            None => &[],
        }
    }

    #[must_use]
    pub fn current_field(&self) -> Option<EditField> {
        self.fields().get(self.field_index).copied()
    }

    fn load_field(&mut self) {
        self.input = match (self.current_field(), self.session.draft()) {
            (Some(field), Some(draft)) => field.value(draft),
            _ => String::new(),
        };
    }

    fn move_field(&mut self, delta: isize) {
        let count = self.fields().len();
        if count == 0 {
            return;
        }
        self.field_index = (self.field_index as isize + delta).rem_euclid(count as isize) as usize;
        self.load_field();
    }

    /// Stages the typed value of the current field. Unchanged text is a no-op.
    fn commit_field(&mut self) -> bool {
        let (Some(field), Some(draft)) = (self.current_field(), self.session.draft()) else {
            return false;
        };
        if field.value(draft) == self.input {
            return true;
        }
        match field.to_command(draft, &self.input) {
            Some(command) => self.run_command(command),
            None => {
                self.status = Some((
                    format!("'{}' is not a valid {}", self.input, field.label()),
                    StatusKind::Error,
                ));
                false
            }
        }
    }

    fn click_plan(&mut self, column: u16, row: u16) {
        if self.view != View::Scene {
            return;
        }
        let area = self.plan_area.get();
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return;
        }
        let (x_bounds, y_bounds) = super::dashboard::plan_bounds(self);
        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        let x = x_bounds[0] + fx * (x_bounds[1] - x_bounds[0]);
        // canvas y grows upward and maps to -z
        let y = y_bounds[1] - fy * (y_bounds[1] - y_bounds[0]);
        self.run_command(Command::PickPlan { x, z: -y });
    }
}
