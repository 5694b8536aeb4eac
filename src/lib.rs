//! # BIM Configurator
//!
//! Parametric walls, slabs and furniture placed into a scene and edited in
//! place.
//!
//! ## Features
//!
//! - Pure volume builder for walls (two points, height, thickness), slabs
//!   (width, depth, thickness) and furniture (asset bounds, plan position)
//! - Command-driven session with select / edit / apply / remove lifecycle
//! - Ray picking against placed volumes
//! - Terminal UI with a plan view, headless JSON scripts
//!
//! ## Example
//!
//! ```
//! use bim_configurator::scene::{CatalogueLoader, InMemoryScene};
//! use bim_configurator::session::{Command, Outcome, Session};
//! use nalgebra::Point3;
//!
//! let mut session = Session::new(InMemoryScene::new(), Box::new(CatalogueLoader::default()));
//! let outcome = session.dispatch(Command::AddWall {
//!     start: Point3::origin(),
//!     end: Point3::new(5.0, 0.0, 0.0),
//!     height: 3.0,
//!     thickness: 0.2,
//!     material: None,
//! })?;
//! assert!(matches!(outcome, Outcome::Created { .. }));
//! assert_eq!(session.len(), 1);
//! # Ok::<(), bim_configurator::error::SessionError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod scene;
pub mod script;
pub mod session;
pub mod ui;
