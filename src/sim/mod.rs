//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, threaded explicitly through constructors
//! - Stable iteration order (creation order for tigers, storage order for tiles)
//! - No rendering or platform dependencies; assets appear only as indices

pub mod grid;
pub mod matrix;
pub mod petting;
pub mod state;
pub mod tick;
pub mod tigers;

pub use grid::{Direction, GridCoord};
pub use matrix::{RecycleEvent, Tile, TileMatrix, TileVisual};
pub use petting::{Feedback, PettingSession};
pub use state::{AssetCatalog, GameEvent, GameState, MessageScreen, Mode, NextMode};
pub use tick::{tick, TickInput};
pub use tigers::{Tiger, TigerId, TigerManager};
