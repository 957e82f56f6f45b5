//! Wild Tiger - an infinitely-scrolling arcade petting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile matrix, tigers, petting, game state)
//! - `platform`: Host graphics/input abstraction
//! - `assets`: Tile/sprite/portrait discovery and loading
//! - `render`: Per-mode drawing through the platform layer
//! - `config`: Data-driven game tuning

pub mod assets;
pub mod config;
pub mod platform;
pub mod render;
pub mod scorebook;
pub mod sim;

pub use config::Config;
pub use scorebook::Scorebook;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Logical tick rate (fixed timestep)
    pub const TICK_HZ: u32 = 30;

    /// Frame dimensions (pixels)
    pub const FRAME_WIDTH: f32 = 800.0;
    pub const FRAME_HEIGHT: f32 = 600.0;
    /// The player never moves from this point; the world moves under it
    pub const FRAME_CENTER: Vec2 = Vec2::new(FRAME_WIDTH / 2.0, FRAME_HEIGHT / 2.0);

    /// Parking spot for petted tigers (never rendered, never collided)
    pub const OFFSCREEN: Vec2 = Vec2::new(-2000.0, -2000.0);

    /// Tile edge length in pixels
    pub const TILE_SIZE: f32 = 200.0;
    /// Default matrix window edge (tiles); must be odd and >= 3
    pub const DEFAULT_MATRIX_SIZE: usize = 5;

    /// Tiger sprite dimensions (pixels)
    pub const TIGER_W: f32 = 19.0;
    pub const TIGER_H: f32 = 51.0;
    /// How many tigers a session asks for (placement caps at size^2 - 1)
    pub const DEFAULT_TIGER_COUNT: usize = 8;

    /// Player collision radius (drawn as a circle at frame center)
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// World-scroll speed in pixels per tick while a direction key is held
    pub const MOVE_SPEED: f32 = 4.0;

    /// Petting band multipliers applied to each tiger's desired speed
    pub const TOO_FAST_MULT: f32 = 1.4;
    pub const TOO_SLOW_MULT: f32 = 0.8;
    /// Range a tiger's desired pet speed is rolled from (px per tick)
    pub const DESIRED_SPEED_MIN: f32 = 4.0;
    pub const DESIRED_SPEED_MAX: f32 = 12.0;

    /// Rolling window of pointer-motion samples used for the speed metric
    pub const NUM_PETS: usize = 10;
    /// Petting session length: 15 seconds at 30 Hz
    pub const PETTING_TIME_TICKS: u32 = 15 * TICK_HZ;
    /// Integrated-excess budgets before a session fails
    pub const YAWN_MAX: f32 = 200.0;
    pub const GRRR_MAX: f32 = 200.0;
    /// Cap on the purr increment; also used when pet speed hits the
    /// desired speed exactly (1/|delta| would divide by zero)
    pub const PURR_SATURATION: f32 = 100.0;

    /// Ticks a message screen ignores dismiss input after appearing
    pub const MESSAGE_COOLDOWN_TICKS: u32 = 10;

    /// Roar warning: range (px) and cadence (ticks) while in range
    pub const ROAR_RANGE: f32 = 260.0;
    pub const ROAR_INTERVAL_TICKS: u32 = 3 * TICK_HZ;
}

/// Axis-aligned rectangle in world/screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build from a top-left corner and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Build from a center point and a size
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Point containment (min-inclusive, max-exclusive, so tile seams
    /// never double-claim a point)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// World position of a matrix's top-left tile so that the center tile
/// straddles the frame center
#[inline]
pub fn init_matrix_anchor(size: usize, tile_size: f32) -> Vec2 {
    let half_window = tile_size * (size / 2) as f32 + tile_size / 2.0;
    consts::FRAME_CENTER - Vec2::splat(half_window)
}
