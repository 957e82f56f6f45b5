//! Tigers and the manager that owns them
//!
//! Tigers live in a flat list in creation order; tiles refer to them by
//! index. They stand still until the scrolling world carries them off the
//! window edge, at which point they are rehomed onto the leading edge so
//! new tigers appear to wander in from the direction of travel.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_pcg::Pcg32;

use super::grid::{Direction, GridCoord};
use super::matrix::TileMatrix;
use super::state::AssetCatalog;
use crate::config::Config;
use crate::consts::{OFFSCREEN, TIGER_H, TIGER_W};
use crate::platform::Rotation;
use crate::Rect;

/// Index into the manager's creation-order tiger list
pub type TigerId = usize;

/// A wild tiger
#[derive(Debug, Clone)]
pub struct Tiger {
    /// Top-left corner in world/screen pixels
    pub pos: Vec2,
    pub sprite_rotation: Rotation,
    /// Index of this tiger's portrait in the asset catalog
    pub portrait: usize,
    pub petted: bool,
    /// The petting speed this tiger likes best (px of pointer motion/tick)
    pub desired_pet_speed: f32,
    /// Band edges, fixed at creation from the desired speed
    pub too_fast: f32,
    pub too_slow: f32,
    /// Ticks until the next warning roar while the player is close
    pub roar_timer: u32,
}

impl Tiger {
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::new(TIGER_W, TIGER_H))
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

/// Owns every tiger for a session; collision and rehoming logic
#[derive(Debug)]
pub struct TigerManager {
    pub(crate) tigers: Vec<Tiger>,
}

impl TigerManager {
    /// Create `min(requested, capacity)` tigers from a shuffled portrait
    /// pool. Requests beyond capacity are silently dropped - the window
    /// only has size^2 - 1 hostable tiles.
    pub fn new(config: &Config, catalog: &AssetCatalog, rng: &mut Pcg32) -> Self {
        let count = config.tiger_count.min(config.tiger_capacity());

        let mut portraits: Vec<usize> = (0..catalog.portraits).collect();
        portraits.shuffle(rng);

        let tigers = (0..count)
            .map(|i| {
                let desired = rng.random_range(
                    crate::consts::DESIRED_SPEED_MIN..crate::consts::DESIRED_SPEED_MAX,
                );
                Tiger {
                    pos: OFFSCREEN,
                    sprite_rotation: Rotation::from_index(rng.random_range(0..4)),
                    portrait: portraits[i % portraits.len()],
                    petted: false,
                    desired_pet_speed: desired,
                    too_fast: desired * config.too_fast_mult,
                    too_slow: desired * config.too_slow_mult,
                    roar_timer: config.roar_interval_ticks,
                }
            })
            .collect();

        Self { tigers }
    }

    /// Home every tiger on a distinct random non-center tile
    pub fn place_all(&mut self, matrix: &mut TileMatrix, rng: &mut Pcg32) {
        let center = matrix.center_coord();
        let mut coords: Vec<GridCoord> = GridCoord::all(matrix.size())
            .filter(|c| *c != center)
            .collect();
        coords.shuffle(rng);

        for (id, coord) in coords.into_iter().enumerate().take(self.tigers.len()) {
            matrix.set_occupant(coord, Some(id));
            self.tigers[id].pos = random_pos_in(matrix.tile_rect(coord), rng);
        }
    }

    pub fn len(&self) -> usize {
        self.tigers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tigers.is_empty()
    }

    pub fn tiger(&self, id: TigerId) -> &Tiger {
        &self.tigers[id]
    }

    /// Unpetted tigers in creation order; recomputed fresh every call
    pub fn tigers_to_pet(&self) -> impl Iterator<Item = (TigerId, &Tiger)> {
        self.tigers.iter().enumerate().filter(|(_, t)| !t.petted)
    }

    pub fn all_petted(&self) -> bool {
        self.tigers_to_pet().next().is_none()
    }

    /// First unpetted tiger overlapping the player, creation order.
    /// Deterministic for a fixed seed; ties are first-match-wins.
    pub fn collide(&self, player: Rect) -> Option<TigerId> {
        self.tigers_to_pet()
            .find(|(_, t)| t.bounds().intersects(&player))
            .map(|(id, _)| id)
    }

    /// Scroll every unpetted tiger against the player's motion, rehoming
    /// any that fell off the window onto a free leading-edge tile. A tiger
    /// that finds no free tile just stays off-window until a later tick.
    pub fn scroll(
        &mut self,
        motion: Vec2,
        direction: Direction,
        matrix: &mut TileMatrix,
        rng: &mut Pcg32,
    ) -> Vec<TigerId> {
        let mut rehomed = Vec::new();
        let window = matrix.bounds();

        for id in 0..self.tigers.len() {
            if self.tigers[id].petted {
                continue;
            }
            self.tigers[id].pos -= motion;
            if self.tigers[id].bounds().intersects(&window) {
                continue;
            }

            // Fell off the trailing edge; drop the stale tile link first
            if let Some(old) = matrix.tiger_tile(id) {
                matrix.set_occupant(old, None);
            }
            let free = matrix.free_leading_tiles(direction);
            if free.is_empty() {
                log::debug!("tiger {id} off-window, no free leading tile");
                continue;
            }
            let coord = free[rng.random_range(0..free.len())];
            matrix.set_occupant(coord, Some(id));
            self.tigers[id].pos = random_pos_in(matrix.tile_rect(coord), rng);
            rehomed.push(id);
        }
        rehomed
    }

    /// Re-randomize a tiger's sub-position within a tile (seam refresh)
    pub fn reseat(&mut self, id: TigerId, tile: Rect, rng: &mut Pcg32) {
        self.tigers[id].pos = random_pos_in(tile, rng);
    }

    /// Retire a petted tiger: it keeps existing for score accounting but
    /// never renders or collides again
    pub fn mark_petted(&mut self, id: TigerId) {
        self.tigers[id].petted = true;
        self.tigers[id].pos = OFFSCREEN;
    }

    /// Count down roar timers for unpetted tigers near the player,
    /// returning the ids that roared this tick
    pub fn update_roars(&mut self, player_center: Vec2, config: &Config) -> Vec<TigerId> {
        let mut roared = Vec::new();
        for (id, tiger) in self.tigers.iter_mut().enumerate() {
            if tiger.petted {
                continue;
            }
            if crate::distance(tiger.center(), player_center) <= config.roar_range {
                if tiger.roar_timer == 0 {
                    tiger.roar_timer = config.roar_interval_ticks;
                    roared.push(id);
                } else {
                    tiger.roar_timer -= 1;
                }
            } else {
                tiger.roar_timer = config.roar_interval_ticks;
            }
        }
        roared
    }
}

/// Uniform position within a tile such that the sprite fits inside it
fn random_pos_in(tile: Rect, rng: &mut Pcg32) -> Vec2 {
    let max_x = (tile.max.x - TIGER_W).max(tile.min.x);
    let max_y = (tile.max.y - TIGER_H).max(tile.min.y);
    Vec2::new(
        rng.random_range(tile.min.x..=max_x),
        rng.random_range(tile.min.y..=max_y),
    )
}
