//! The scrolling tile window
//!
//! An odd N x N grid of tiles that keeps its center tile under the frame
//! center. Walking translates every tile the opposite way; once the center
//! point slips off the center tile, the coordinate space shifts modularly
//! by one cell (a "recycle") and the edge that wrapped around - the seam -
//! gets fresh visual content. The net effect is infinite terrain from a
//! fixed pool of size^2 tiles.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::grid::{Direction, GridCoord};
use super::state::AssetCatalog;
use super::tigers::TigerId;
use crate::consts::FRAME_CENTER;
use crate::platform::Rotation;
use crate::Rect;

/// What a tile currently looks like; re-rolled on every seam refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileVisual {
    /// Index into the asset catalog's tile images
    pub image: usize,
    pub rotation: Rotation,
}

impl TileVisual {
    fn roll(rng: &mut Pcg32, catalog: &AssetCatalog) -> Self {
        Self {
            image: rng.random_range(0..catalog.tile_images),
            rotation: Rotation::from_index(rng.random_range(0..4)),
        }
    }

    /// Roll a visual that differs from `prev`, so a recycled tile never
    /// reappears looking identical to the tile it replaced
    fn roll_fresh(prev: TileVisual, rng: &mut Pcg32, catalog: &AssetCatalog) -> Self {
        for _ in 0..8 {
            let next = Self::roll(rng, catalog);
            if next != prev {
                return next;
            }
        }
        // Catalog too small to differ; accept the repeat
        Self::roll(rng, catalog)
    }
}

/// One map cell. Its grid coordinate is its storage index; its world
/// position derives from the matrix anchor.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub visual: TileVisual,
    /// Non-owning back-reference to the tiger currently homed here
    pub occupant: Option<TigerId>,
}

/// One modular shift of the window
#[derive(Debug, Clone)]
pub struct RecycleEvent {
    pub direction: Direction,
    /// Leading-edge coordinates whose tiles were refreshed
    pub seam: Vec<GridCoord>,
}

/// The scrolling window itself
#[derive(Debug)]
pub struct TileMatrix {
    size: usize,
    tile_size: f32,
    /// World position of the tile at grid (0, 0)
    anchor: Vec2,
    /// Row-major by grid coordinate; always exactly size^2 tiles
    tiles: Vec<Tile>,
}

impl TileMatrix {
    /// Build a window centered on the frame. `size` must be odd and >= 3
    /// (validated upstream by `Config`; violations are programmer error).
    pub fn new(size: usize, tile_size: f32, rng: &mut Pcg32, catalog: &AssetCatalog) -> Self {
        assert!(
            size >= 3 && size % 2 == 1,
            "tile matrix size must be odd and at least 3, got {size}"
        );
        let tiles = (0..size * size)
            .map(|_| Tile {
                visual: TileVisual::roll(rng, catalog),
                occupant: None,
            })
            .collect();
        Self {
            size,
            tile_size,
            anchor: crate::init_matrix_anchor(size, tile_size),
            tiles,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn center_coord(&self) -> GridCoord {
        GridCoord::new(self.size / 2, self.size / 2)
    }

    /// World-space bounds of one tile
    pub fn tile_rect(&self, coord: GridCoord) -> Rect {
        let pos = self.anchor + Vec2::new(coord.col as f32, coord.row as f32) * self.tile_size;
        Rect::from_pos_size(pos, Vec2::splat(self.tile_size))
    }

    /// World-space bounds of the whole window
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.anchor, Vec2::splat(self.size as f32 * self.tile_size))
    }

    pub fn tile(&self, coord: GridCoord) -> &Tile {
        &self.tiles[coord.index(self.size)]
    }

    pub fn occupant_of(&self, coord: GridCoord) -> Option<TigerId> {
        self.tile(coord).occupant
    }

    pub fn set_occupant(&mut self, coord: GridCoord, occupant: Option<TigerId>) {
        let idx = coord.index(self.size);
        self.tiles[idx].occupant = occupant;
    }

    /// The tile currently homing `tiger`, if any
    pub fn tiger_tile(&self, tiger: TigerId) -> Option<GridCoord> {
        GridCoord::all(self.size).find(|c| self.tile(*c).occupant == Some(tiger))
    }

    /// Unoccupied tiles on the edge new terrain enters from
    pub fn free_leading_tiles(&self, direction: Direction) -> Vec<GridCoord> {
        GridCoord::all(self.size)
            .filter(|c| {
                direction.is_leading_edge(*c, self.size) && self.tile(*c).occupant.is_none()
            })
            .collect()
    }

    /// All coordinates paired with their tiles, storage order
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &Tile)> {
        GridCoord::all(self.size).map(|c| (c, self.tile(c)))
    }

    /// Which way the center tile has slipped off the frame center, if it has.
    /// Cardinal movement means at most one axis reports at a time; a
    /// diagonal displacement resolves as two successive recycles.
    fn off_center_direction(&self) -> Option<Direction> {
        let rect = self.tile_rect(self.center_coord());
        if FRAME_CENTER.x >= rect.max.x {
            Some(Direction::Right)
        } else if FRAME_CENTER.x < rect.min.x {
            Some(Direction::Left)
        } else if FRAME_CENTER.y >= rect.max.y {
            Some(Direction::Down)
        } else if FRAME_CENTER.y < rect.min.y {
            Some(Direction::Up)
        } else {
            None
        }
    }

    /// Scroll the world under the player by the player's motion for this
    /// tick, recycling as needed to keep the center tile under the frame
    /// center. Zero motion never recycles and never remaps a coordinate.
    pub fn scroll(
        &mut self,
        motion: Vec2,
        rng: &mut Pcg32,
        catalog: &AssetCatalog,
    ) -> Vec<RecycleEvent> {
        self.anchor -= motion;
        let mut events = Vec::new();
        while let Some(direction) = self.off_center_direction() {
            let seam = self.recycle(direction, rng, catalog);
            log::debug!("recycled {:?}, seam of {} tiles", direction, seam.len());
            events.push(RecycleEvent { direction, seam });
        }
        events
    }

    /// Shift the coordinate space one cell against the walk direction:
    /// every tile's coordinate becomes `(coord - step) mod size`, the
    /// anchor advances one tile so unwrapped tiles keep their world
    /// position, and the wrapped (leading) edge is refreshed.
    fn recycle(
        &mut self,
        direction: Direction,
        rng: &mut Pcg32,
        catalog: &AssetCatalog,
    ) -> Vec<GridCoord> {
        let step = direction.grid_step();
        let size = self.size;

        let shifted: Vec<Tile> = GridCoord::all(size)
            .map(|new_coord| self.tiles[new_coord.offset_wrapped(step, size).index(size)])
            .collect();
        self.tiles = shifted;
        self.anchor += Vec2::new(step.0 as f32, step.1 as f32) * self.tile_size;

        let mut seam = Vec::new();
        for coord in GridCoord::all(size) {
            if direction.is_leading_edge(coord, size) {
                let idx = coord.index(size);
                self.tiles[idx].visual =
                    TileVisual::roll_fresh(self.tiles[idx].visual, rng, catalog);
                seam.push(coord);
            }
        }
        seam
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    const CATALOG: AssetCatalog = AssetCatalog {
        tile_images: 6,
        portraits: 4,
    };

    fn matrix(size: usize) -> (TileMatrix, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(42);
        let m = TileMatrix::new(size, 200.0, &mut rng, &CATALOG);
        (m, rng)
    }

    fn occupancy_is_unique(m: &TileMatrix) -> bool {
        let mut seen = std::collections::HashSet::new();
        m.iter()
            .filter_map(|(_, t)| t.occupant)
            .all(|id| seen.insert(id))
    }

    #[test]
    #[should_panic(expected = "odd and at least 3")]
    fn test_even_size_rejected() {
        let mut rng = Pcg32::seed_from_u64(0);
        let _ = TileMatrix::new(4, 200.0, &mut rng, &CATALOG);
    }

    #[test]
    fn test_center_tile_contains_frame_center_on_construction() {
        let (m, _) = matrix(5);
        assert!(m.tile_rect(m.center_coord()).contains(FRAME_CENTER));
    }

    #[test]
    fn test_zero_motion_never_recycles() {
        let (mut m, mut rng) = matrix(5);
        let anchor_before = m.anchor;
        let events = m.scroll(Vec2::ZERO, &mut rng, &CATALOG);
        assert!(events.is_empty());
        assert_eq!(m.anchor, anchor_before);
    }

    #[test]
    fn test_one_tile_width_walk_recycles_exactly_once() {
        // Scenario: walk right one full tile width in one step, five times
        // over; each step triggers exactly one recycle and the seam is the
        // rightmost column.
        let (mut m, mut rng) = matrix(5);
        for _ in 0..5 {
            let events = m.scroll(Direction::Right.motion(200.0), &mut rng, &CATALOG);
            assert_eq!(events.len(), 1);
            let seam = &events[0].seam;
            assert_eq!(seam.len(), 5);
            assert!(seam.iter().all(|c| c.col == 4));
            assert!(m.tile_rect(m.center_coord()).contains(FRAME_CENTER));
        }
    }

    #[test]
    fn test_seam_tiles_get_fresh_visuals() {
        let (mut m, mut rng) = matrix(5);
        // The tiles that will wrap are the trailing (left) column
        let before: Vec<TileVisual> = (0..5)
            .map(|row| m.tile(GridCoord::new(0, row)).visual)
            .collect();
        let events = m.scroll(Direction::Right.motion(200.0), &mut rng, &CATALOG);
        assert_eq!(events.len(), 1);
        for (row, old) in before.iter().enumerate() {
            let refreshed = m.tile(GridCoord::new(4, row)).visual;
            assert_ne!(refreshed, *old);
        }
    }

    #[test]
    fn test_unwrapped_tiles_keep_world_position_across_recycle() {
        let (mut m, mut rng) = matrix(5);
        // Tag a mid-window tile via its occupant slot and remember its rect
        m.set_occupant(GridCoord::new(3, 2), Some(7));
        let rect_before = m.tile_rect(GridCoord::new(3, 2));
        let motion = Direction::Right.motion(200.0);
        m.scroll(motion, &mut rng, &CATALOG);
        // After shifting right by one, the tagged tile is at (2, 2). The
        // whole world slid by the motion; the recycle itself must not have
        // moved the tile any further.
        let coord = m.tiger_tile(7).unwrap();
        assert_eq!(coord, GridCoord::new(2, 2));
        assert_eq!(m.tile_rect(coord).min, rect_before.min - motion);
    }

    #[test]
    fn test_recycle_round_trip_restores_occupant_coords() {
        let (mut m, mut rng) = matrix(5);
        // Mark every tile with a unique occupant as an identity tag
        for (i, coord) in GridCoord::all(5).enumerate() {
            m.set_occupant(coord, Some(i));
        }
        for _ in 0..3 {
            m.scroll(Direction::Right.motion(200.0), &mut rng, &CATALOG);
        }
        for _ in 0..3 {
            m.scroll(Direction::Left.motion(200.0), &mut rng, &CATALOG);
        }
        for (i, coord) in GridCoord::all(5).enumerate() {
            assert_eq!(m.occupant_of(coord), Some(i));
        }
        assert!(occupancy_is_unique(&m));
    }

    #[test]
    fn test_every_coord_has_exactly_one_tile_after_many_recycles() {
        let (mut m, mut rng) = matrix(3);
        let dirs = [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Up,
        ];
        for dir in dirs {
            m.scroll(dir.motion(200.0), &mut rng, &CATALOG);
            assert_eq!(m.iter().count(), 9);
            assert!(m.tile_rect(m.center_coord()).contains(FRAME_CENTER));
        }
    }

    proptest! {
        /// Shifting a coordinate n cells one way and n cells back is the
        /// identity under modular arithmetic, for any window size
        #[test]
        fn prop_coord_shift_round_trips(
            col in 0usize..9,
            row in 0usize..9,
            steps in 0usize..20,
            dir_idx in 0usize..4,
        ) {
            let size = 9;
            let dir = Direction::ALL[dir_idx];
            let start = GridCoord::new(col, row);
            let mut coord = start;
            for _ in 0..steps {
                coord = coord.offset_wrapped(dir.grid_step(), size);
            }
            for _ in 0..steps {
                coord = coord.offset_wrapped(dir.opposite().grid_step(), size);
            }
            prop_assert_eq!(coord, start);
        }
    }
}
