//! Asset discovery and loading
//!
//! Walks the original asset layout (`tiles/`, `sprites/`, `tiger_pics/`)
//! through the platform layer at startup. Load failures here are fatal
//! configuration errors; gameplay never touches the filesystem. The
//! simulation refers to assets only by index - the handle tables live
//! here, on the render side of the fence.

use std::path::Path;

use glam::Vec2;

use crate::consts::{TIGER_H, TIGER_W};
use crate::platform::{Gfx, ImageHandle, PlatformError, Rotation};
use crate::sim::AssetCatalog;
use crate::Rect;

pub const TILES_DIR: &str = "tiles";
pub const SPRITES_DIR: &str = "sprites";
pub const TIGER_PICS_DIR: &str = "tiger_pics";
pub const TIGER_SPRITES_FILE: &str = "tiger_sprites.png";

/// Loaded image tables, indexed the way the simulation indexes them
#[derive(Debug)]
pub struct Assets {
    /// Each discovered tile image pre-rotated to the four cardinal
    /// orientations; indexed `[tile_image][rotation]`
    tile_variants: Vec<[ImageHandle; 4]>,
    /// Tiger walking sprite in four orientations
    tiger_sprites: [ImageHandle; 4],
    /// Full-frame tiger portraits for the petting screen, creation order
    portraits: Vec<ImageHandle>,
}

impl Assets {
    /// Load everything. Any missing file or empty directory aborts startup.
    pub fn load(gfx: &mut impl Gfx) -> Result<Self, PlatformError> {
        let tile_variants = load_rotated_set(gfx, Path::new(TILES_DIR))?;

        let sheet_path = Path::new(SPRITES_DIR).join(TIGER_SPRITES_FILE);
        let sheet = gfx.load_image(&sheet_path)?;
        let sprite = gfx.crop(
            sheet,
            Rect::from_pos_size(Vec2::ZERO, Vec2::new(TIGER_W, TIGER_H)),
        );
        let tiger_sprites = rotations_of(gfx, sprite);

        let portrait_paths = sorted_files(gfx, Path::new(TIGER_PICS_DIR))?;
        let portraits = portrait_paths
            .iter()
            .map(|p| gfx.load_image(p))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Loaded {} tile images, {} tiger portraits",
            tile_variants.len(),
            portraits.len()
        );

        Ok(Self {
            tile_variants,
            tiger_sprites,
            portraits,
        })
    }

    /// Index bounds the simulation rolls visuals against
    pub fn catalog(&self) -> AssetCatalog {
        AssetCatalog {
            tile_images: self.tile_variants.len(),
            portraits: self.portraits.len(),
        }
    }

    pub fn tile(&self, image: usize, rotation: Rotation) -> ImageHandle {
        self.tile_variants[image][rotation.degrees() as usize / 90]
    }

    pub fn tiger_sprite(&self, rotation: Rotation) -> ImageHandle {
        self.tiger_sprites[rotation.degrees() as usize / 90]
    }

    pub fn portrait(&self, index: usize) -> ImageHandle {
        self.portraits[index]
    }
}

/// Enumerate a directory, sorted for deterministic index assignment
fn sorted_files(gfx: &impl Gfx, dir: &Path) -> Result<Vec<std::path::PathBuf>, PlatformError> {
    let mut files = gfx.enumerate_files(dir)?;
    if files.is_empty() {
        return Err(PlatformError::EmptyDirectory(dir.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

/// Load every image in a directory and pre-rotate it four ways
fn load_rotated_set(
    gfx: &mut impl Gfx,
    dir: &Path,
) -> Result<Vec<[ImageHandle; 4]>, PlatformError> {
    sorted_files(gfx, dir)?
        .iter()
        .map(|path| {
            let image = gfx.load_image(path)?;
            Ok(rotations_of(gfx, image))
        })
        .collect()
}

fn rotations_of(gfx: &mut impl Gfx, image: ImageHandle) -> [ImageHandle; 4] {
    [
        image,
        gfx.rotate(image, Rotation::R90),
        gfx.rotate(image, Rotation::R180),
        gfx.rotate(image, Rotation::R270),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NullGfx;

    #[test]
    fn test_load_against_null_backend() {
        let mut gfx = NullGfx::new();
        let assets = Assets::load(&mut gfx).unwrap();
        let catalog = assets.catalog();
        assert!(catalog.tile_images > 0);
        assert!(catalog.portraits > 0);
    }

    #[test]
    fn test_tile_variant_lookup_covers_all_rotations() {
        let mut gfx = NullGfx::new();
        let assets = Assets::load(&mut gfx).unwrap();
        for rotation in Rotation::ALL {
            // Must not panic for any rotation of image 0
            let _ = assets.tile(0, rotation);
            let _ = assets.tiger_sprite(rotation);
        }
    }
}
