//! Platform abstraction layer
//!
//! The game core never talks to a concrete graphics or input library.
//! A host backend implements [`Gfx`] (image loading, blitting, text) and
//! [`InputSource`] (event polling, pointer state); the simulation itself
//! only ever sees plain data. [`NullGfx`] is a no-op backend used by the
//! headless driver and by tests.

use std::path::{Path, PathBuf};

use glam::Vec2;
use thiserror::Error;

use crate::Rect;

/// Startup-time platform failures; none of these occur during gameplay
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("asset not found: {0}")]
    AssetNotFound(PathBuf),
    #[error("asset directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("asset directory is empty: {0}")]
    EmptyDirectory(PathBuf),
}

/// Opaque handle to an image owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Cardinal rotations - the only rotations tiles and sprites ever use
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Index into [`Rotation::ALL`], for rolling a rotation from an RNG
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 4]
    }
}

/// RGB color (the original's palette is plain 8-bit RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

pub const BLACK: Color = Color(0, 0, 0);
pub const WHITE: Color = Color(255, 255, 255);
pub const RED: Color = Color(255, 0, 0);

/// Drawing/asset contract a host rendering library must satisfy
pub trait Gfx {
    /// Load an image from disk
    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, PlatformError>;

    /// List files under a directory (asset discovery)
    fn enumerate_files(&self, dir: &Path) -> Result<Vec<PathBuf>, PlatformError>;

    /// Crop a sub-region out of a loaded image (sprite sheets)
    fn crop(&mut self, image: ImageHandle, region: Rect) -> ImageHandle;

    /// Rotate by a cardinal multiple of 90 degrees
    fn rotate(&mut self, image: ImageHandle, rotation: Rotation) -> ImageHandle;

    /// Render a text string to an image
    fn render_text(&mut self, text: &str, height: u32, color: Color) -> ImageHandle;

    /// Blit an image with its top-left corner at `pos`
    fn blit(&mut self, image: ImageHandle, pos: Vec2);

    /// Blit an image centered on `center`
    fn blit_centered(&mut self, image: ImageHandle, center: Vec2);

    fn fill_rect(&mut self, color: Color, rect: Rect);

    fn draw_circle(&mut self, color: Color, center: Vec2, radius: f32);
}

/// One polled input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseDown,
    MouseUp,
    Quit,
}

/// The handful of keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Help,
    Escape,
}

/// Input contract a host windowing library must satisfy
pub trait InputSource {
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn pointer_pos(&self) -> Vec2;
    fn pointer_down(&self) -> bool;
}

/// Backend that accepts every call and draws nothing
///
/// Hands out sequential handles so asset bookkeeping still works; the
/// headless driver and the sim tests run against this.
#[derive(Debug, Default)]
pub struct NullGfx {
    next_handle: u32,
}

impl NullGfx {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> ImageHandle {
        let handle = ImageHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl Gfx for NullGfx {
    fn load_image(&mut self, _path: &Path) -> Result<ImageHandle, PlatformError> {
        Ok(self.alloc())
    }

    fn enumerate_files(&self, dir: &Path) -> Result<Vec<PathBuf>, PlatformError> {
        // Pretend every asset directory holds a handful of files
        Ok((0..4).map(|i| dir.join(format!("{i}.png"))).collect())
    }

    fn crop(&mut self, _image: ImageHandle, _region: Rect) -> ImageHandle {
        self.alloc()
    }

    fn rotate(&mut self, _image: ImageHandle, _rotation: Rotation) -> ImageHandle {
        self.alloc()
    }

    fn render_text(&mut self, _text: &str, _height: u32, _color: Color) -> ImageHandle {
        self.alloc()
    }

    fn blit(&mut self, _image: ImageHandle, _pos: Vec2) {}

    fn blit_centered(&mut self, _image: ImageHandle, _center: Vec2) {}

    fn fill_rect(&mut self, _color: Color, _rect: Rect) {}

    fn draw_circle(&mut self, _color: Color, _center: Vec2, _radius: f32) {}
}
