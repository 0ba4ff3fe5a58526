//! Overlay Render
//!
//! Drawing side of the overlay: the surface contract, a software RGBA
//! surface, and the frame-time graph drawn onto it.

pub mod graph;
pub mod pixel_surface;
pub mod surface;

pub use glam::Vec2;
pub use graph::{GraphLayout, GraphRenderer, GraphStyle};
pub use pixel_surface::PixelSurface;
pub use surface::{Rect, Surface};

use thiserror::Error;

/// Straight-alpha RGBA8 colour, laid out as it is stored in a pixel buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("surface size {width}x{height} has no pixels")]
    EmptySurface { width: u32, height: u32 },
}
