//! # Framebuffer Graphics Module
//!
//! Renders into a linear framebuffer whose color layout is discovered at
//! runtime.
//!
//! ## Modules
//!
//! - `geometry`: `ScreenGeometry` with per-channel bit layout
//! - `codec`: conversion between `Color` and raw packed pixels
//! - `color`: `Color` type with common color constants
//! - `framebuffer`: `FrameBuffer` owning the off-screen buffer and mapping
//! - `draw`: line and rectangle primitives over any `Canvas`
//!
//! ## Architecture
//!
//! 1. Drawing operations encode colors and write them into an off-screen buffer
//! 2. `present()` copies the whole buffer into the mapped hardware region
//!
//! There is no dirty tracking; every present is a full-buffer transfer.
//! `BufferMode::Direct` skips the off-screen buffer and writes straight into
//! the mapped region.

pub mod codec;
pub mod color;
pub mod draw;
pub mod framebuffer;
pub mod geometry;

pub use codec::{Pixel, RawPixel};
pub use color::Color;
pub use draw::{Canvas, Draw, Point};
pub use framebuffer::{BufferMode, FrameBuffer};
pub use geometry::{ChannelLayout, PixelLayout, ScreenGeometry};
