//! # rawfb
//!
//! Renders into a linear framebuffer whose pixel format is only known at
//! runtime.
//!
//! ## Layout
//!
//! - `devices::framebuffer`: geometry, pixel codec, off-screen buffer, drawing
//! - `devices::mapping`: collaborator traits for hardware queries and mappings
//! - `devices::display`: startup sequence tying the collaborators together
//! - `logger`: `log` backend writing into a host supplied sink
//!
//! The crate is `no_std` and only needs `alloc` for the off-screen buffer.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod devices;
pub mod error;
pub mod logger;

pub use devices::display::open_display;
pub use devices::framebuffer::{
    codec, BufferMode, Canvas, ChannelLayout, Color, Draw, FrameBuffer, Pixel, PixelLayout,
    Point, RawPixel, ScreenGeometry,
};
pub use devices::mapping::{GeometrySource, HeapMapper, MappedRegion, MemoryMapper};
pub use error::{FrameBufferError, GeometryError};
