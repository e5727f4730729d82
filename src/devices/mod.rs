//! Device Subsystem
//!
//! Display device abstractions:
//! - `framebuffer`: Pixel format, codec, off-screen buffer and drawing
//! - `mapping`: Hardware query and memory mapping collaborators
//! - `display`: Startup sequence from hardware query to mapped framebuffer

pub mod display;
pub mod framebuffer;
pub mod mapping;
