//! Display bring-up
//!
//! Query the mode, try to activate it, build the framebuffer and map it.

use crate::devices::framebuffer::{BufferMode, FrameBuffer};
use crate::devices::mapping::{GeometrySource, MemoryMapper};
use crate::error::FrameBufferError;

/// Opens a mapped framebuffer for the current screen mode.
///
/// A failed geometry query or mapping is returned to the caller. A failed
/// activation is only logged; the queried mode is used as is.
pub fn open_display<S, M>(
    source: &mut S,
    mapper: M,
    mode: BufferMode,
) -> Result<FrameBuffer<M>, FrameBufferError>
where
    S: GeometrySource,
    M: MemoryMapper,
{
    let geometry = source.query_geometry()?;
    log::info!(
        "screen {}x{}, {} bytes per line, {} bpp",
        geometry.width(),
        geometry.height(),
        geometry.bytes_per_line(),
        geometry.bits_per_pixel()
    );

    if let Err(err) = source.activate(&geometry) {
        log::warn!("could not activate screen mode: {}", err);
    }

    let mut fb = FrameBuffer::with_mode(geometry, mapper, mode);
    fb.map()?;
    Ok(fb)
}
