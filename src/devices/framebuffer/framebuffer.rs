//! Off-screen buffer bound to a hardware mapping
use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};

use super::codec::{self, Pixel, RawPixel};
use super::color::Color;
use super::draw::Canvas;
use super::geometry::ScreenGeometry;
use crate::devices::mapping::{MappedRegion, MemoryMapper};
use crate::error::FrameBufferError;

/// Where pixel writes land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferMode {
    /// Draw into an off-screen buffer, copy it out on `present`.
    #[default]
    Buffered,
    /// Draw straight into the mapped region; no off-screen buffer.
    Direct,
}

/// Framebuffer with runtime pixel format.
///
/// Starts unmapped. `map` binds it to a region from the mapper, `unmap` (or
/// drop) gives the region back. The type is move-only: the off-screen
/// buffer and the mapping have a single owner.
pub struct FrameBuffer<M: MemoryMapper> {
    geometry: ScreenGeometry,
    mode: BufferMode,
    buffer: Vec<u8>,
    mapper: M,
    region: Option<M::Region>,
}

impl<M: MemoryMapper> FrameBuffer<M> {
    pub fn new(geometry: ScreenGeometry, mapper: M) -> Self {
        Self::with_mode(geometry, mapper, BufferMode::Buffered)
    }

    pub fn with_mode(geometry: ScreenGeometry, mapper: M, mode: BufferMode) -> Self {
        let buffer = match mode {
            BufferMode::Buffered => vec![0; geometry.buffer_len()],
            BufferMode::Direct => Vec::new(),
        };
        Self {
            geometry,
            mode,
            buffer,
            mapper,
            region: None,
        }
    }

    pub fn geometry(&self) -> &ScreenGeometry {
        &self.geometry
    }

    pub fn width(&self) -> usize {
        self.geometry.width()
    }

    pub fn height(&self) -> usize {
        self.geometry.height()
    }

    pub fn mode(&self) -> BufferMode {
        self.mode
    }

    pub fn is_mapped(&self) -> bool {
        self.region.is_some()
    }

    /// Bytes in one frame, padding included.
    pub fn buffer_len(&self) -> usize {
        self.geometry.buffer_len()
    }

    /// The off-screen buffer. Empty in `Direct` mode.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Read-only view of the mapped region, if any.
    pub fn mapped_bytes(&self) -> Option<&[u8]> {
        self.region.as_ref().map(|region| region.as_slice())
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Requests a mapping sized to one frame. Already mapped is a no-op.
    pub fn map(&mut self) -> Result<(), FrameBufferError> {
        if self.region.is_some() {
            log::debug!("framebuffer already mapped");
            return Ok(());
        }

        let len = self.buffer_len();
        let region = self.mapper.request_mapping(len)?;
        if region.len() < len {
            self.mapper.release_mapping(region, len);
            return Err(FrameBufferError::MappingFailed(
                "mapped region is smaller than one frame",
            ));
        }

        log::info!(
            "mapped {} byte framebuffer ({}x{}, {} bpp)",
            len,
            self.width(),
            self.height(),
            self.geometry.bits_per_pixel()
        );
        self.region = Some(region);
        Ok(())
    }

    /// Releases the mapping. Unmapping an unmapped framebuffer is a no-op.
    pub fn unmap(&mut self) {
        match self.region.take() {
            Some(region) => {
                let len = self.buffer_len();
                self.mapper.release_mapping(region, len);
                log::info!("unmapped {} byte framebuffer", len);
            }
            None => log::debug!("framebuffer not mapped, nothing to release"),
        }
    }

    fn pixels(&self) -> Result<&[u8], FrameBufferError> {
        match self.mode {
            BufferMode::Buffered => Ok(&self.buffer),
            BufferMode::Direct => self
                .region
                .as_ref()
                .map(|region| region.as_slice())
                .ok_or(FrameBufferError::NotMapped),
        }
    }

    fn pixels_mut(&mut self) -> Result<&mut [u8], FrameBufferError> {
        match self.mode {
            BufferMode::Buffered => Ok(&mut self.buffer),
            BufferMode::Direct => self
                .region
                .as_mut()
                .map(|region| region.as_mut_slice())
                .ok_or(FrameBufferError::NotMapped),
        }
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize, FrameBufferError> {
        self.geometry
            .pixel_offset(x, y)
            .ok_or(FrameBufferError::OutOfRangeCoordinate { x, y })
    }

    /// Writes a raw pixel value, low byte first.
    pub fn set_raw_pixel(&mut self, x: usize, y: usize, raw: RawPixel) -> Result<(), FrameBufferError> {
        let offset = self.offset(x, y)?;
        let bpp = self.geometry.bytes_per_pixel();
        let bytes = raw.to_le_bytes();
        let pixels = self.pixels_mut()?;
        pixels[offset..offset + bpp].copy_from_slice(&bytes[..bpp]);
        Ok(())
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> Result<(), FrameBufferError> {
        let raw = codec::encode(color, &self.geometry);
        self.set_raw_pixel(x, y, raw)
    }

    /// Writes a pre-encoded pixel without running the codec again.
    pub fn set_packed_pixel(&mut self, x: usize, y: usize, pixel: &Pixel) -> Result<(), FrameBufferError> {
        self.set_raw_pixel(x, y, pixel.raw())
    }

    pub fn get_raw_pixel(&self, x: usize, y: usize) -> Result<RawPixel, FrameBufferError> {
        let offset = self.offset(x, y)?;
        let bpp = self.geometry.bytes_per_pixel();
        let pixels = self.pixels()?;
        let mut bytes = [0u8; 4];
        bytes[..bpp].copy_from_slice(&pixels[offset..offset + bpp]);
        Ok(RawPixel::from_le_bytes(bytes))
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Color, FrameBufferError> {
        let raw = self.get_raw_pixel(x, y)?;
        Ok(codec::decode(raw, &self.geometry))
    }

    /// Zero-fills the frame.
    pub fn blank(&mut self) -> Result<(), FrameBufferError> {
        let len = self.buffer_len();
        let pixels = self.pixels_mut()?;
        pixels[..len].fill(0);
        Ok(())
    }

    /// Copies the whole off-screen buffer into the mapped region.
    ///
    /// In `Direct` mode the region already holds the frame, so this only
    /// checks that a mapping exists.
    pub fn present(&mut self) -> Result<(), FrameBufferError> {
        let region = self.region.as_mut().ok_or(FrameBufferError::NotMapped)?;
        if self.mode == BufferMode::Buffered {
            region.as_mut_slice()[..self.buffer.len()].copy_from_slice(&self.buffer);
        }
        Ok(())
    }
}

impl<M: MemoryMapper> Drop for FrameBuffer<M> {
    fn drop(&mut self) {
        self.unmap();
    }
}

impl<M: MemoryMapper> Canvas for FrameBuffer<M> {
    fn width(&self) -> usize {
        self.geometry.width()
    }

    fn height(&self) -> usize {
        self.geometry.height()
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> Result<(), FrameBufferError> {
        FrameBuffer::set_pixel(self, x, y, color)
    }
}

// Implement DrawTarget for embedded-graphics
impl<M: MemoryMapper> DrawTarget for FrameBuffer<M> {
    type Color = Rgb888;
    type Error = FrameBufferError;

    /// Pixels outside the screen are discarded, as `DrawTarget` requires.
    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics_core::Pixel<Self::Color>>,
    {
        for embedded_graphics_core::Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if !self.geometry.contains(x, y) {
                continue;
            }
            FrameBuffer::set_pixel(self, x, y, Color::from(color))?;
        }
        Ok(())
    }
}

impl<M: MemoryMapper> OriginDimensions for FrameBuffer<M> {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}
