//! Hardware collaborators
//!
//! The framebuffer core never talks to the OS itself. Screen mode queries and
//! memory mappings go through these traits so the same code can drive a real
//! device node or an in-memory region.

use alloc::vec;
use alloc::vec::Vec;

use crate::devices::framebuffer::ScreenGeometry;
use crate::error::FrameBufferError;

/// Source of the current screen mode.
pub trait GeometrySource {
    /// Queries resolution, stride and channel layout from the hardware.
    fn query_geometry(&mut self) -> Result<ScreenGeometry, FrameBufferError>;

    /// Asks the hardware to apply `geometry` now. Best effort; a refusal
    /// is reported as `ActivationFailed`.
    fn activate(&mut self, geometry: &ScreenGeometry) -> Result<(), FrameBufferError>;
}

/// A mapped hardware memory region.
///
/// Implementors must not be `Clone`: a region handle is uniquely owned and
/// can only be moved.
pub trait MappedRegion {
    fn as_slice(&self) -> &[u8];
    fn as_mut_slice(&mut self) -> &mut [u8];

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides and releases mappings of device memory.
pub trait MemoryMapper {
    type Region: MappedRegion;

    fn request_mapping(&mut self, byte_len: usize) -> Result<Self::Region, FrameBufferError>;
    fn release_mapping(&mut self, region: Self::Region, byte_len: usize);
}

/// Heap backed region handed out by `HeapMapper`
#[derive(Debug)]
pub struct HeapRegion {
    bytes: Vec<u8>,
}

impl MappedRegion for HeapRegion {
    fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// In-memory mapper for headless rendering and tests
///
/// Regions start filled with `fill`. The last released region is kept so its
/// contents can be inspected after the framebuffer let go of it.
#[derive(Debug, Default)]
pub struct HeapMapper {
    fill: u8,
    fail_with: Option<&'static str>,
    shortfall: usize,
    live: usize,
    requests: usize,
    released: Option<Vec<u8>>,
}

impl HeapMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions start out filled with `fill` instead of zero.
    pub fn with_fill(fill: u8) -> Self {
        Self {
            fill,
            ..Self::default()
        }
    }

    /// Every request fails with `MappingFailed(reason)`.
    pub fn failing(reason: &'static str) -> Self {
        Self {
            fail_with: Some(reason),
            ..Self::default()
        }
    }

    /// Regions come back `shortfall` bytes smaller than requested.
    pub fn short_by(shortfall: usize) -> Self {
        Self {
            shortfall,
            ..Self::default()
        }
    }

    /// Mappings handed out and not yet released.
    pub fn live_mappings(&self) -> usize {
        self.live
    }

    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Contents of the most recently released region.
    pub fn last_released(&self) -> Option<&[u8]> {
        self.released.as_deref()
    }
}

impl MemoryMapper for HeapMapper {
    type Region = HeapRegion;

    fn request_mapping(&mut self, byte_len: usize) -> Result<HeapRegion, FrameBufferError> {
        self.requests += 1;
        if let Some(reason) = self.fail_with {
            return Err(FrameBufferError::MappingFailed(reason));
        }
        self.live += 1;
        Ok(HeapRegion {
            bytes: vec![self.fill; byte_len.saturating_sub(self.shortfall)],
        })
    }

    fn release_mapping(&mut self, region: HeapRegion, _byte_len: usize) {
        self.live = self.live.saturating_sub(1);
        self.released = Some(region.bytes);
    }
}

impl<M: MemoryMapper> MemoryMapper for &mut M {
    type Region = M::Region;

    fn request_mapping(&mut self, byte_len: usize) -> Result<Self::Region, FrameBufferError> {
        (**self).request_mapping(byte_len)
    }

    fn release_mapping(&mut self, region: Self::Region, byte_len: usize) {
        (**self).release_mapping(region, byte_len)
    }
}
