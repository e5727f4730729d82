use core::fmt;

/// Errors surfaced by the framebuffer core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameBufferError {
    /// The hardware could not describe its screen mode.
    GeometryQueryFailed(&'static str),
    /// The hardware refused to apply the screen mode.
    ActivationFailed(&'static str),
    /// The reported geometry breaks one of the layout invariants.
    InvalidGeometry(GeometryError),
    /// The mapping collaborator could not provide a region.
    MappingFailed(&'static str),
    /// The operation needs a mapped region but none is held.
    NotMapped,
    /// Pixel access outside `[0, width) x [0, height)`.
    OutOfRangeCoordinate { x: usize, y: usize },
}

/// Reasons a `ScreenGeometry` is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    ZeroDimension,
    UnsupportedBytesPerPixel(usize),
    LineTooShort { bytes_per_line: usize, required: usize },
    TooLarge,
    ChannelTooLong { channel: &'static str, length: u32 },
    ChannelOutsidePixel { channel: &'static str, offset: u32, length: u32 },
}

impl fmt::Display for FrameBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameBufferError::GeometryQueryFailed(reason) => {
                write!(f, "geometry query failed: {}", reason)
            }
            FrameBufferError::ActivationFailed(reason) => {
                write!(f, "screen mode activation failed: {}", reason)
            }
            FrameBufferError::InvalidGeometry(err) => write!(f, "invalid geometry: {}", err),
            FrameBufferError::MappingFailed(reason) => write!(f, "mapping failed: {}", reason),
            FrameBufferError::NotMapped => write!(f, "framebuffer is not mapped"),
            FrameBufferError::OutOfRangeCoordinate { x, y } => {
                write!(f, "coordinate ({}, {}) is outside the screen", x, y)
            }
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::ZeroDimension => write!(f, "width and height must be non-zero"),
            GeometryError::UnsupportedBytesPerPixel(bpp) => {
                write!(f, "{} bytes per pixel is not in 1..=4", bpp)
            }
            GeometryError::LineTooShort {
                bytes_per_line,
                required,
            } => write!(
                f,
                "line stride {} is shorter than the {} bytes a row needs",
                bytes_per_line, required
            ),
            GeometryError::TooLarge => write!(f, "frame size overflows the address space"),
            GeometryError::ChannelTooLong { channel, length } => {
                write!(f, "{} channel is {} bits long, at most 8 allowed", channel, length)
            }
            GeometryError::ChannelOutsidePixel {
                channel,
                offset,
                length,
            } => write!(
                f,
                "{} channel at offset {} with length {} does not fit in the pixel",
                channel, offset, length
            ),
        }
    }
}

impl From<GeometryError> for FrameBufferError {
    fn from(err: GeometryError) -> Self {
        FrameBufferError::InvalidGeometry(err)
    }
}

impl core::error::Error for FrameBufferError {}
impl core::error::Error for GeometryError {}
