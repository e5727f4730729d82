//! Screen geometry and per-channel bit layout

use crate::error::GeometryError;

/// Position of one color channel inside a packed pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelLayout {
    pub offset: u32,
    pub length: u32,
    /// Bit significance of the field is mirrored in hardware.
    pub msb_right: bool,
}

impl ChannelLayout {
    /// A channel that is not present in the pixel.
    pub const ABSENT: ChannelLayout = ChannelLayout {
        offset: 0,
        length: 0,
        msb_right: false,
    };

    pub const fn new(offset: u32, length: u32) -> Self {
        Self {
            offset,
            length,
            msb_right: false,
        }
    }

    pub const fn mirrored(offset: u32, length: u32) -> Self {
        Self {
            offset,
            length,
            msb_right: true,
        }
    }

    pub fn is_present(&self) -> bool {
        self.length > 0
    }

    fn validate(&self, channel: &'static str, bits_per_pixel: u32) -> Result<(), GeometryError> {
        if self.length > 8 {
            return Err(GeometryError::ChannelTooLong {
                channel,
                length: self.length,
            });
        }
        if self.is_present() && self.offset.saturating_add(self.length) > bits_per_pixel {
            return Err(GeometryError::ChannelOutsidePixel {
                channel,
                offset: self.offset,
                length: self.length,
            });
        }
        Ok(())
    }
}

const CHANNEL_NAMES: [&str; 4] = ["red", "green", "blue", "alpha"];

/// Bit layout of all four channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelLayout {
    pub red: ChannelLayout,
    pub green: ChannelLayout,
    pub blue: ChannelLayout,
    pub alpha: ChannelLayout,
}

impl PixelLayout {
    pub const RGBA8888: PixelLayout = PixelLayout {
        red: ChannelLayout::new(0, 8),
        green: ChannelLayout::new(8, 8),
        blue: ChannelLayout::new(16, 8),
        alpha: ChannelLayout::new(24, 8),
    };

    pub const BGRA8888: PixelLayout = PixelLayout {
        red: ChannelLayout::new(16, 8),
        green: ChannelLayout::new(8, 8),
        blue: ChannelLayout::new(0, 8),
        alpha: ChannelLayout::new(24, 8),
    };

    /// 32-bit pixel with an unused top byte, as most fbdev drivers report.
    pub const XRGB8888: PixelLayout = PixelLayout {
        red: ChannelLayout::new(16, 8),
        green: ChannelLayout::new(8, 8),
        blue: ChannelLayout::new(0, 8),
        alpha: ChannelLayout::ABSENT,
    };

    pub const RGB565: PixelLayout = PixelLayout {
        red: ChannelLayout::new(11, 5),
        green: ChannelLayout::new(5, 6),
        blue: ChannelLayout::new(0, 5),
        alpha: ChannelLayout::ABSENT,
    };

    /// Channels in red, green, blue, alpha order.
    pub fn channels(&self) -> [ChannelLayout; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

/// Immutable description of the display's resolution, stride and pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    bytes_per_line: usize,
    layout: PixelLayout,
}

impl ScreenGeometry {
    pub fn new(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        bytes_per_line: usize,
        layout: PixelLayout,
    ) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::ZeroDimension);
        }
        if !(1..=4).contains(&bytes_per_pixel) {
            return Err(GeometryError::UnsupportedBytesPerPixel(bytes_per_pixel));
        }
        let required = width.saturating_mul(bytes_per_pixel);
        if bytes_per_line < required {
            return Err(GeometryError::LineTooShort {
                bytes_per_line,
                required,
            });
        }
        if height.checked_mul(bytes_per_line).is_none() {
            return Err(GeometryError::TooLarge);
        }

        let bits_per_pixel = (bytes_per_pixel * 8) as u32;
        for (&name, channel) in CHANNEL_NAMES.iter().zip(layout.channels()) {
            channel.validate(name, bits_per_pixel)?;
        }

        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            bytes_per_line,
            layout,
        })
    }

    /// Geometry without line padding.
    pub fn packed(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        layout: PixelLayout,
    ) -> Result<Self, GeometryError> {
        Self::new(width, height, bytes_per_pixel, width.saturating_mul(bytes_per_pixel), layout)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    pub fn bits_per_pixel(&self) -> u32 {
        (self.bytes_per_pixel * 8) as u32
    }

    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    /// Bytes in a row that hold pixels, excluding stride padding.
    pub fn pixel_bytes_per_line(&self) -> usize {
        self.width * self.bytes_per_pixel
    }

    /// Size of a whole frame: `height * bytes_per_line`.
    pub fn buffer_len(&self) -> usize {
        self.height * self.bytes_per_line
    }

    pub fn layout(&self) -> &PixelLayout {
        &self.layout
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Byte offset of pixel `(x, y)`, or `None` outside the screen.
    pub fn pixel_offset(&self, x: usize, y: usize) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some(y * self.bytes_per_line + x * self.bytes_per_pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_stride_is_used_for_offsets() {
        let geometry = ScreenGeometry::new(10, 4, 2, 24, PixelLayout::RGB565).unwrap();
        assert_eq!(geometry.buffer_len(), 96);
        assert_eq!(geometry.pixel_bytes_per_line(), 20);
        assert_eq!(geometry.pixel_offset(3, 2), Some(2 * 24 + 3 * 2));
        assert_eq!(geometry.pixel_offset(10, 0), None);
        assert_eq!(geometry.pixel_offset(0, 4), None);
    }

    #[test]
    fn rejects_bad_dimensions_and_strides() {
        assert_eq!(
            ScreenGeometry::new(0, 4, 4, 0, PixelLayout::RGBA8888),
            Err(GeometryError::ZeroDimension)
        );
        assert_eq!(
            ScreenGeometry::new(4, 4, 5, 20, PixelLayout::RGBA8888),
            Err(GeometryError::UnsupportedBytesPerPixel(5))
        );
        assert_eq!(
            ScreenGeometry::new(4, 4, 4, 12, PixelLayout::RGBA8888),
            Err(GeometryError::LineTooShort {
                bytes_per_line: 12,
                required: 16
            })
        );
    }

    #[test]
    fn rejects_channels_that_do_not_fit() {
        let mut layout = PixelLayout::RGB565;
        layout.red = ChannelLayout::new(12, 5);
        assert_eq!(
            ScreenGeometry::packed(4, 4, 2, layout),
            Err(GeometryError::ChannelOutsidePixel {
                channel: "red",
                offset: 12,
                length: 5
            })
        );

        layout.red = ChannelLayout::new(0, 9);
        assert_eq!(
            ScreenGeometry::packed(4, 4, 2, layout),
            Err(GeometryError::ChannelTooLong {
                channel: "red",
                length: 9
            })
        );
    }

    #[test]
    fn every_channel_is_checked() {
        let mut layout = PixelLayout::RGBA8888;
        layout.alpha = ChannelLayout::new(28, 8);
        assert_eq!(
            ScreenGeometry::packed(4, 4, 4, layout),
            Err(GeometryError::ChannelOutsidePixel {
                channel: "alpha",
                offset: 28,
                length: 8
            })
        );
        assert_eq!(layout.channels()[3], ChannelLayout::new(28, 8));
    }

    #[test]
    fn absent_channel_offset_is_ignored() {
        let mut layout = PixelLayout::RGB565;
        layout.alpha = ChannelLayout::new(40, 0);
        assert!(ScreenGeometry::packed(4, 4, 2, layout).is_ok());
    }
}
