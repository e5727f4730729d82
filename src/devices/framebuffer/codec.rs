//! Conversion between 8-bit-per-channel colors and raw packed pixels
//!
//! Encoding truncates each channel to its field width (high bits kept) and
//! decoding shifts the field back up without filling the vacated low bits, so
//! `decode(encode(v))` keeps only the top `length` bits of every channel.

use super::color::Color;
use super::geometry::{ChannelLayout, ScreenGeometry};

/// Hardware-native pixel value; wide enough for up to 4 bytes per pixel.
pub type RawPixel = u32;

/// Byte with exactly the low `length` bits set.
pub fn create_bit_mask(length: u32) -> u8 {
    if length >= 8 {
        0xFF
    } else {
        ((1u16 << length) - 1) as u8
    }
}

/// Reverses all 8 bits of `b`.
pub fn reverse_byte(b: u8) -> u8 {
    let b = (b & 0xF0) >> 4 | (b & 0x0F) << 4;
    let b = (b & 0xCC) >> 2 | (b & 0x33) << 2;
    (b & 0xAA) >> 1 | (b & 0x55) << 1
}

// Mirrors the low `length` bits; equals `reverse_byte` for full bytes.
fn mirror_field(bits: u8, length: u32) -> u8 {
    reverse_byte(bits) >> (8 - length)
}

fn encode_channel(value: u8, channel: &ChannelLayout) -> RawPixel {
    if !channel.is_present() {
        return 0;
    }
    let mut bits = value >> (8 - channel.length);
    if channel.msb_right {
        bits = mirror_field(bits, channel.length);
    }
    (bits as RawPixel) << channel.offset
}

fn decode_channel(raw: RawPixel, channel: &ChannelLayout) -> u8 {
    if !channel.is_present() {
        return 0;
    }
    let mut bits = (raw >> channel.offset) as u8 & create_bit_mask(channel.length);
    if channel.msb_right {
        bits = mirror_field(bits, channel.length);
    }
    bits << (8 - channel.length)
}

/// Packs `color` into the bit pattern `geometry` expects.
pub fn encode(color: Color, geometry: &ScreenGeometry) -> RawPixel {
    let layout = geometry.layout();
    encode_channel(color.r, &layout.red)
        | encode_channel(color.g, &layout.green)
        | encode_channel(color.b, &layout.blue)
        | encode_channel(color.a, &layout.alpha)
}

/// Unpacks a raw pixel. Absent channels decode as 0.
pub fn decode(raw: RawPixel, geometry: &ScreenGeometry) -> Color {
    let layout = geometry.layout();
    Color::with_alpha(
        decode_channel(raw, &layout.red),
        decode_channel(raw, &layout.green),
        decode_channel(raw, &layout.blue),
        decode_channel(raw, &layout.alpha),
    )
}

/// A color together with its packed form for one geometry.
///
/// Encoding once and writing the same `Pixel` many times avoids re-running
/// the codec for every pixel of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    color: Color,
    raw: RawPixel,
}

impl Pixel {
    pub fn new(geometry: &ScreenGeometry, color: Color) -> Self {
        Self {
            color,
            raw: encode(color, geometry),
        }
    }

    pub fn from_raw(geometry: &ScreenGeometry, raw: RawPixel) -> Self {
        Self {
            color: decode(raw, geometry),
            raw,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn raw(&self) -> RawPixel {
        self.raw
    }
}
