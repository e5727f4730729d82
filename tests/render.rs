use rawfb::{
    codec, open_display, BufferMode, ChannelLayout, Color, Draw, FrameBufferError,
    GeometrySource, HeapMapper, Pixel, PixelLayout, Point, ScreenGeometry,
};

struct MirroredPanel;

impl GeometrySource for MirroredPanel {
    fn query_geometry(&mut self) -> Result<ScreenGeometry, FrameBufferError> {
        let layout = PixelLayout {
            red: ChannelLayout::mirrored(11, 5),
            green: ChannelLayout::new(5, 6),
            blue: ChannelLayout::mirrored(0, 5),
            alpha: ChannelLayout::ABSENT,
        };
        ScreenGeometry::new(16, 8, 2, 40, layout).map_err(FrameBufferError::from)
    }

    fn activate(&mut self, _geometry: &ScreenGeometry) -> Result<(), FrameBufferError> {
        Ok(())
    }
}

#[test]
fn full_frame_cycle() {
    let mut mapper = HeapMapper::with_fill(0xAA);
    {
        let mut fb = open_display(&mut MirroredPanel, &mut mapper, BufferMode::Buffered).unwrap();
        assert_eq!(fb.buffer_len(), 8 * 40);

        let white = Pixel::new(fb.geometry(), Color::WHITE);
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                fb.set_packed_pixel(x, y, &white).unwrap();
            }
        }
        fb.draw_rectangle(2, 2, 13, 5, Color::RED).unwrap();
        fb.draw_line(Point::new(0, 7), Point::new(15, 0), Color::BLUE).unwrap();
        fb.present().unwrap();

        let mapped = fb.mapped_bytes().unwrap();
        assert_eq!(mapped, fb.buffer());
        // stride padding is copied as-is from the off-screen buffer
        assert_eq!(&mapped[32..40], &[0u8; 8]);

        assert_eq!(fb.get_pixel(2, 2), Ok(Color::with_alpha(0xF8, 0, 0, 0)));
        assert_eq!(fb.get_pixel(8, 4), Ok(Color::with_alpha(0xF8, 0xFC, 0xF8, 0)));
        assert_eq!(fb.get_pixel(0, 7), Ok(Color::with_alpha(0, 0, 0xF8, 0)));

        fb.blank().unwrap();
        fb.present().unwrap();
    }
    assert_eq!(mapper.live_mappings(), 0);
    assert_eq!(mapper.last_released(), Some(&[0u8; 8 * 40][..]));
}

#[test]
fn mirrored_fields_are_bit_reversed_in_memory() {
    let geometry = MirroredPanel.query_geometry().unwrap();
    // red 0b10000 mirrored to 0b00001, blue 0b11000 mirrored to 0b00011
    let raw = codec::encode(Color::new(0x80, 0x00, 0xC0), &geometry);
    assert_eq!(raw, (0b00001 << 11) | 0b00011);
    assert_eq!(codec::decode(raw, &geometry), Color::with_alpha(0x80, 0, 0xC0, 0));
}
