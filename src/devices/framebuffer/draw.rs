//! Line and rectangle primitives
//!
//! Everything here goes through `Canvas::set_pixel`, so the primitives work
//! for any pixel format. Out-of-range pixels abort the primitive with the
//! canvas' error; pixels written before that stay written.

use super::color::Color;
use crate::error::FrameBufferError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Pixel sink the drawing primitives render into
pub trait Canvas {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> Result<(), FrameBufferError>;
}

/// Drawing operations, available on every `Canvas`
pub trait Draw: Canvas {
    /// DDA line from `start` to `end`, both inclusive.
    ///
    /// Writes `max(|dx|, |dy|) + 1` pixels; the minor axis coordinate is the
    /// truncated interpolated value.
    fn draw_line(&mut self, start: Point, end: Point, color: Color) -> Result<(), FrameBufferError> {
        let dx = end.x as i64 - start.x as i64;
        let dy = end.y as i64 - start.y as i64;
        let steps = dx.abs().max(dy.abs());

        self.set_pixel(start.x, start.y, color)?;
        if steps == 0 {
            return Ok(());
        }

        let (start_x, start_y) = (start.x as f32, start.y as f32);
        let (dx, dy, steps_f) = (dx as f32, dy as f32, steps as f32);
        for v in 1..=steps {
            let t = v as f32;
            let x = libm::truncf(start_x + dx * t / steps_f);
            let y = libm::truncf(start_y + dy * t / steps_f);
            self.set_pixel(x as usize, y as usize, color)?;
        }
        Ok(())
    }

    fn draw_horizontal_line(
        &mut self,
        y: usize,
        start_x: usize,
        end_x: usize,
        color: Color,
    ) -> Result<(), FrameBufferError> {
        for x in start_x.min(end_x)..=start_x.max(end_x) {
            self.set_pixel(x, y, color)?;
        }
        Ok(())
    }

    fn draw_vertical_line(
        &mut self,
        x: usize,
        start_y: usize,
        end_y: usize,
        color: Color,
    ) -> Result<(), FrameBufferError> {
        for y in start_y.min(end_y)..=start_y.max(end_y) {
            self.set_pixel(x, y, color)?;
        }
        Ok(())
    }

    /// Outline with corners at `(start_x, start_y)` and `(end_x, end_y)`.
    fn draw_rectangle(
        &mut self,
        start_x: usize,
        start_y: usize,
        end_x: usize,
        end_y: usize,
        color: Color,
    ) -> Result<(), FrameBufferError> {
        self.draw_horizontal_line(start_y, start_x, end_x, color)?;
        self.draw_horizontal_line(end_y, start_x, end_x, color)?;
        self.draw_vertical_line(start_x, start_y, end_y, color)?;
        self.draw_vertical_line(end_x, start_y, end_y, color)
    }

    fn fill_rectangle(
        &mut self,
        start_x: usize,
        start_y: usize,
        end_x: usize,
        end_y: usize,
        color: Color,
    ) -> Result<(), FrameBufferError> {
        for y in start_y.min(end_y)..=start_y.max(end_y) {
            self.draw_horizontal_line(y, start_x, end_x, color)?;
        }
        Ok(())
    }

    /// Fills every pixel of the canvas.
    fn fill_screen(&mut self, color: Color) -> Result<(), FrameBufferError> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.fill_rectangle(0, 0, width - 1, height - 1, color)
    }
}

impl<C: Canvas + ?Sized> Draw for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;

    struct Recorder {
        width: usize,
        height: usize,
        touched: Vec<(usize, usize)>,
    }

    impl Recorder {
        fn new(width: usize, height: usize) -> Self {
            Self {
                width,
                height,
                touched: Vec::new(),
            }
        }

        fn distinct(&self) -> BTreeSet<(usize, usize)> {
            self.touched.iter().copied().collect()
        }
    }

    impl Canvas for Recorder {
        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn set_pixel(&mut self, x: usize, y: usize, _color: Color) -> Result<(), FrameBufferError> {
            if x >= self.width || y >= self.height {
                return Err(FrameBufferError::OutOfRangeCoordinate { x, y });
            }
            self.touched.push((x, y));
            Ok(())
        }
    }

    #[test]
    fn horizontal_line_touches_each_pixel_once() {
        let mut canvas = Recorder::new(10, 10);
        canvas
            .draw_line(Point::new(0, 0), Point::new(5, 0), Color::WHITE)
            .unwrap();
        let expected: Vec<_> = (0..=5).map(|x| (x, 0)).collect();
        assert_eq!(canvas.touched, expected);
    }

    #[test]
    fn zero_length_line_touches_one_pixel() {
        let mut canvas = Recorder::new(10, 10);
        canvas
            .draw_line(Point::new(3, 3), Point::new(3, 3), Color::WHITE)
            .unwrap();
        assert_eq!(canvas.touched, [(3, 3)]);
    }

    #[test]
    fn steep_line_truncates_minor_axis() {
        let mut canvas = Recorder::new(10, 10);
        canvas
            .draw_line(Point::new(0, 0), Point::new(2, 5), Color::WHITE)
            .unwrap();
        assert_eq!(
            canvas.touched,
            [(0, 0), (0, 1), (0, 2), (1, 3), (1, 4), (2, 5)]
        );
    }

    #[test]
    fn backwards_line_reaches_the_end_point() {
        let mut canvas = Recorder::new(10, 10);
        canvas
            .draw_line(Point::new(5, 4), Point::new(0, 4), Color::WHITE)
            .unwrap();
        let expected: Vec<_> = (0..=5).rev().map(|x| (x, 4)).collect();
        assert_eq!(canvas.touched, expected);

        canvas.touched.clear();
        canvas
            .draw_line(Point::new(9, 0), Point::new(0, 9), Color::WHITE)
            .unwrap();
        assert_eq!(canvas.touched.len(), 10);
        assert_eq!(canvas.touched.last(), Some(&(0, 9)));
    }

    #[test]
    fn rectangle_outline_covers_the_border() {
        let mut canvas = Recorder::new(10, 10);
        canvas.draw_rectangle(1, 1, 5, 4, Color::RED).unwrap();
        let border = canvas.distinct();
        assert_eq!(border.len(), 2 * 5 + 2 * 4 - 4);
        assert!(border.contains(&(1, 1)));
        assert!(border.contains(&(5, 4)));
        assert!(!border.contains(&(3, 2)));
    }

    #[test]
    fn fill_covers_every_pixel_even_with_reversed_bounds() {
        let mut canvas = Recorder::new(10, 10);
        canvas.fill_rectangle(4, 3, 2, 1, Color::RED).unwrap();
        assert_eq!(canvas.touched.len(), 3 * 3);
        assert_eq!(canvas.distinct().len(), 9);
        assert!(canvas.distinct().contains(&(2, 1)));
        assert!(canvas.distinct().contains(&(4, 3)));
    }

    #[test]
    fn primitives_stop_at_the_screen_edge() {
        let mut canvas = Recorder::new(4, 4);
        assert_eq!(
            canvas.draw_horizontal_line(0, 2, 4, Color::RED),
            Err(FrameBufferError::OutOfRangeCoordinate { x: 4, y: 0 })
        );
        assert_eq!(canvas.touched, [(2, 0), (3, 0)]);
    }

    #[test]
    fn fill_screen_covers_the_whole_canvas() {
        let mut canvas = Recorder::new(3, 2);
        canvas.fill_screen(Color::BLUE).unwrap();
        assert_eq!(canvas.distinct().len(), 6);
    }
}
