//=========================================================================
// Renderer
//=========================================================================
//
// Stateless drawing routines over a `FrameBuffer`.
//
// Frame composition (back to front):
//   1. draw_background: full-buffer red/green gradient
//   2. draw_sprite:     clipped solid rectangle
//   3. present:         hand the finished frame to the surface
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::frame_buffer::{Frame, FrameBuffer, BYTES_PER_PIXEL};
use super::sprite::Sprite;

//=== PresentationSurface =================================================

/// The display side of the pipeline.
///
/// Implementations show exactly the rectangle described by the frame.
/// Only `rgba32` frames are ever presented.
pub trait PresentationSurface {
    /// Current drawable size in physical pixels.
    fn drawable_size(&self) -> (u32, u32);

    /// Displays a finished frame.
    fn present(&mut self, frame: Frame<'_>);
}

//=== Drawing =============================================================

/// Paints the gradient background over the whole buffer.
///
/// Row `y`, column `x` becomes `(255·y/height, 255·x/width, 0, 255)`,
/// rounded down. The blue channel is always zero.
pub fn draw_background(frame_buffer: &mut FrameBuffer) {
    if frame_buffer.is_empty() {
        return;
    }

    let width = u64::from(frame_buffer.width());
    let height = u64::from(frame_buffer.height());
    let stride = frame_buffer.stride();

    for (y, row) in frame_buffer.as_bytes_mut().chunks_exact_mut(stride).enumerate() {
        let r = (255 * y as u64 / height) as u8;
        for (x, px) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let g = (255 * x as u64 / width) as u8;
            px.copy_from_slice(&[r, g, 0, 255]);
        }
    }
}

/// Paints the sprite rectangle, skipping pixels outside the buffer.
pub fn draw_sprite(frame_buffer: &mut FrameBuffer, sprite: &Sprite) {
    let rgba = sprite.color().to_bytes();

    for i in 0..sprite.height() {
        let y = i64::from(sprite.y) + i64::from(i);
        let Ok(y) = u32::try_from(y) else { continue };

        for j in 0..sprite.width() {
            let x = i64::from(sprite.x) + i64::from(j);
            if let Ok(x) = u32::try_from(x) {
                // Returns false past the right/bottom edge; nothing to do.
                frame_buffer.put_pixel(x, y, rgba);
            }
        }
    }
}

/// Composes a full frame and presents it.
///
/// Background first, sprite on top, then a single `present` call. This is
/// the only path by which pixels reach the surface.
pub fn redraw<S>(frame_buffer: &mut FrameBuffer, sprite: &Sprite, surface: &mut S)
where
    S: PresentationSurface + ?Sized,
{
    draw_background(frame_buffer);
    draw_sprite(frame_buffer, sprite);

    trace!(
        target: "render",
        "Presenting {}x{} frame, sprite at ({}, {})",
        frame_buffer.width(),
        frame_buffer.height(),
        sprite.x,
        sprite.y
    );
    surface.present(frame_buffer.frame());
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics::{Color, PixelFormat};

    fn background(width: u32, height: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        draw_background(&mut fb);
        fb
    }

    //=====================================================================
    // Background
    //=====================================================================

    #[test]
    fn background_origin_is_opaque_black() {
        let fb = background(100, 100);
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn background_follows_gradient_formula() {
        let fb = background(100, 100);

        assert_eq!(fb.pixel(50, 10), Some([25, 127, 0, 255]));
        assert_eq!(fb.pixel(99, 99), Some([252, 252, 0, 255]));

        let fb = background(7, 3);
        assert_eq!(fb.pixel(6, 2), Some([170, 218, 0, 255]));
    }

    #[test]
    fn background_has_red_and_green_but_never_blue() {
        let fb = background(100, 100);

        let pixels: Vec<&[u8]> = fb.as_bytes().chunks_exact(4).collect();
        assert!(pixels.iter().any(|px| px[0] != 0 && px[1] != 0));
        assert!(pixels.iter().all(|px| px[2] == 0));
        assert!(pixels.iter().all(|px| px[3] == 255));
    }

    #[test]
    fn background_is_deterministic_and_overwrites() {
        let mut fb = FrameBuffer::new(32, 16);
        fb.as_bytes_mut().fill(0x5A);
        draw_background(&mut fb);

        assert_eq!(fb, background(32, 16));
    }

    #[test]
    fn background_on_empty_buffer_is_noop() {
        let mut fb = FrameBuffer::new(0, 10);
        draw_background(&mut fb);
        assert!(fb.is_empty());
    }

    //=====================================================================
    // Sprite
    //=====================================================================

    #[test]
    fn sprite_overwrites_background() {
        let mut fb = background(100, 100);
        let before = fb.pixel(10, 10);
        let sprite = Sprite::new(10, 10, Color::WHITE, 5).at(10, 10);

        draw_sprite(&mut fb, &sprite);

        let offset = 10 * fb.stride() + 10 * 4;
        assert_ne!(before, Some([255, 255, 255, 255]));
        assert_eq!(&fb.as_bytes()[offset..offset + 4], &[255, 255, 255, 255]);
        assert_eq!(fb.pixel(19, 19), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(20, 20), background(100, 100).pixel(20, 20));
    }

    #[test]
    fn sprite_clipped_at_left_edge() {
        let reference = background(100, 100);
        let mut fb = reference.clone();
        let sprite = Sprite::new(10, 10, Color::rgba(1, 2, 3, 4), 5).at(-5, 0);

        draw_sprite(&mut fb, &sprite);

        for x in 0..5 {
            assert_eq!(fb.pixel(x, 0), Some([1, 2, 3, 4]), "column {}", x);
        }
        assert_eq!(fb.pixel(5, 0), reference.pixel(5, 0));
        assert_eq!(fb.pixel(0, 10), reference.pixel(0, 10));
    }

    #[test]
    fn sprite_clipped_at_bottom_right() {
        let mut fb = background(20, 20);
        let sprite = Sprite::new(10, 10, Color::WHITE, 5).at(15, 15);

        draw_sprite(&mut fb, &sprite);

        assert_eq!(fb.pixel(19, 19), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(15, 15), Some([255, 255, 255, 255]));
        assert_eq!(fb.len(), 20 * 20 * 4);
    }

    #[test]
    fn sprite_fully_off_screen_writes_nothing() {
        let reference = background(50, 50);
        let mut fb = reference.clone();

        for (x, y) in [(-10, 0), (0, -10), (50, 0), (0, 50), (i32::MAX, i32::MAX), (i32::MIN, 0)] {
            draw_sprite(&mut fb, &Sprite::default().at(x, y));
        }

        assert_eq!(fb, reference);
    }

    //=====================================================================
    // Redraw
    //=====================================================================

    #[derive(Default)]
    struct Capture {
        frames: Vec<(u32, u32, usize, PixelFormat, Vec<u8>)>,
    }

    impl PresentationSurface for Capture {
        fn drawable_size(&self) -> (u32, u32) {
            (0, 0)
        }

        fn present(&mut self, frame: Frame<'_>) {
            self.frames.push((frame.width, frame.height, frame.stride, frame.format, frame.bytes.to_vec()));
        }
    }

    #[test]
    fn redraw_presents_sprite_over_background() {
        let mut fb = FrameBuffer::new(40, 30);
        let sprite = Sprite::default().at(2, 3);
        let mut surface = Capture::default();

        redraw(&mut fb, &sprite, &mut surface);

        assert_eq!(surface.frames.len(), 1);
        let (w, h, stride, format, bytes) = &surface.frames[0];
        assert_eq!((*w, *h, *stride, *format), (40, 30, 160, PixelFormat::Rgba32));
        assert_eq!(bytes.as_slice(), fb.as_bytes());
        assert_eq!(fb.pixel(2, 3), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
    }
}
