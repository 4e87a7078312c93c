//=========================================================================
// Window Surface
//=========================================================================
//
// `PresentationSurface` over a Winit window, presenting through
// softbuffer.
//
// softbuffer wants one `u32` per pixel in `0x00RRGGBB` form, so every
// `rgba32` frame is repacked on its way out. Alpha is dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::num::NonZeroU32;
use std::rc::Rc;

use log::{error, trace};
use softbuffer::{Context, SoftBufferError, Surface};
use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::graphics::{Frame, PresentationSurface, BYTES_PER_PIXEL};

//=== WindowSurface =======================================================

pub(crate) struct WindowSurface {
    window: Rc<Window>,
    // Owns the display connection the surface was created from.
    _context: Context<Rc<Window>>,
    surface: Surface<Rc<Window>, Rc<Window>>,
}

impl WindowSurface {
    pub(crate) fn new(window: Rc<Window>) -> Result<Self, SoftBufferError> {
        let context = Context::new(Rc::clone(&window))?;
        let surface = Surface::new(&context, Rc::clone(&window))?;

        Ok(Self {
            window,
            _context: context,
            surface,
        })
    }

    fn try_present(&mut self, frame: Frame<'_>) -> Result<(), SoftBufferError> {
        let (Some(width), Some(height)) = (NonZeroU32::new(frame.width), NonZeroU32::new(frame.height))
        else {
            trace!(target: "platform", "Skipping empty frame");
            return Ok(());
        };

        self.surface.resize(width, height)?;

        let mut buffer = self.surface.buffer_mut()?;
        pack_xrgb(&frame, &mut buffer);
        buffer.present()
    }
}

impl PresentationSurface for WindowSurface {
    fn drawable_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn present(&mut self, frame: Frame<'_>) {
        if let Err(e) = self.try_present(frame) {
            error!(target: "platform", "Frame dropped, present failed: {}", e);
        }
    }
}

//=== Pixel Packing =======================================================

/// Repacks an `rgba32` frame into `0x00RRGGBB` words, honouring the
/// frame's stride.
pub(crate) fn pack_xrgb(frame: &Frame<'_>, out: &mut [u32]) {
    let row_bytes = frame.width as usize * BYTES_PER_PIXEL;
    if row_bytes == 0 || frame.stride == 0 {
        return;
    }

    let rows = frame.bytes.chunks(frame.stride).take(frame.height as usize);
    for (row, dst_row) in rows.zip(out.chunks_mut(frame.width as usize)) {
        let Some(row) = row.get(..row_bytes) else { break };
        for (px, dst) in row.chunks_exact(BYTES_PER_PIXEL).zip(dst_row) {
            *dst = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
