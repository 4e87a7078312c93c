//=========================================================================
// Frame Buffer
//=========================================================================
//
// Owns the RGBA pixel bytes the renderer paints into.
//
// Layout:
//   4 bytes per pixel (r, g, b, a), rows packed with no padding, so
//   stride = width × 4 and len = stride × height.
//
// Width, height, stride and the byte vector are private and only ever
// replaced together, so no reader can observe a buffer whose length
// disagrees with its dimensions.
//
//=========================================================================

//=== Constants ===========================================================

/// Bytes per `rgba32` pixel.
pub const BYTES_PER_PIXEL: usize = 4;

//=== PixelFormat =========================================================

/// Pixel layouts the presentation boundary accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit red, green, blue, alpha; in that byte order.
    Rgba32,
}

impl PixelFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            PixelFormat::Rgba32 => "rgba32",
        }
    }
}

//=== FrameBuffer =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    stride: usize,
    bytes: Vec<u8>,
}

impl FrameBuffer {
    //--- Construction -----------------------------------------------------

    /// Allocates a zero-filled `width × height` buffer.
    ///
    /// Zero dimensions are accepted and yield an empty buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = width as usize * BYTES_PER_PIXEL;
        Self {
            width,
            height,
            stride,
            bytes: vec![0; stride * height as usize],
        }
    }

    /// Replaces the buffer with a fresh zero-filled one of the new size.
    ///
    /// The previous allocation is dropped. Contents are not preserved,
    /// even when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    //--- Accessors --------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Byte offset of pixel `(x, y)`, or `None` outside the buffer.
    pub fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.stride + x as usize * BYTES_PER_PIXEL)
    }

    /// The four channels of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let mut px = [0; 4];
        px.copy_from_slice(&self.bytes[offset..offset + BYTES_PER_PIXEL]);
        Some(px)
    }

    /// Overwrites pixel `(x, y)`. Returns `false` (no write) when out of
    /// bounds.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> bool {
        match self.offset(x, y) {
            Some(offset) => {
                self.bytes[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&rgba);
                true
            }
            None => false,
        }
    }

    /// Borrowed view handed to the presentation boundary.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: PixelFormat::Rgba32,
            bytes: &self.bytes,
        }
    }
}

//=== Frame ===============================================================

/// One presentable image: dimensions, layout and pixel bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub format: PixelFormat,
    pub bytes: &'a [u8],
}

//=========================================================================
// Unit Tests
//=========================================================================
