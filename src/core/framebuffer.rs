//=========================================================================
// Off-Screen Frame Buffer
//
// CPU-addressable pixel surface at a fixed logical resolution.
//
// The buffer is independent of the on-screen window size: game logic
// always writes the same logical grid, and the platform layer stretches
// the whole grid into whatever client area the window currently has.
//
// Responsibilities:
// - Own the pixel memory (one live allocation, rebound only on resize)
// - Expose pixel access to game logic (`pixels_mut`)
// - Stretch-blit the logical grid into a destination surface
//
// Pixel format:
//   32 bits per pixel, `0x00RRGGBB`, row-major, top-down scan order.
//   This is the layout the software presentation surface consumes
//   verbatim, so presenting is a pure copy with scaling.
//
//=========================================================================

//=== Constants ===========================================================

/// Bytes per pixel of the fixed 32-bit format.
pub const BYTES_PER_PIXEL: usize = 4;

//=== FrameBuffer =========================================================

/// Off-screen pixel surface at a fixed logical resolution.
///
/// Exactly one instance exists per frame loop, owned by the platform
/// layer for the lifetime of the window. Game logic receives `&mut`
/// access once per frame and never owns the buffer.
///
/// # Memory
///
/// The pixel block is always sized `width * height` 32-bit words and
/// stays valid between resizes. `resize` rebinds the storage: the new
/// block is allocated and the prior block is released as part of the
/// same assignment, so repeated resizes can neither leak nor double
/// free.
pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    //--- Construction -----------------------------------------------------

    /// Creates a buffer already sized to the given logical resolution.
    pub fn new(width: u32, height: u32) -> Self {
        let mut buffer = Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
        };
        buffer.resize(width, height);
        buffer
    }

    //--- Resize -----------------------------------------------------------

    /// Rebinds the pixel storage to a zero-initialized block sized
    /// `width * height` pixels.
    ///
    /// The previously held block is released during the rebind. Must not
    /// be called while a present is reading the buffer; trivially upheld
    /// on the single platform thread.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = vec![0u32; width as usize * height as usize];
        self.width = width;
        self.height = height;
    }

    //--- Accessors --------------------------------------------------------

    /// Logical width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    pub fn pitch(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Read-only view of the pixel memory, row-major, top-down.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable view of the pixel memory, row-major, top-down.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    //--- Presentation -----------------------------------------------------

    /// Stretch-blits the full logical buffer into `dest`.
    ///
    /// Nearest-neighbour scaling over the whole destination region:
    /// stretch, not crop. `dest` must hold at least
    /// `dest_width * dest_height` pixels in the same `0x00RRGGBB`
    /// top-down layout. Degenerate source or destination dimensions make
    /// this a no-op.
    ///
    /// This is the only path by which pixels reach the screen.
    pub fn blit_scaled(&self, dest: &mut [u32], dest_width: u32, dest_height: u32) {
        if self.width == 0 || self.height == 0 || dest_width == 0 || dest_height == 0 {
            return;
        }

        let src_w = self.width as usize;
        let src_h = self.height as usize;
        let dst_w = dest_width as usize;
        let dst_h = dest_height as usize;

        for dy in 0..dst_h {
            let sy = dy * src_h / dst_h;
            let src_row = &self.pixels[sy * src_w..sy * src_w + src_w];
            let dst_row = &mut dest[dy * dst_w..dy * dst_w + dst_w];

            for (dx, out) in dst_row.iter_mut().enumerate() {
                let sx = dx * src_w / dst_w;
                *out = src_row[sx];
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
