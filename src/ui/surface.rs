/// Raster drawing surface.
///
/// The renderer only needs two operations: clear everything, and fill an
/// axis-aligned rectangle with a solid color. `PixelBuffer` is the
/// in-memory implementation the terminal presenter reads from.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// From a `0xRRGGBB` literal.
    pub const fn hex(v: u32) -> Rgb {
        Rgb {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }
}

pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> (usize, usize);

    /// Reset every pixel to the background.
    fn clear(&mut self);

    /// Fill `w × h` pixels starting at `(x, y)`. Parts outside the surface
    /// are clipped.
    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb);
}

// ── PixelBuffer: a 2D grid of colors ──

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    background: Rgb,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        PixelBuffer {
            width,
            height,
            background,
            pixels: vec![background; width * height],
        }
    }

    /// Resize, clearing to background. No-op if unchanged.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![self.background; width * height];
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            self.background
        }
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for py in y.min(y_end)..y_end {
            let row = py * self.width;
            self.pixels[row + x.min(x_end)..row + x_end].fill(color);
        }
    }
}
