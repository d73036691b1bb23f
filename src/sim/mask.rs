//! Opacity masks for pixel-accurate collision
//!
//! A mask is one bit per pixel: set where the image is solid. Two sprites
//! collide when any set bit of one lands on a set bit of the other.

/// Alpha above this counts as solid
pub const ALPHA_THRESHOLD: u8 = 127;

/// Row-major bitmap packed into 64-bit words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    /// Words per row
    stride: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Fully transparent mask
    pub fn empty(width: u32, height: u32) -> Self {
        let stride = (width as usize).div_ceil(64);
        Self {
            width,
            height,
            stride,
            bits: vec![0; stride * height as usize],
        }
    }

    /// Fully solid mask (bounding-box collision)
    pub fn full(width: u32, height: u32) -> Self {
        let mut mask = Self::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, true);
            }
        }
        mask
    }

    /// Build from an alpha channel (`width * height` bytes, row-major)
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Self {
        let mut mask = Self::empty(width, height);
        for (i, &a) in alpha.iter().take((width * height) as usize).enumerate() {
            if a > ALPHA_THRESHOLD {
                let i = i as u32;
                mask.set(i % width, i / width, true);
            }
        }
        mask
    }

    /// Build from rows of text, `#` solid and anything else clear
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut mask = Self::empty(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.bytes().enumerate() {
                if c == b'#' {
                    mask.set(x as u32, y as u32, true);
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let word = self.bits[y as usize * self.stride + (x / 64) as usize];
        word & (1 << (x % 64)) != 0
    }

    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let word = &mut self.bits[y as usize * self.stride + (x / 64) as usize];
        if solid {
            *word |= 1 << (x % 64);
        } else {
            *word &= !(1 << (x % 64));
        }
    }

    /// Number of solid pixels
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// Does `other`, placed at `offset` relative to this mask's origin,
    /// share any solid pixel with this one?
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (self.width as i32).min(dx + other.width as i32);
        let y1 = (self.height as i32).min(dy + other.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x as u32, y as u32) && other.get((x - dx) as u32, (y - dy) as u32) {
                    return true;
                }
            }
        }
        false
    }
}
