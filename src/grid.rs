//! # Pixel Grid
//!
//! A fixed-size, row-major grid of 3-channel byte pixels. This is the only
//! carrier representation the codec understands; conversions to and from
//! `image` buffers live in [`crate::io`].

use crate::error::{Result, StegoError};

/// Number of colour channels per pixel.
pub const CHANNELS: usize = 3;

/// Position of one channel byte inside a [`PixelGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site {
    pub row: u32,
    pub column: u32,
    pub channel: usize,
}

/// Row-major `width × height` grid of `[u8; 3]` pixels.
///
/// Dimensions are fixed at construction. Channel bytes can be read and
/// written individually, but the grid can never be resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<[u8; CHANNELS]>,
}

impl PixelGrid {
    /// Create a grid where every channel byte holds `fill`.
    pub fn filled(width: u32, height: u32, fill: u8) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![[fill; CHANNELS]; len],
        }
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// # Errors
    /// - [`StegoError::DimensionMismatch`] if `pixels.len() != width * height`
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[u8; CHANNELS]>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(StegoError::DimensionMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap a flat `[c0, c1, c2, c0, c1, c2, ...]` buffer.
    ///
    /// # Errors
    /// - [`StegoError::BufferLengthMismatch`] if the buffer is not exactly
    ///   `width * height * 3` bytes long
    pub fn from_raw(width: u32, height: u32, raw: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if raw.len() != expected {
            return Err(StegoError::BufferLengthMismatch {
                expected,
                actual: raw.len(),
            });
        }
        let pixels = raw
            .chunks_exact(CHANNELS)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channel triple at `(row, column)`. Panics if the position lies outside
    /// the grid.
    pub fn pixel(&self, row: u32, column: u32) -> [u8; CHANNELS] {
        self.pixels[self.index(row, column)]
    }

    /// Channel byte at `site`. Panics if the site lies outside the grid.
    pub fn get(&self, site: Site) -> u8 {
        self.pixels[self.index(site.row, site.column)][site.channel]
    }

    /// Overwrite the channel byte at `site`. Panics if the site lies outside
    /// the grid.
    pub fn set(&mut self, site: Site, value: u8) {
        let idx = self.index(site.row, site.column);
        self.pixels[idx][site.channel] = value;
    }

    pub fn pixels(&self) -> &[[u8; CHANNELS]] {
        &self.pixels
    }

    /// Flatten back into `[c0, c1, c2, ...]` order.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    fn index(&self, row: u32, column: u32) -> usize {
        assert!(
            row < self.height && column < self.width,
            "({}, {}) outside {}x{} grid",
            row,
            column,
            self.width,
            self.height
        );
        row as usize * self.width as usize + column as usize
    }
}
