//! # Bit Planner
//!
//! Capacity arithmetic and the traversal order shared by the encoder and
//! decoder.
//!
//! ## Layout
//!
//! Every character occupies [`BITS_PER_CHAR`] consecutive LSB slots: eight data
//! bits (MSB first) followed by one continuation marker. Slots are visited
//! row-major, and within a pixel the channels are visited in order 0, 1, 2:
//!
//! ```text
//! (0,0,c0) (0,0,c1) (0,0,c2) (0,1,c0) ... (0,w-1,c2) (1,0,c0) ...
//! ```
//!
//! The traversal is the only thing that keeps encode and decode in agreement,
//! so both go through [`TraversalCursor`].

use crate::grid::{Site, CHANNELS};

/// Data bits per payload character.
pub const DATA_BITS: usize = 8;

/// Data bits plus the continuation marker.
pub const BITS_PER_CHAR: usize = DATA_BITS + 1;

/// Number of LSB slots a `width × height` grid offers.
pub fn capacity_bits(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

/// Number of slots needed to store `payload_len` characters.
pub fn required_bits(payload_len: usize) -> usize {
    payload_len.saturating_mul(BITS_PER_CHAR)
}

/// Whether `payload_len` characters fit into a `width × height` grid.
pub fn fits(width: u32, height: u32, payload_len: usize) -> bool {
    required_bits(payload_len) <= capacity_bits(width, height)
}

/// Largest payload, in characters, a `width × height` grid can carry.
pub fn max_chars(width: u32, height: u32) -> usize {
    capacity_bits(width, height) / BITS_PER_CHAR
}

/// Transient traversal state for a single encode or decode call.
///
/// Yields sites in row-major, channel-minor order and stops once the grid is
/// exhausted. `bit_index` tracks where in the current 9-bit character frame
/// the next site falls.
#[derive(Debug, Clone)]
pub struct TraversalCursor {
    width: u32,
    height: u32,
    row: u32,
    column: u32,
    channel: usize,
    bit_index: usize,
}

impl TraversalCursor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            row: 0,
            column: 0,
            channel: 0,
            bit_index: 0,
        }
    }

    /// Position of the next site within its character frame (`0..=8`,
    /// where 8 is the continuation marker).
    pub fn bit_index(&self) -> usize {
        self.bit_index
    }

    pub fn is_exhausted(&self) -> bool {
        self.width == 0 || self.row >= self.height
    }

    /// Return the next site and advance, or `None` once every channel byte
    /// of the grid has been visited.
    pub fn next_site(&mut self) -> Option<Site> {
        if self.is_exhausted() {
            return None;
        }

        let site = Site {
            row: self.row,
            column: self.column,
            channel: self.channel,
        };

        self.channel += 1;
        if self.channel == CHANNELS {
            self.channel = 0;
            self.column += 1;
            if self.column == self.width {
                self.column = 0;
                self.row += 1;
            }
        }
        self.bit_index = (self.bit_index + 1) % BITS_PER_CHAR;

        Some(site)
    }
}

impl Iterator for TraversalCursor {
    type Item = Site;

    fn next(&mut self) -> Option<Site> {
        self.next_site()
    }
}
