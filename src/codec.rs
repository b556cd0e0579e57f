//! # LSB Codec
//!
//! Embeds a [`Payload`] into the least significant bits of a [`PixelGrid`] and
//! reads it back.
//!
//! ## Encoding
//! 1. Check capacity up front: `9 * len <= width * height * 3`, otherwise fail
//!    without touching the grid
//! 2. For each character emit its 8 bits MSB first, then a continuation bit
//!    (`1` if another character follows, `0` after the last one)
//! 3. Write each bit into the next site of the traversal by nudging the
//!    channel byte by at most one
//!
//! ## Decoding
//! Walk the same traversal, rebuild one byte from every 8 LSBs, then read the
//! marker. A `0` marker ends the payload. Running out of sites also ends it, so
//! decoding any grid reads at most `capacity_bits / 9` characters.
//!
//! There is no magic number or checksum: decoding an image that was never
//! encoded yields bounded garbage rather than an error.

use log::{debug, info, warn};

use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;
use crate::payload::Payload;
use crate::planner::{self, TraversalCursor, DATA_BITS};

/// Result of a decode, with whether the stream ended on a `0` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub payload: Payload,
    /// `false` when the grid ran out of sites before an end marker was read.
    /// Usually means the carrier was never encoded.
    pub terminated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    ReadingDataBit(usize),
    ReadingMarkerBit,
}

/// Embed `payload` into `grid` and hand the grid back.
///
/// # Errors
/// - [`StegoError::CapacityExceeded`] if the payload does not fit
///
/// # Example
/// ```
/// use lsb_stego::{decode, encode, Payload, PixelGrid};
///
/// let grid = PixelGrid::filled(10, 10, 128);
/// let payload = Payload::from_text("Hi").unwrap();
/// let carrier = encode(grid, &payload).unwrap();
/// assert_eq!(decode(&carrier), payload);
/// ```
pub fn encode(mut grid: PixelGrid, payload: &Payload) -> Result<PixelGrid> {
    encode_in_place(&mut grid, payload)?;
    Ok(grid)
}

/// Embed `payload` into a borrowed grid.
///
/// # Errors
/// - [`StegoError::CapacityExceeded`] if the payload does not fit; the grid
///   is left exactly as it was
pub fn encode_in_place(grid: &mut PixelGrid, payload: &Payload) -> Result<()> {
    let (width, height) = grid.dimensions();
    let required = planner::required_bits(payload.len());
    let available = planner::capacity_bits(width, height);

    if !planner::fits(width, height, payload.len()) {
        return Err(StegoError::CapacityExceeded {
            required,
            available,
        });
    }

    debug!(
        "Embedding {} chars ({} of {} bits) into {}x{} grid",
        payload.len(),
        required,
        available,
        width,
        height
    );

    let mut changed = 0usize;
    let cursor = TraversalCursor::new(width, height);
    for (site, bit) in cursor.zip(frame_bits(payload.as_bytes())) {
        let current = grid.get(site);
        let updated = set_lsb(current, bit);
        if updated != current {
            grid.set(site, updated);
            changed += 1;
        }
    }

    info!(
        "Encoded {} chars, {} of {} touched channel bytes changed",
        payload.len(),
        changed,
        required
    );
    Ok(())
}

/// Convenience wrapper: validate `text` at the payload boundary, then encode.
pub fn encode_text(grid: PixelGrid, text: &str) -> Result<PixelGrid> {
    let payload = Payload::from_text(text)?;
    encode(grid, &payload)
}

/// Recover the payload carried by `grid`.
pub fn decode(grid: &PixelGrid) -> Payload {
    decode_report(grid).payload
}

/// Like [`decode`], but also reports whether an end marker was found.
pub fn decode_report(grid: &PixelGrid) -> Decoded {
    let (width, height) = grid.dimensions();
    let mut cursor = TraversalCursor::new(width, height);
    let mut payload = Payload::default();
    let mut state = DecodeState::ReadingDataBit(0);
    let mut byte = 0u8;

    while let Some(site) = cursor.next_site() {
        let bit = grid.get(site) & 1;
        state = match state {
            DecodeState::ReadingDataBit(n) => {
                byte = (byte << 1) | bit;
                if n + 1 == DATA_BITS {
                    payload.push(byte);
                    byte = 0;
                    DecodeState::ReadingMarkerBit
                } else {
                    DecodeState::ReadingDataBit(n + 1)
                }
            }
            DecodeState::ReadingMarkerBit if bit == 0 => {
                info!("Decoded {} chars", payload.len());
                return Decoded {
                    payload,
                    terminated: true,
                };
            }
            DecodeState::ReadingMarkerBit => DecodeState::ReadingDataBit(0),
        };
    }

    warn!(
        "Carrier exhausted after {} chars without an end marker",
        payload.len()
    );
    Decoded {
        payload,
        terminated: false,
    }
}

/// Force the LSB of `byte` to `bit` by moving it at most one step, so the
/// adjustment never wraps past 0 or 255.
fn set_lsb(byte: u8, bit: u8) -> u8 {
    match (byte & 1, bit) {
        (0, 1) => byte + 1,
        (1, 0) => byte - 1,
        _ => byte,
    }
}

/// The 9-bit frames for every character, flattened in write order.
fn frame_bits(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    let last = bytes.len().saturating_sub(1);
    bytes.iter().enumerate().flat_map(move |(i, &b)| {
        let marker = u8::from(i < last);
        (0..DATA_BITS)
            .map(move |k| (b >> (DATA_BITS - 1 - k)) & 1)
            .chain(std::iter::once(marker))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::BITS_PER_CHAR;

    fn gradient(width: u32, height: u32) -> PixelGrid {
        let raw: Vec<u8> = (0..width * height * 3).map(|i| (i * 37 % 256) as u8).collect();
        PixelGrid::from_raw(width, height, &raw).unwrap()
    }

    #[test]
    fn set_lsb_moves_by_at_most_one() {
        assert_eq!(set_lsb(0, 1), 1);
        assert_eq!(set_lsb(255, 0), 254);
        assert_eq!(set_lsb(254, 1), 255);
        assert_eq!(set_lsb(1, 0), 0);
        assert_eq!(set_lsb(100, 0), 100);
        assert_eq!(set_lsb(101, 1), 101);
    }

    #[test]
    fn frame_bits_append_continuation_markers() {
        let bits: Vec<u8> = frame_bits(b"Hi").collect();
        assert_eq!(bits.len(), 2 * BITS_PER_CHAR);
        // 'H' = 0x48 = 01001000, more follows
        assert_eq!(&bits[..9], &[0, 1, 0, 0, 1, 0, 0, 0, 1]);
        // 'i' = 0x69 = 01101001, last char
        assert_eq!(&bits[9..], &[0, 1, 1, 0, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn frame_bits_of_empty_payload_is_empty() {
        assert_eq!(frame_bits(b"").count(), 0);
    }

    #[test]
    fn hi_roundtrips_in_ten_by_ten() {
        let carrier = encode_text(gradient(10, 10), "Hi").unwrap();
        let decoded = decode_report(&carrier);
        assert_eq!(decoded.payload.to_text(), "Hi");
        assert!(decoded.terminated);
    }

    #[test]
    fn hi_does_not_fit_in_two_by_two() {
        let original = gradient(2, 2);
        let mut grid = original.clone();
        let payload = Payload::from_text("Hi").unwrap();

        let err = encode_in_place(&mut grid, &payload).unwrap_err();
        assert!(matches!(
            err,
            StegoError::CapacityExceeded {
                required: 18,
                available: 12
            }
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn empty_payload_leaves_grid_unchanged() {
        let original = gradient(4, 4);
        let carrier = encode(original.clone(), &Payload::default()).unwrap();
        assert_eq!(carrier, original);
    }

    #[test]
    fn only_visited_sites_change_and_keep_high_bits() {
        let original = gradient(5, 5);
        let carrier = encode_text(original.clone(), "ok").unwrap();

        let touched = 2 * BITS_PER_CHAR;
        let before = original.to_raw();
        let after = carrier.to_raw();
        assert_eq!(&before[touched..], &after[touched..]);
        for (a, b) in before[..touched].iter().zip(&after[..touched]) {
            assert!(a.abs_diff(*b) <= 1);
            assert_eq!(a >> 1, b >> 1);
        }
    }

    #[test]
    fn extreme_channel_values_do_not_wrap() {
        let zeros = encode_text(PixelGrid::filled(3, 3, 0), "\u{ff}").unwrap();
        assert!(zeros.to_raw().iter().all(|&b| b <= 1));
        let ones = encode_text(PixelGrid::filled(3, 3, 255), "\0").unwrap();
        assert!(ones.to_raw().iter().all(|&b| b >= 254));
        assert_eq!(decode(&zeros).to_text(), "\u{ff}");
        assert_eq!(decode(&ones).to_text(), "\0");
    }

    #[test]
    fn unterminated_stream_stops_at_grid_end() {
        // All LSBs set: every byte reads 0xFF and every marker says "more".
        let grid = PixelGrid::filled(3, 4, 255);
        let decoded = decode_report(&grid);
        assert!(!decoded.terminated);
        assert_eq!(decoded.payload.len(), planner::max_chars(3, 4));
        assert!(decoded.payload.as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn zero_sized_grid_decodes_to_nothing() {
        let decoded = decode_report(&PixelGrid::filled(0, 0, 0));
        assert!(decoded.payload.is_empty());
        assert!(!decoded.terminated);
    }
}
