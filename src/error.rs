//! # Error Types
//!
//! Every failure the codec and its image adapter can report. The codec itself
//! only ever fails on capacity; the remaining variants belong to the payload
//! boundary and to file I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StegoError {
    /// The payload needs more LSB slots than the carrier offers.
    /// Raised before any channel byte is touched.
    #[error("payload needs {required} bits but the image only has {available} bits available")]
    CapacityExceeded { required: usize, available: usize },

    /// A payload character has no single-byte representation.
    #[error("character {ch:?} at position {index} does not fit in 8 bits")]
    UnrepresentableChar { ch: char, index: usize },

    /// Pixel buffer length does not match `width * height`.
    #[error("pixel buffer holds {actual} pixels, expected {expected} for the given dimensions")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Flat channel buffer length does not match `width * height * 3`.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for the given dimensions")]
    BufferLengthMismatch { expected: usize, actual: usize },

    /// Carrier would be written in a format that discards low bits.
    #[error("refusing to write carrier as {0}: lossy formats destroy embedded bits")]
    LossyFormat(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
