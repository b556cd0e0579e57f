//! # lsb-stego
//!
//! Least-significant-bit image steganography for short text payloads.
//!
//! Each character is stored as 8 data bits plus a continuation marker in the
//! LSBs of consecutive colour channel bytes, so no length header is needed.
//! This hides that a message exists; it does not encrypt it.
//!
//! ## Modules
//!
//! - [`grid`]: Fixed-size 3-channel pixel grid
//! - [`planner`]: Capacity arithmetic and traversal order
//! - [`payload`]: One-byte-per-character text payloads
//! - [`codec`]: `encode` / `decode`
//! - [`io`]: Image file and in-memory adapters (`image` crate)
//! - [`config`]: TOML settings for the `stego` binary

pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod io;
pub mod payload;
pub mod planner;

pub use codec::{decode, decode_report, encode, encode_in_place, encode_text, Decoded};
pub use error::{Result, StegoError};
pub use grid::{PixelGrid, Site};
pub use payload::Payload;
