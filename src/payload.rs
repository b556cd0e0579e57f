//! # Payload
//!
//! Text that travels through the codec, one byte per character. Conversion
//! from `&str` happens here so that characters outside `0..=255` are rejected
//! before any carrier is touched.

use std::fmt;

use crate::error::{Result, StegoError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    bytes: Vec<u8>,
}

impl Payload {
    /// Map each character to the byte with the same code point.
    ///
    /// # Errors
    /// - [`StegoError::UnrepresentableChar`] for the first character above
    ///   U+00FF
    ///
    /// # Example
    /// ```
    /// use lsb_stego::Payload;
    ///
    /// let payload = Payload::from_text("café").unwrap();
    /// assert_eq!(payload.as_bytes(), &[b'c', b'a', b'f', 0xE9]);
    /// assert!(Payload::from_text("€").is_err());
    /// ```
    pub fn from_text(text: &str) -> Result<Self> {
        let bytes = text
            .chars()
            .enumerate()
            .map(|(index, ch)| {
                u8::try_from(u32::from(ch)).map_err(|_| StegoError::UnrepresentableChar { ch, index })
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(Self { bytes })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Inverse of [`Payload::from_text`]; total over all byte values.
    pub fn to_text(&self) -> String {
        self.bytes.iter().map(|&b| char::from(b)).collect()
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

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
