//! # Image I/O
//!
//! Bridges between image files (or in-memory encoded images) and
//! [`PixelGrid`]. The codec never touches files itself; everything here is a
//! thin layer over the `image` crate.
//!
//! Images of any colour type are converted to 8-bit RGB on load, so channels
//! 0, 1, 2 of the grid are red, green and blue. Alpha is dropped.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use log::debug;

use crate::codec;
use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;

impl PixelGrid {
    pub fn from_rgb_image(img: &RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|px| px.0).collect();
        PixelGrid::from_pixels(width, height, pixels)
    }

    pub fn from_dynamic_image(img: &DynamicImage) -> Result<Self> {
        Self::from_rgb_image(&img.to_rgb8())
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height(), |x, y| Rgb(self.pixel(y, x)))
    }
}

/// Decode an image file into a grid.
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<PixelGrid> {
    let path = path.as_ref();
    let img = image::open(path)?;
    debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    PixelGrid::from_dynamic_image(&img)
}

/// Write a grid to `path`, picking the format from the file extension.
///
/// # Errors
/// - [`StegoError::LossyFormat`] for JPEG output, which would not preserve
///   the low bits
/// - [`StegoError::Image`] for unknown extensions or encoder failures
pub fn save_grid<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    if is_lossy(format) {
        return Err(StegoError::LossyFormat(format!("{:?}", format)));
    }
    grid.to_rgb_image().save_with_format(path, format)?;
    debug!("Wrote {} as {:?}", path.display(), format);
    Ok(())
}

/// Encode a grid as PNG bytes.
pub fn grid_to_png(grid: &PixelGrid) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    grid.to_rgb_image()
        .write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;
    Ok(output_bytes)
}

/// Embed `text` into an in-memory image and return the carrier as PNG.
///
/// # Arguments
/// - `image_bytes`: Raw bytes of the cover image (any format supported by `image`)
/// - `text`: Text to hide, one byte per character
///
/// # Errors
/// - Cover image cannot be decoded
/// - Text contains characters above U+00FF
/// - Cover image is too small for the text
///
/// # Example
/// ```ignore
/// let cover = std::fs::read("input.png")?;
/// let carrier = embed_text_bytes(&cover, "Secret message")?;
/// std::fs::write("output.png", carrier)?;
/// ```
pub fn embed_text_bytes(image_bytes: &[u8], text: &str) -> Result<Vec<u8>> {
    let img = image::load_from_memory(image_bytes)?;
    let grid = PixelGrid::from_dynamic_image(&img)?;
    let carrier = codec::encode_text(grid, text)?;
    grid_to_png(&carrier)
}

/// Recover text from an in-memory carrier image.
pub fn extract_text_bytes(image_bytes: &[u8]) -> Result<String> {
    let img = image::load_from_memory(image_bytes)?;
    let grid = PixelGrid::from_dynamic_image(&img)?;
    Ok(codec::decode(&grid).to_text())
}

fn is_lossy(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Jpeg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_conversion_keeps_channel_order() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([1, 2, 3]));
        img.put_pixel(1, 0, Rgb([4, 5, 6]));

        let grid = PixelGrid::from_rgb_image(&img).unwrap();
        assert_eq!(grid.to_raw(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(grid.to_rgb_image(), img);
    }

    #[test]
    fn rgba_input_drops_alpha() {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([10, 20, 30, 40]),
        ));
        let grid = PixelGrid::from_dynamic_image(&img).unwrap();
        assert!(grid.pixels().iter().all(|px| *px == [10, 20, 30]));
    }

    #[test]
    fn png_bytes_roundtrip_text() {
        let cover = grid_to_png(&PixelGrid::filled(8, 8, 77)).unwrap();
        let carrier = embed_text_bytes(&cover, "hidden").unwrap();
        assert_eq!(extract_text_bytes(&carrier).unwrap(), "hidden");
    }

    #[test]
    fn jpeg_output_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carrier.jpg");
        let err = save_grid(&PixelGrid::filled(4, 4, 0), &path).unwrap_err();
        assert!(matches!(err, StegoError::LossyFormat(_)));
        assert!(!path.exists());
    }
}
