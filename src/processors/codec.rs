// pxforge/src/processors/codec.rs
use crate::core::{ImageBuffer, PxError, Result, TargetFormat};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageFormat, RgbImage, Rgba};
use std::io::Cursor;
use std::path::Path;

pub struct Codec {
    quality: u8,
    optimize_png: bool,
}

impl Codec {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            optimize_png: true,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    pub fn decode(&self, bytes: &[u8], origin: &Path) -> Result<ImageBuffer> {
        let pixels =
            image::load_from_memory(bytes).map_err(|e| PxError::UnsupportedOrCorruptInput {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(ImageBuffer::new(pixels))
    }

    pub fn encode(&self, buffer: &ImageBuffer, format: TargetFormat) -> Result<Vec<u8>> {
        log::debug!(
            "encoding {}x{} as {} (quality {})",
            buffer.width(),
            buffer.height(),
            format,
            self.quality
        );

        match format {
            TargetFormat::Jpeg => self.encode_jpeg(&buffer.pixels),
            TargetFormat::WebP => self.encode_webp(&buffer.pixels),
            TargetFormat::Png => self.encode_png(&buffer.pixels),
            TargetFormat::Gif => {
                let rgba = DynamicImage::ImageRgba8(buffer.pixels.to_rgba8());
                self.write_plain(&rgba, ImageFormat::Gif)
            }
            TargetFormat::Bmp => {
                let rgb = DynamicImage::ImageRgb8(flatten_to_rgb(&buffer.pixels));
                self.write_plain(&rgb, ImageFormat::Bmp)
            }
            TargetFormat::Tiff => self.write_plain(&buffer.pixels, ImageFormat::Tiff),
        }
    }

    fn encode_jpeg(&self, pixels: &DynamicImage) -> Result<Vec<u8>> {
        let rgb = flatten_to_rgb(pixels);
        let mut out = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut out, self.quality);
        encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            .map_err(|e| PxError::ProcessingError(format!("JPEG encode failed: {e}")))?;
        Ok(out)
    }

    // quality 100 switches to lossless; the image crate's own WebP encoder
    // is lossless-only, so the lossy path goes through libwebp.
    fn encode_webp(&self, pixels: &DynamicImage) -> Result<Vec<u8>> {
        let rgba = pixels.to_rgba8();
        let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
        let memory = if self.quality >= 100 {
            encoder.encode_lossless()
        } else {
            encoder.encode(f32::from(self.quality))
        };
        Ok(memory.to_vec())
    }

    fn encode_png(&self, pixels: &DynamicImage) -> Result<Vec<u8>> {
        let data = self.write_plain(pixels, ImageFormat::Png)?;
        if !self.optimize_png {
            return Ok(data);
        }
        oxipng::optimize_from_memory(&data, &oxipng::Options::default())
            .map_err(|e| PxError::ProcessingError(format!("PNG optimization failed: {e}")))
    }

    fn write_plain(&self, pixels: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        pixels
            .write_to(&mut cursor, format)
            .map_err(|e| PxError::ProcessingError(format!("{format:?} encode failed: {e}")))?;
        Ok(cursor.into_inner())
    }
}

/// Flattening policy for targets without alpha: composite against white.
pub fn flatten_to_rgb(pixels: &DynamicImage) -> RgbImage {
    if !pixels.color().has_alpha() {
        return pixels.to_rgb8();
    }

    let rgba = pixels.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (dst, src) in rgb.pixels_mut().zip(rgba.pixels()) {
        let Rgba([r, g, b, a]) = *src;
        let alpha = f32::from(a) / 255.0;
        let blend = |c: u8| (f32::from(c) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        dst.0 = [blend(r), blend(g), blend(b)];
    }
    rgb
}
