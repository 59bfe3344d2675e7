// pxforge/src/processors/resizer.rs
use crate::core::{ImageBuffer, PxError, ResizeFilter, Result};
use image::imageops::FilterType;

pub struct Resizer {
    filter: ResizeFilter,
    keep_aspect: bool,
}

impl Resizer {
    pub fn new(filter: ResizeFilter, keep_aspect: bool) -> Self {
        Self { filter, keep_aspect }
    }

    pub fn resize(&self, buffer: ImageBuffer, width: u32, height: u32) -> Result<ImageBuffer> {
        if width == 0 || height == 0 {
            return Err(PxError::InvalidResizeSpec(format!("{width}x{height}")));
        }

        if width == buffer.width() && height == buffer.height() {
            log::debug!("dimensions already {width}x{height}, skipping resize");
            return Ok(buffer);
        }

        log::debug!(
            "resizing {}x{} -> {}x{} ({:?}, keep_aspect: {})",
            buffer.width(),
            buffer.height(),
            width,
            height,
            self.filter,
            self.keep_aspect
        );

        let filter = self.filter_type();
        let ImageBuffer { pixels, exif } = buffer;
        let pixels = if self.keep_aspect {
            pixels.resize(width, height, filter)
        } else {
            pixels.resize_exact(width, height, filter)
        };

        Ok(ImageBuffer { pixels, exif })
    }

    fn filter_type(&self) -> FilterType {
        match self.filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::Bicubic => FilterType::CatmullRom,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn buffer(width: u32, height: u32) -> ImageBuffer {
        ImageBuffer::new(DynamicImage::ImageRgb8(RgbImage::new(width, height)))
    }

    #[test]
    fn fit_within_preserves_aspect_ratio() {
        let resizer = Resizer::new(ResizeFilter::Lanczos3, true);
        let resized = resizer.resize(buffer(100, 80), 50, 50).unwrap();
        assert_eq!((resized.width(), resized.height()), (50, 40));
    }

    #[test]
    fn exact_mode_hits_requested_dimensions() {
        let resizer = Resizer::new(ResizeFilter::Bilinear, false);
        let resized = resizer.resize(buffer(100, 80), 50, 50).unwrap();
        assert_eq!((resized.width(), resized.height()), (50, 50));
    }

    #[test]
    fn same_dimensions_keep_pixel_count() {
        let resizer = Resizer::new(ResizeFilter::Lanczos3, true);
        let resized = resizer.resize(buffer(64, 32), 64, 32).unwrap();
        assert_eq!((resized.width(), resized.height()), (64, 32));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let resizer = Resizer::new(ResizeFilter::Lanczos3, true);
        assert!(matches!(
            resizer.resize(buffer(10, 10), 0, 50),
            Err(PxError::InvalidResizeSpec(_))
        ));
    }
}
