// pxforge/src/core/mod.rs
use std::fmt;
use std::path::PathBuf;

use image::GenericImageView;
use thiserror::Error;

mod pipeline;

pub use pipeline::ConversionPipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    WebP,
}

impl TargetFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "gif" => Ok(Self::Gif),
            "bmp" => Ok(Self::Bmp),
            "tiff" | "tif" => Ok(Self::Tiff),
            "webp" => Ok(Self::WebP),
            _ => Err(PxError::UnsupportedFormat(s.to_string())),
        }
    }

    pub fn canonical_extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::WebP => "webp",
        }
    }

    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::Jpeg | Self::WebP)
    }

    /// Targets without an alpha channel get flattened against white on encode.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, Self::Jpeg | Self::Bmp)
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_extension())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeFilter {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: TargetFormat,
    pub quality: u8,
    pub resize: Option<(u32, u32)>,
    pub exact_resize: bool,
    pub filter: ResizeFilter,
    pub strip_metadata: bool,
    pub batch: bool,
    pub recursive: bool,
    pub threads: usize,
}

/// Decoded raster plus whatever EXIF came with the container. Lives for
/// exactly one file's conversion.
pub struct ImageBuffer {
    pub pixels: image::DynamicImage,
    pub exif: Option<exif::Exif>,
}

impl fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("color", &self.pixels.color())
            .field("has_exif", &self.exif.is_some())
            .finish()
    }
}

impl ImageBuffer {
    pub fn new(pixels: image::DynamicImage) -> Self {
        Self { pixels, exif: None }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn color(&self) -> image::ColorType {
        self.pixels.color()
    }

    pub fn has_metadata(&self) -> bool {
        self.exif.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileReport {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

#[derive(Error, Debug)]
pub enum PxError {
    #[error("missing required argument: {0}")]
    MissingRequiredArgument(&'static str),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("quality must be between 1 and 100, got {0}")]
    InvalidQuality(u8),

    #[error("invalid resize spec {0:?}: expected WIDTHxHEIGHT, e.g. 800x600")]
    InvalidResizeSpec(String),

    #[error("{}: unsupported or corrupt input: {reason}", .path.display())]
    UnsupportedOrCorruptInput { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("processing error: {0}")]
    ProcessingError(String),

    #[error("batch finished with no successful conversions ({failed} failed)")]
    PartialBatchFailure { succeeded: usize, failed: usize },
}

pub type Result<T> = std::result::Result<T, PxError>;
