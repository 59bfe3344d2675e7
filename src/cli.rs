// pxforge/src/cli.rs
use crate::core::{ConversionJob, PxError, ResizeFilter, Result, TargetFormat};
use crate::utils::parse_dimensions;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pxforge")]
#[command(version)]
#[command(about = "Forge your images into any format: convert, resize, and batch-process")]
pub struct Cli {
    /// Input file, or input directory with --batch
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file, or output directory with --batch
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target format: png, jpg, jpeg, gif, bmp, tiff, webp
    #[arg(short, long)]
    pub format: Option<String>,

    /// Quality for lossy formats, 1-100 (100 = lossless WebP)
    #[arg(short, long, default_value_t = 80)]
    pub quality: u8,

    /// Resize to WIDTHxHEIGHT, e.g. 800x600
    #[arg(short, long)]
    pub resize: Option<String>,

    /// Drop EXIF metadata instead of carrying it along
    #[arg(long)]
    pub strip_metadata: bool,

    /// Convert every image inside the input directory
    #[arg(short, long)]
    pub batch: bool,

    /// Recurse into subdirectories (batch mode), mirroring the directory
    /// structure under the output directory
    #[arg(long)]
    pub recursive: bool,

    /// Worker threads for batch mode (0 = one per core)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Resampling filter used for --resize
    #[arg(long, value_enum, default_value = "lanczos3")]
    pub filter: FilterArg,

    /// Resize to exactly WIDTHxHEIGHT instead of fitting within it
    #[arg(long)]
    pub exact: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FilterArg {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<FilterArg> for ResizeFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Nearest => ResizeFilter::Nearest,
            FilterArg::Bilinear => ResizeFilter::Bilinear,
            FilterArg::Bicubic => ResizeFilter::Bicubic,
            FilterArg::Lanczos3 => ResizeFilter::Lanczos3,
        }
    }
}

impl Cli {
    /// Resolves the raw arguments into a validated job. All argument errors
    /// surface here, before any file is touched.
    pub fn into_job(self) -> Result<ConversionJob> {
        let input = self.input.ok_or(PxError::MissingRequiredArgument("-i/--input"))?;
        let output = self.output.ok_or(PxError::MissingRequiredArgument("-o/--output"))?;
        let format = self.format.ok_or(PxError::MissingRequiredArgument("-f/--format"))?;
        let format = TargetFormat::parse(&format)?;

        if self.quality == 0 || self.quality > 100 {
            return Err(PxError::InvalidQuality(self.quality));
        }
        if !format.is_lossy() {
            log::debug!("quality {} has no effect on lossless target {format}", self.quality);
        }

        let resize = self.resize.as_deref().map(parse_dimensions).transpose()?;

        if self.batch {
            if !input.is_dir() {
                return Err(PxError::InvalidParameter(format!(
                    "input is not a directory: {}",
                    input.display()
                )));
            }
            if output.exists() && !output.is_dir() {
                return Err(PxError::InvalidParameter(format!(
                    "output path exists but is not a directory: {}",
                    output.display()
                )));
            }
        } else if !input.is_file() {
            return Err(PxError::InvalidParameter(format!(
                "input file does not exist: {}",
                input.display()
            )));
        }

        Ok(ConversionJob {
            input,
            output,
            format,
            quality: self.quality,
            resize,
            exact_resize: self.exact,
            filter: self.filter.into(),
            strip_metadata: self.strip_metadata,
            batch: self.batch,
            recursive: self.recursive,
            threads: self.threads,
        })
    }
}
