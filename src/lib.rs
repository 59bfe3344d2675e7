mod cli;
mod core;
mod processors;
mod utils;

pub use cli::{Cli, FilterArg};
pub use crate::core::{
    ConversionJob, ConversionPipeline, FileReport, ImageBuffer, PxError, ResizeFilter, Result,
    TargetFormat,
};
pub use processors::{BatchDriver, BatchResult, Codec, FileOutcome, MetadataProcessor, Resizer};
pub use utils::{
    derive_output_path, format_file_size, is_image_file, parse_dimensions, IMAGE_EXTENSIONS,
};

pub mod prelude {
    pub use crate::{
        BatchDriver, Codec, ConversionJob, ConversionPipeline, MetadataProcessor, Resizer,
        TargetFormat,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
