// pxforge/src/utils/mod.rs
use crate::core::{PxError, Result, TargetFormat};
use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: [&str; 8] = [
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp",
];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn parse_dimensions(spec: &str) -> Result<(u32, u32)> {
    let invalid = || PxError::InvalidResizeSpec(spec.to_string());

    let (w, h) = spec.split_once('x').ok_or_else(invalid)?;
    let width: u32 = w.parse().map_err(|_| invalid())?;
    let height: u32 = h.parse().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(invalid());
    }

    Ok((width, height))
}

/// Output path for one batch entry: the input's path relative to the input
/// directory, re-rooted under the output directory, with the extension
/// replaced by the target format's canonical one.
pub fn derive_output_path(
    input_file: &Path,
    input_dir: &Path,
    output_dir: &Path,
    format: TargetFormat,
) -> PathBuf {
    let relative = input_file.strip_prefix(input_dir).unwrap_or(input_file);
    let mut output = output_dir.join(relative);
    output.set_extension(format.canonical_extension());
    output
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = (bytes_f64.log10() / base.log10()).floor() as i32;
    let size = bytes_f64 / base.powi(exponent);

    format!("{:.2} {}", size, UNITS[exponent as usize])
}
