// pxforge/src/core/pipeline.rs
use super::{ConversionJob, FileReport, Result, TargetFormat};
use crate::processors::{Codec, MetadataProcessor, Resizer};
use std::fs;
use std::path::Path;

/// Runs one file through read -> decode -> resize -> strip -> encode -> write.
/// The encoded bytes are built fully in memory and written in a single call,
/// so a failed stage never leaves a partial output file behind.
pub struct ConversionPipeline {
    format: TargetFormat,
    resize: Option<(u32, u32)>,
    strip_metadata: bool,
    codec: Codec,
    resizer: Resizer,
    metadata: MetadataProcessor,
}

impl ConversionPipeline {
    pub fn new(job: &ConversionJob) -> Self {
        Self {
            format: job.format,
            resize: job.resize,
            strip_metadata: job.strip_metadata,
            codec: Codec::new(job.quality),
            resizer: Resizer::new(job.filter, !job.exact_resize),
            metadata: MetadataProcessor::new(),
        }
    }

    pub fn convert(&self, input: &Path, output: &Path) -> Result<FileReport> {
        let bytes = fs::read(input)?;

        let mut buffer = self.codec.decode(&bytes, input)?;
        buffer.exif = self.metadata.read_from_bytes(&bytes);

        log::debug!(
            "decoded {}: {}x{} {:?}, exif: {}",
            input.display(),
            buffer.width(),
            buffer.height(),
            buffer.color(),
            buffer.has_metadata()
        );

        if let Some((width, height)) = self.resize {
            buffer = self.resizer.resize(buffer, width, height)?;
        }

        if self.strip_metadata {
            self.metadata.strip(&mut buffer);
        }

        let encoded = self.codec.encode(&buffer, self.format)?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output, &encoded)?;

        Ok(FileReport {
            bytes_in: bytes.len() as u64,
            bytes_out: encoded.len() as u64,
        })
    }
}
