// pxforge/src/processors/metadata.rs
use crate::core::ImageBuffer;
use exif::{Exif, Reader};
use std::io::Cursor;

pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// A container without EXIF is normal; a container whose EXIF fails to
    /// parse is treated the same way, with a warning, so one mangled APP1
    /// segment cannot fail an otherwise decodable file.
    pub fn read_from_bytes(&self, bytes: &[u8]) -> Option<Exif> {
        let mut cursor = Cursor::new(bytes);
        match Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => {
                log::debug!("found EXIF block with {} fields", exif.fields().count());
                Some(exif)
            }
            Err(exif::Error::NotFound(_)) => None,
            Err(e) => {
                log::warn!("failed to parse EXIF: {e}");
                None
            }
        }
    }

    /// Drops the metadata blob; pixel data and dimensions are untouched.
    pub fn strip(&self, buffer: &mut ImageBuffer) {
        if let Some(exif) = buffer.exif.take() {
            log::debug!("stripped EXIF block with {} fields", exif.fields().count());
        }
    }
}

impl Default for MetadataProcessor {
    fn default() -> Self {
        Self::new()
    }
}
