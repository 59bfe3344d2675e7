// pxforge/src/processors/mod.rs
mod batch;
mod codec;
mod metadata;
mod resizer;

pub use batch::{BatchDriver, BatchResult, FileOutcome};
pub use codec::Codec;
pub use metadata::MetadataProcessor;
pub use resizer::Resizer;

pub mod prelude {
    pub use super::{BatchDriver, Codec, MetadataProcessor, Resizer};
}
