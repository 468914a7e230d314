//! OpenAPI spec indexer
//!
//! Scans a directory of OpenAPI YAML files and writes the sorted sidebar
//! index consumed by the documentation shell.

mod metadata;
mod scan;

pub use metadata::{order_from_filename, SpecMetadata, DEFAULT_ORDER, DEFAULT_VERSION};
pub use scan::{collect, index, run, write_index, IndexReport, SkippedFile};
