//! TIFF writing module
//!
//! Dumps normalized digits as 8-bit grayscale TIFF for inspection.

mod standard_tiff_writer;
pub mod types;
mod writer;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::TiffCompression;
pub use writer::TiffWriter;
