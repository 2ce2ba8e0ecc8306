pub mod box_extractor;
pub mod report;

pub use box_extractor::Extractor;
pub use report::{ExtractedFile, ExtractionReport};
