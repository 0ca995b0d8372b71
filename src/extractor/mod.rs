pub mod sample_extractor;
pub mod sample_writer;

pub use sample_extractor::SampleExtractor;
pub use sample_writer::{format_sample, write_samples, write_samples_to};
