pub mod mode;
pub mod report;

pub use mode::{derived_output_path, RunMode};
pub use report::{BatchReport, InputOutcome, InputRecord, OutputRecord};
