//! Submission templates, alignment and CSV output.

pub mod align;
pub mod format;
pub mod template;

pub use align::{align, Alignment};
pub use format::{format_timestamp, write_submission, write_submission_file, TIMESTAMP_COLUMN};
pub use template::{read_table, read_table_path};
