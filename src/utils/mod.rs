//! Shared utility functions.
//!
//! - File operations (directory preparation, atomic replacement)
//! - Name validation for file names, resource names, label names and metric names
//! - Duration formatting

mod file_ops;
mod format;
mod string;

pub use file_ops::{ensure_dir, write_atomic};
pub use format::format_duration;
pub use string::{
    is_safe_path_segment, is_valid_label_name, is_valid_metric_name, is_valid_resource_name,
};
