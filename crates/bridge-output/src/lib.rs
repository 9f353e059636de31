//! Output generation for the cross-year variable bridge.
//!
//! The bridge table is built as a polars [`DataFrame`](polars::prelude::DataFrame)
//! with the columns in [`OUTPUT_COLUMNS`] and written as CSV; the run report
//! is written as JSON next to it.

pub mod error;
pub mod frame;
pub mod writer;

pub use error::{OutputError, Result};
pub use frame::{OUTPUT_COLUMNS, build_output_frame};
pub use writer::{ensure_parent_dir, write_bridge_csv, write_report_json};
