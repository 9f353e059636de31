//! Source adapters for the cross-year variable bridge.
//!
//! Each loader reads an already-extracted tabular export and returns a
//! [`Loaded`] value: the parsed rows plus the non-fatal
//! [`bridge_model::SourceIssue`]s met while reading them.
//!
//! - **Base metadata** ([`load_metadata`]): required; fails with
//!   [`IngestError::SourceUnavailable`] when nothing can be read.
//! - **Question text** ([`load_question_texts`]): optional JSON export.
//! - **Concordance** ([`load_concordance`]): optional wide crosswalk exports.

mod concordance;
mod digest;
mod discovery;
mod error;
mod loaded;
mod metadata;
mod questions;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loaders ===
pub use concordance::{
    FALLBACK_HEADER_ROW, HEADER_SCAN_ROWS, PREFERRED_FILES, concordance_files, detect_header_row,
    header_year, load_concordance, read_crosswalk, year_columns,
};
pub use loaded::Loaded;
pub use metadata::load_metadata;
pub use questions::load_question_texts;

// === File Discovery ===
pub use discovery::list_csv_files;

// === Digests ===
pub use digest::{digest_file, digest_source, sha256_hex};
