//! Data model for the cross-year variable bridge.
//!
//! Records flow strictly left to right through the harmonization stages:
//! [`MetadataRow`] (base source) is joined into a [`SourceRecord`], enriched
//! with classifier output and a [`NarrowKey`], and finally emitted as a
//! [`VariableRecord`] carrying its `cross_year_narrow` bridge id.

pub mod category;
pub mod error;
pub mod issue;
pub mod key;
pub mod options;
pub mod record;
pub mod report;

pub use category::{Features, MeasureType, OTHER_SUBSTANCE, UNQUALIFIED_PERIOD};
pub use error::{ModelError, Result};
pub use issue::{IssueKind, SourceIssue, SourceKind};
pub use key::{BridgeKey, NarrowKey};
pub use options::{BridgeOptions, ConfirmedScope, ExpansionMode, YearRange};
pub use record::{
    ConcordanceEntry, MetadataRow, QuestionTexts, SourceRecord, VariableRecord, bridge_id,
};
pub use report::{IssueCounts, RunReport, SourceDigest};
