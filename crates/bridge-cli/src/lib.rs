//! CLI library components for the survey bridge builder.

pub mod logging;
pub mod pipeline;
