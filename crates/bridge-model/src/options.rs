//! Configuration options for a harmonization run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};

/// First survey year covered by the public-use files.
pub const FIRST_SURVEY_YEAR: i32 = 1979;
/// Most recent survey year covered by the public-use files.
pub const LAST_SURVEY_YEAR: i32 = 2024;

/// Inclusive range of accepted survey years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    first: i32,
    last: i32,
}

impl YearRange {
    pub fn new(first: i32, last: i32) -> Result<Self> {
        if first > last {
            return Err(ModelError::InvalidYearRange { first, last });
        }
        Ok(Self { first, last })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            first: FIRST_SURVEY_YEAR,
            last: LAST_SURVEY_YEAR,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

/// How crosswalk groups override heuristic keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionMode {
    /// Single pass; the first confirmed group (in id order) to claim a key
    /// keeps it. Multi-hop chains are not followed.
    #[default]
    FirstClaim,
    /// Disjoint-set closure over keys and confirmed groups.
    Transitive,
}

impl ExpansionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpansionMode::FirstClaim => "first_claim",
            ExpansionMode::Transitive => "transitive",
        }
    }
}

impl FromStr for ExpansionMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first_claim" => Ok(ExpansionMode::FirstClaim),
            "transitive" => Ok(ExpansionMode::Transitive),
            _ => Err(ModelError::UnknownExpansionMode(s.to_string())),
        }
    }
}

/// Which fields make up `cross_year_confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmedScope {
    /// `variable_name`, `concordance_file` and `confirmed_group`.
    #[default]
    Variable,
    /// `concordance_file` and `confirmed_group` only, so one crosswalk group
    /// can link variables that were renamed between releases.
    Group,
}

impl ConfirmedScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmedScope::Variable => "variable",
            ConfirmedScope::Group => "group",
        }
    }
}

impl FromStr for ConfirmedScope {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "variable" => Ok(ConfirmedScope::Variable),
            "group" => Ok(ConfirmedScope::Group),
            _ => Err(ModelError::UnknownConfirmedScope(s.to_string())),
        }
    }
}

/// Options controlling a harmonization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeOptions {
    /// Accepted survey years; rows outside are skipped as malformed.
    pub years: YearRange,
    /// Confirmed-group expansion strategy.
    pub expansion: ExpansionMode,
    /// Composition of the confirmed cross-year id.
    pub confirmed_scope: ConfirmedScope,
}

impl BridgeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_years(mut self, years: YearRange) -> Self {
        self.years = years;
        self
    }

    pub fn with_expansion(mut self, expansion: ExpansionMode) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn with_confirmed_scope(mut self, scope: ConfirmedScope) -> Self {
        self.confirmed_scope = scope;
        self
    }
}
