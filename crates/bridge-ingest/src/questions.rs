//! Question wording loader.
//!
//! The export is a JSON object keyed by year, then by variable name:
//! `{"2002": {"MRJFLAG": "Have you ever, even once, used marijuana?"}}`.

use std::collections::BTreeMap;
use std::path::Path;

use bridge_model::{QuestionTexts, SourceIssue, SourceKind, YearRange};
use serde_json::Value;
use tracing::info;

use crate::error::IngestError;
use crate::loaded::Loaded;

/// Load question texts. Never fails: a missing or unreadable export
/// degrades to an empty mapping.
pub fn load_question_texts(path: &Path, years: &YearRange) -> Loaded<QuestionTexts> {
    let degraded = |detail: String| {
        Loaded::new(QuestionTexts::new())
            .with_issue(SourceIssue::degraded(SourceKind::QuestionText, detail).with_path(path))
    };

    if !path.is_file() {
        return degraded("question text file not found".to_string());
    }
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(source) => {
            let err = IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            };
            return degraded(err.to_string());
        }
    };
    let document: Value = match serde_json::from_str(&contents) {
        Ok(document) => document,
        Err(source) => {
            let err = IngestError::JsonParse {
                path: path.to_path_buf(),
                source,
            };
            return degraded(err.to_string());
        }
    };
    let Value::Object(by_year) = document else {
        return degraded("expected a JSON object keyed by year".to_string());
    };

    let mut loaded = Loaded::new(QuestionTexts::new());
    for (year_key, variables) in by_year {
        let malformed = |detail: String| {
            SourceIssue::malformed(SourceKind::QuestionText, detail).with_path(path)
        };
        let year = match year_key.trim().parse::<i32>() {
            Ok(year) if years.contains(year) => year,
            Ok(year) => {
                loaded.push_issue(malformed(format!("year {year} outside {years}")));
                continue;
            }
            Err(_) => {
                loaded.push_issue(malformed(format!("invalid year key '{year_key}'")));
                continue;
            }
        };
        let Value::Object(variables) = variables else {
            loaded.push_issue(malformed(format!("year {year}: expected an object")));
            continue;
        };

        let mut texts = BTreeMap::new();
        for (name, text) in variables {
            match text {
                Value::String(text) if !text.trim().is_empty() => {
                    texts.insert(name.trim().to_uppercase(), text.trim().to_string());
                }
                Value::String(_) | Value::Null => {}
                other => {
                    let detail = format!("year {year}, {name}: expected text, found {other}");
                    loaded.push_issue(malformed(detail));
                }
            }
        }
        if !texts.is_empty() {
            loaded.data.entry(year).or_default().extend(texts);
        }
    }

    let total: usize = loaded.data.values().map(BTreeMap::len).sum();
    info!(
        path = %path.display(),
        years = loaded.data.len(),
        texts = total,
        "question texts loaded"
    );
    loaded
}
