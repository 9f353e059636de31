//! Label normalization.
//!
//! Early survey years encode lifetime use redundantly in the label
//! (`"MARIJUANA - EVER USED"`) while later releases do not. Stripping that
//! phrasing and the recode/audience prefixes keeps the cleaned label stable
//! across releases.

use std::sync::LazyLock;

use regex::Regex;

static RECODE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RC-\s*").expect("valid recode prefix regex"));

static AUDIENCE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(ADULT|YOUTH):\s*").expect("valid audience prefix regex"));

static EVER_USED_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-?\s*EVER\s*USED\s*$").expect("valid ever-used regex"));

/// Canonicalize a raw variable label.
///
/// Total: a missing label yields an empty string. The rules are applied
/// until the label stops changing, so stacked prefixes such as
/// `"RC-ADULT: "` are fully removed and the result is idempotent.
pub fn clean_label(label: Option<&str>) -> String {
    let Some(raw) = label else {
        return String::new();
    };
    let mut cleaned = raw.to_uppercase().trim().to_string();
    loop {
        let next = strip_once(&cleaned);
        if next == cleaned {
            return cleaned;
        }
        cleaned = next;
    }
}

fn strip_once(label: &str) -> String {
    let stripped = RECODE_PREFIX.replace(label, "");
    let stripped = AUDIENCE_PREFIX.replace(&stripped, "");
    let stripped = if stripped.contains("LIFETIME") || stripped.contains("EVER") {
        EVER_USED_SUFFIX.replace(&stripped, "").into_owned()
    } else {
        stripped.into_owned()
    };
    stripped.trim().to_string()
}
