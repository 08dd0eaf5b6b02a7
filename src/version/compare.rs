//! Dotted-segment version ordering and range checks.
//!
//! Versions are compared segment by segment after splitting on `.`. A pair
//! of purely numeric segments compares numerically; any other pair compares
//! as raw strings, so tool output such as `1.8.0_292` or `2023.1` can be
//! ordered without being valid semver.

use std::cmp::Ordering;

use serde::Serialize;

/// Outcome of checking a version against an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeCheck {
    /// Version is below the minimum, or could not be parsed at all.
    BelowMin,
    /// Version is above the maximum.
    AboveMax,
    /// Version satisfies every configured bound.
    InRange,
    /// No bound was configured, so nothing was compared.
    NotEvaluated,
}

impl RangeCheck {
    /// The `{-1, 0, 1}` form of this result.
    pub fn signum(&self) -> i32 {
        match self {
            RangeCheck::BelowMin => -1,
            RangeCheck::AboveMax => 1,
            RangeCheck::InRange | RangeCheck::NotEvaluated => 0,
        }
    }

    /// Whether the probe may accept the installation.
    pub fn is_acceptable(&self) -> bool {
        matches!(self, RangeCheck::InRange | RangeCheck::NotEvaluated)
    }
}

/// Compare two dotted version strings.
///
/// When all common segments are equal, the longer version is greater unless
/// every extra segment is numerically zero, so `"1.2"` equals `"1.2.0"`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();

    for (x, y) in a_parts.iter().zip(b_parts.iter()) {
        let ord = compare_segments(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    let common = a_parts.len().min(b_parts.len());
    match a_parts.len().cmp(&b_parts.len()) {
        Ordering::Equal => Ordering::Equal,
        Ordering::Greater if all_zero(&a_parts[common..]) => Ordering::Equal,
        Ordering::Greater => Ordering::Greater,
        Ordering::Less if all_zero(&b_parts[common..]) => Ordering::Equal,
        Ordering::Less => Ordering::Less,
    }
}

/// Check `version` against optional inclusive bounds.
///
/// An absent or empty version is reported as [`RangeCheck::BelowMin`]: a
/// version that cannot be read cannot be confirmed acceptable. Absent bounds
/// are not checked.
pub fn check_version_in_range(
    min: Option<&str>,
    max: Option<&str>,
    version: Option<&str>,
) -> RangeCheck {
    let Some(version) = version.filter(|v| !v.is_empty()) else {
        return RangeCheck::BelowMin;
    };

    if let Some(min) = min {
        if compare_versions(version, min) == Ordering::Less {
            return RangeCheck::BelowMin;
        }
    }

    if let Some(max) = max {
        if compare_versions(version, max) == Ordering::Greater {
            return RangeCheck::AboveMax;
        }
    }

    RangeCheck::InRange
}

fn compare_segments(a: &str, b: &str) -> Ordering {
    if is_numeric(a) && is_numeric(b) {
        compare_numeric(a, b)
    } else {
        a.cmp(b)
    }
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric comparison of digit strings of any length.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn all_zero(segments: &[&str]) -> bool {
    segments
        .iter()
        .all(|s| is_numeric(s) && s.bytes().all(|b| b == b'0'))
}
