//! Structural validation of version-4 identifier strings.

use once_cell::sync::Lazy;
use regex::Regex;

/// Case-insensitive version-4 layout: `8-4-4-4-12` hex groups, version `4`, variant `8|9|a|b`.
static V4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("version-4 pattern is a valid regex")
});

/// Returns true if `input` is a version-4 UUID in hyphenated form, ignoring case.
pub fn is_valid(input: &str) -> bool {
    V4_PATTERN.is_match(input)
}

/// Input accepted by [`validate`]: nothing, a single candidate, or a sequence of optional
/// candidates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Candidates<'a> {
    /// No input at all.
    #[default]
    Absent,
    /// A single candidate string.
    One(&'a str),
    /// Several candidates, any of which may be missing.
    Many(Vec<Option<&'a str>>),
}

impl<'a> Candidates<'a> {
    fn into_items(self) -> Vec<Option<&'a str>> {
        match self {
            Candidates::Absent => Vec::new(),
            Candidates::One(candidate) => vec![Some(candidate)],
            Candidates::Many(candidates) => candidates,
        }
    }
}

impl<'a> From<&'a str> for Candidates<'a> {
    fn from(candidate: &'a str) -> Self {
        Candidates::One(candidate)
    }
}

impl<'a> From<&'a String> for Candidates<'a> {
    fn from(candidate: &'a String) -> Self {
        Candidates::One(candidate.as_str())
    }
}

impl<'a> From<Option<&'a str>> for Candidates<'a> {
    fn from(candidate: Option<&'a str>) -> Self {
        candidate.map_or(Candidates::Absent, Candidates::One)
    }
}

impl<'a> From<Vec<Option<&'a str>>> for Candidates<'a> {
    fn from(candidates: Vec<Option<&'a str>>) -> Self {
        Candidates::Many(candidates)
    }
}

impl<'a> From<&'a [Option<&'a str>]> for Candidates<'a> {
    fn from(candidates: &'a [Option<&'a str>]) -> Self {
        Candidates::Many(candidates.to_vec())
    }
}

impl<'a> From<Vec<&'a str>> for Candidates<'a> {
    fn from(candidates: Vec<&'a str>) -> Self {
        Candidates::Many(candidates.into_iter().map(Some).collect())
    }
}

impl<'a> From<&'a [&'a str]> for Candidates<'a> {
    fn from(candidates: &'a [&'a str]) -> Self {
        Candidates::Many(candidates.iter().copied().map(Some).collect())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Candidates<'a> {
    fn from(candidates: [&'a str; N]) -> Self {
        Candidates::Many(candidates.into_iter().map(Some).collect())
    }
}

impl<'a> From<&'a [String]> for Candidates<'a> {
    fn from(candidates: &'a [String]) -> Self {
        Candidates::Many(candidates.iter().map(|c| Some(c.as_str())).collect())
    }
}

impl<'a> From<&'a Vec<String>> for Candidates<'a> {
    fn from(candidates: &'a Vec<String>) -> Self {
        Candidates::from(candidates.as_slice())
    }
}

/// Filters `input` down to the candidates that look like version-4 UUIDs.
///
/// Missing and non-matching candidates are dropped. Survivors keep their order and their
/// original casing; this is a filter, not a canonicaliser.
pub fn validate<'a>(input: impl Into<Candidates<'a>>) -> Vec<String> {
    input
        .into()
        .into_items()
        .into_iter()
        .flatten()
        .filter(|candidate| is_valid(candidate))
        .map(str::to_owned)
        .collect()
}
