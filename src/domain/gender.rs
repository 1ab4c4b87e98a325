//! Gender tags and gender-spec parsing.
//!
//! A group's `Gender` column is either a plain tag (`Boys`/`Girls`) or a
//! mixed composition such as `5 Boys & 3 Girls`. Parsing is strict: anything
//! outside those shapes is an error that the caller must surface.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The gender a room or a single-gender group is reserved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Boys-only rooms and groups.
    Boys,
    /// Girls-only rooms and groups.
    Girls,
}

impl Gender {
    /// Returns the canonical label used in input and output tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boys => "Boys",
            Self::Girls => "Girls",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is neither `Boys` nor `Girls`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unrecognised gender '{0}': expected 'Boys' or 'Girls'")]
pub struct ParseGenderError(String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("boys") {
            Ok(Self::Boys)
        } else if trimmed.eq_ignore_ascii_case("girls") {
            Ok(Self::Girls)
        } else {
            Err(ParseGenderError(s.to_string()))
        }
    }
}

/// A parsed gender descriptor for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderSpec {
    /// The whole group is one gender; its size comes from the `Members`
    /// column.
    Single(Gender),
    /// The group is split into boy and girl sub-groups with explicit counts.
    Mixed {
        /// Number of boys requested.
        boys: u32,
        /// Number of girls requested.
        girls: u32,
    },
}

/// The two separators accepted between the boy and girl counts of a mixed
/// spec. Kept as a single alternation so the accepted grammar is explicit
/// rather than a chain of fallback parses.
static MIXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\s*boys\s*(?:&|and)\s*(\d+)\s*girls\s*$")
        .expect("mixed gender pattern is valid")
});

/// Error returned when a gender descriptor matches neither a plain tag nor a
/// mixed composition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unrecognised gender format '{0}'")]
pub struct ParseSpecError(String);

impl FromStr for GenderSpec {
    type Err = ParseSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(gender) = trimmed.parse::<Gender>() {
            return Ok(Self::Single(gender));
        }

        let captures = MIXED
            .captures(trimmed)
            .ok_or_else(|| ParseSpecError(s.to_string()))?;

        // Counts that overflow u32 are rejected the same way as a
        // non-matching string.
        let boys = captures[1]
            .parse()
            .map_err(|_| ParseSpecError(s.to_string()))?;
        let girls = captures[2]
            .parse()
            .map_err(|_| ParseSpecError(s.to_string()))?;

        Ok(Self::Mixed { boys, girls })
    }
}

impl fmt::Display for GenderSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Single(gender) => write!(f, "{gender}"),
            Self::Mixed { boys, girls } => write!(f, "{boys} Boys & {girls} Girls"),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("Boys", Gender::Boys; "canonical boys")]
    #[test_case("girls", Gender::Girls; "lowercase girls")]
    #[test_case(" BOYS ", Gender::Boys; "padded uppercase")]
    fn gender_parses(input: &str, expected: Gender) {
        assert_eq!(input.parse::<Gender>().unwrap(), expected);
    }

    #[test]
    fn gender_rejects_other_strings() {
        assert!("Other".parse::<Gender>().is_err());
        assert!(String::new().parse::<Gender>().is_err());
    }

    #[test_case("Boys", GenderSpec::Single(Gender::Boys); "single boys")]
    #[test_case("GIRLS", GenderSpec::Single(Gender::Girls); "single girls uppercase")]
    #[test_case("5 Boys & 3 Girls", GenderSpec::Mixed { boys: 5, girls: 3 }; "ampersand")]
    #[test_case("5 boys AND 3 girls", GenderSpec::Mixed { boys: 5, girls: 3 }; "and keyword")]
    #[test_case("  2 Boys and 7 Girls  ", GenderSpec::Mixed { boys: 2, girls: 7 }; "padded")]
    #[test_case("0 Boys & 0 Girls", GenderSpec::Mixed { boys: 0, girls: 0 }; "zero counts")]
    #[test_case("12Boys&4Girls", GenderSpec::Mixed { boys: 12, girls: 4 }; "no interior spaces")]
    fn spec_parses(input: &str, expected: GenderSpec) {
        assert_eq!(input.parse::<GenderSpec>().unwrap(), expected);
    }

    #[test_case("Some Boys"; "non numeric prefix")]
    #[test_case("5 Boys"; "missing girls clause")]
    #[test_case("3 Girls & 5 Boys"; "reversed order")]
    #[test_case("5 Boys & 3 Girls please"; "trailing text")]
    #[test_case("5 Boys + 3 Girls"; "unknown separator")]
    #[test_case(""; "empty string")]
    fn spec_rejects(input: &str) {
        let error = input.parse::<GenderSpec>().unwrap_err();
        assert_eq!(error, ParseSpecError(input.to_string()));
    }

    #[test]
    fn spec_rejects_overflowing_counts() {
        assert!("99999999999 Boys & 1 Girls".parse::<GenderSpec>().is_err());
    }

    #[test]
    fn spec_display_round_trips_mixed() {
        let spec = GenderSpec::Mixed { boys: 4, girls: 2 };
        assert_eq!(spec.to_string(), "4 Boys & 2 Girls");
        assert_eq!(spec.to_string().parse::<GenderSpec>().unwrap(), spec);
    }
}
