//! Stop name type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop name: {reason}")]
pub struct InvalidStopName {
    reason: &'static str,
}

/// The display name of a stop, used as the stop's key.
///
/// Stops are identified by what riders see on the platform sign, not by a
/// provider-specific stop id. Two physically distinct stops that share a
/// name are therefore treated as one stop.
///
/// Surrounding whitespace is stripped on parse; the name must be
/// non-empty and must not contain control characters.
///
/// # Examples
///
/// ```
/// use transfer_planner::domain::StopName;
///
/// let park = StopName::parse("  Park Street ").unwrap();
/// assert_eq!(park.as_str(), "Park Street");
///
/// assert!(StopName::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopName(String);

impl StopName {
    /// Parse a stop name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopName> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStopName {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidStopName {
                reason: "must not contain control characters",
            });
        }

        Ok(StopName(trimmed.to_string()))
    }

    /// Returns the stop name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopName {
    type Error = InvalidStopName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StopName::parse(&value)
    }
}

impl From<StopName> for String {
    fn from(name: StopName) -> Self {
        name.0
    }
}

impl fmt::Debug for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopName({})", self.0)
    }
}

impl fmt::Display for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
