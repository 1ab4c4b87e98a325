//! Groups requesting accommodation.

use std::fmt;

use non_empty_string::NonEmptyString;
use serde::Serialize;

/// An opaque, non-empty group identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(NonEmptyString);

impl GroupId {
    /// Creates a group identifier from a string.
    ///
    /// # Errors
    ///
    /// Returns `EmptyGroupIdError` if the string is empty.
    pub fn new(s: String) -> Result<Self, EmptyGroupIdError> {
        NonEmptyString::new(s).map(Self).map_err(|_| EmptyGroupIdError)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GroupId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Error returned when a group identifier is empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("group identifier must not be empty")]
pub struct EmptyGroupIdError;

/// One row of the groups table, immutable once read.
///
/// Both the size and gender columns are carried verbatim. The gender
/// descriptor is classified by the allocation engine, and the member count is
/// only interpreted for single-gender groups; mixed rows encode their
/// composition in the gender descriptor and may carry arbitrary text in the
/// members column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    members: String,
    gender: String,
}

impl Group {
    /// Creates a group from its table row.
    #[must_use]
    pub fn new(id: GroupId, members: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            id,
            members: members.into(),
            gender: gender.into(),
        }
    }

    /// The group's identifier.
    #[must_use]
    pub const fn id(&self) -> &GroupId {
        &self.id
    }

    /// The raw `Members` column value.
    #[must_use]
    pub fn members(&self) -> &str {
        &self.members
    }

    /// The raw `Gender` column value.
    #[must_use]
    pub fn gender_spec(&self) -> &str {
        &self.gender
    }
}
