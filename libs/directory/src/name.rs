//! Two-part service names and their canonical textual form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reasons a service name fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// The canonical form requires a `.` between the id and the kind.
    #[error("service name '{0}' is missing the '.kind' part")]
    MissingKind(String),
    #[error("service name '{0}' has an empty id")]
    EmptyId(String),
    #[error("service name '{0}' has an empty kind")]
    EmptyKind(String),
    #[error("service name id '{0}' must not contain '.'")]
    DottedId(String),
}

/// A two-part service name: a free-form `id` plus a `kind` tag.
///
/// The canonical textual form is `id.kind`. The id never contains a dot;
/// everything after the first dot belongs to the kind. Names sharing an id
/// but differing in kind identify sibling implementations of the same
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceName {
    id: String,
    kind: String,
}

impl ServiceName {
    /// Build a name from parts, enforcing the canonical-form rules.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Result<Self, NameError> {
        let id = id.into();
        let kind = kind.into();
        if id.is_empty() {
            return Err(NameError::EmptyId(format!("{id}.{kind}")));
        }
        if id.contains('.') {
            return Err(NameError::DottedId(id));
        }
        if kind.is_empty() {
            return Err(NameError::EmptyKind(format!("{id}.{kind}")));
        }
        Ok(Self { id, kind })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.id, self.kind)
    }
}

impl FromStr for ServiceName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, kind) = s
            .split_once('.')
            .ok_or_else(|| NameError::MissingKind(s.to_owned()))?;
        Self::new(id, kind)
    }
}

impl TryFrom<String> for ServiceName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ServiceName> for String {
    fn from(name: ServiceName) -> Self {
        name.to_string()
    }
}
