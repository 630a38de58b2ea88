//! `meta/v1 Status` answers, successful or not
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `Status` returned in place of an object
///
/// Deletes that complete at once, collection deletes and some connect
/// endpoints answer with one.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Status {
    /// `Success` or `Failure`; some servers leave it out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusSummary>,
    /// Suggested HTTP code, 0 when unset
    #[serde(skip_serializing_if = "is_zero")]
    pub code: u16,
    /// Human readable text
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Machine readable reason such as `NotFound`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
    /// The object the status is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

impl Status {
    /// A `Success` status
    pub fn success() -> Self {
        Status {
            status: Some(StatusSummary::Success),
            ..Default::default()
        }
    }

    /// A `Failure` status
    pub fn failure(message: &str, reason: &str) -> Self {
        Status {
            status: Some(StatusSummary::Failure),
            message: message.into(),
            reason: reason.into(),
            ..Default::default()
        }
    }

    /// Set the code
    #[must_use]
    pub fn with_code(self, code: u16) -> Self {
        Status { code, ..self }
    }

    /// Set the details
    #[must_use]
    pub fn with_details(self, details: StatusDetails) -> Self {
        Status {
            details: Some(details),
            ..self
        }
    }

    /// Explicitly `Success`
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(StatusSummary::Success))
    }

    /// Explicitly `Failure`
    pub fn is_failure(&self) -> bool {
        matches!(self.status, Some(StatusSummary::Failure))
    }
}

/// Outcome recorded in a [`Status`]
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatusSummary {
    /// The operation went through
    Success,
    /// The operation was refused or failed
    Failure,
}

/// What a [`Status`] is about
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusDetails {
    /// Object name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// API group
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
    /// Plural resource name; the server calls it kind
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Object uid
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,
    /// Per field causes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<StatusCause>,
    /// Retry hint in seconds, 0 when unset
    #[serde(skip_serializing_if = "is_zero")]
    pub retry_after_seconds: u32,
}

/// One field that failed validation
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct StatusCause {
    /// Machine readable reason, e.g. `FieldValueInvalid`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
    /// Human readable text
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// JSON path of the field
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
}

/// The `Status` body of a failed call
#[derive(Error, Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[error("{message}: {reason}")]
pub struct ErrorResponse {
    /// Normally `Failure`
    pub status: String,
    /// Human readable text
    #[serde(default)]
    pub message: String,
    /// Machine readable reason (`NotFound`, `AlreadyExists`, `Invalid`, ...)
    #[serde(default)]
    pub reason: String,
    /// HTTP code
    pub code: u16,
    /// The object the failure is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

impl ErrorResponse {
    /// 404 or reason `NotFound`
    pub fn is_not_found(&self) -> bool {
        self.code == 404 || self.reason == "NotFound"
    }

    /// 409, from an `AlreadyExists` or a stale resource version
    pub fn is_conflict(&self) -> bool {
        self.code == 409
    }
}

fn is_zero<N: Default + PartialEq>(n: &N) -> bool {
    *n == N::default()
}
