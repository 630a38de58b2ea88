use serde::{ser::SerializeMap, Serialize, Serializer};

use super::{Query, QueryParams};

/// What happens to dependents of a deleted object
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationPolicy {
    /// Leave dependents in place
    Orphan,
    /// Delete the owner now and dependents in the background
    Background,
    /// Delete dependents before the owner
    Foreground,
}

impl PropagationPolicy {
    fn as_str(self) -> &'static str {
        match self {
            PropagationPolicy::Orphan => "Orphan",
            PropagationPolicy::Background => "Background",
            PropagationPolicy::Foreground => "Foreground",
        }
    }
}

/// Conditions checked before a delete; a mismatch answers `409 Conflict`
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preconditions {
    /// Expected `metadata.resourceVersion`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    /// Expected `metadata.uid`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// Options of delete calls
///
/// Serializes to a `DeleteOptions` body. Delete-collection calls also accept
/// the same options as a query string through [`QueryParams`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteParams {
    /// Validate and admit without persisting
    pub dry_run: bool,
    /// Seconds before the object is removed, 0 for immediately
    pub grace_period_seconds: Option<u32>,
    /// Garbage collection of dependents
    pub propagation_policy: Option<PropagationPolicy>,
    /// Checked before deleting
    pub preconditions: Option<Preconditions>,
}

impl DeleteParams {
    fn with_policy(policy: PropagationPolicy) -> Self {
        DeleteParams {
            propagation_policy: Some(policy),
            ..DeleteParams::default()
        }
    }

    /// Dependents are deleted in the background
    pub fn background() -> Self {
        Self::with_policy(PropagationPolicy::Background)
    }

    /// Dependents are deleted first
    pub fn foreground() -> Self {
        Self::with_policy(PropagationPolicy::Foreground)
    }

    /// Dependents are left behind
    pub fn orphan() -> Self {
        Self::with_policy(PropagationPolicy::Orphan)
    }

    /// Validate and admit without persisting
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Seconds before the object is removed
    #[must_use]
    pub fn grace_period(mut self, seconds: u32) -> Self {
        self.grace_period_seconds = Some(seconds);
        self
    }

    /// Only delete if these hold
    #[must_use]
    pub fn preconditions(mut self, preconditions: Preconditions) -> Self {
        self.preconditions = Some(preconditions);
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        *self == DeleteParams::default()
    }
}

// The body takes `dryRun` as a list of stages, only "All" exists
impl Serialize for DeleteParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_map(None)?;
        if self.dry_run {
            body.serialize_entry("dryRun", &["All"])?;
        }
        if let Some(seconds) = self.grace_period_seconds {
            body.serialize_entry("gracePeriodSeconds", &seconds)?;
        }
        if let Some(policy) = self.propagation_policy {
            body.serialize_entry("propagationPolicy", policy.as_str())?;
        }
        if let Some(preconditions) = &self.preconditions {
            body.serialize_entry("preconditions", preconditions)?;
        }
        body.end()
    }
}

impl QueryParams for DeleteParams {
    fn append_to(&self, query: &mut Query) {
        if self.dry_run {
            query.pair("dryRun", "All");
        }
        query
            .opt("gracePeriodSeconds", self.grace_period_seconds)
            .opt("propagationPolicy", self.propagation_policy.map(PropagationPolicy::as_str));
    }
}
