use serde::Serialize;

use super::{check_manager, Query, QueryParams};
use crate::request::Error;

/// The `fieldValidation` directive of writes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationDirective {
    /// Unknown or duplicate fields fail the request
    Strict,
    /// Unknown or duplicate fields come back as warnings
    Warn,
    /// Unknown fields are dropped
    Ignore,
}

impl ValidationDirective {
    /// The wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationDirective::Strict => "Strict",
            ValidationDirective::Warn => "Warn",
            ValidationDirective::Ignore => "Ignore",
        }
    }
}

/// Options of create and replace calls
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostParams {
    /// Validate and admit without persisting
    pub dry_run: bool,
    /// The actor recorded in `managedFields`
    pub manager: Option<String>,
    /// `fieldValidation`
    pub validation: Option<ValidationDirective>,
}

impl PostParams {
    /// Validate and admit without persisting
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Record the write under `manager`
    #[must_use]
    pub fn manager(mut self, manager: &str) -> Self {
        self.manager = Some(manager.into());
        self
    }
}

impl QueryParams for PostParams {
    fn check(&self) -> Result<(), Error> {
        check_manager(self.manager.as_deref())
    }

    fn append_to(&self, query: &mut Query) {
        write_options(query, self.dry_run, false, &self.manager, self.validation);
    }
}

// dryRun, force, fieldManager, fieldValidation
fn write_options(
    query: &mut Query,
    dry_run: bool,
    force: bool,
    manager: &Option<String>,
    validation: Option<ValidationDirective>,
) {
    if dry_run {
        query.pair("dryRun", "All");
    }
    query
        .flag("force", force)
        .opt("fieldManager", manager.as_ref())
        .opt("fieldValidation", validation.map(|v| v.as_str()));
}

/// A patch body; the variant picks the strategy and the Content-Type
///
/// ```
/// use kubeapi_core::params::Patch;
/// let replicas = serde_json::json!({ "spec": { "replicas": 3 } });
/// let patch = Patch::Merge(&replicas);
/// assert_eq!(patch.content_type(), "application/merge-patch+json");
/// ```
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum Patch<T: Serialize> {
    /// Server-side apply of a partial manifest
    Apply(T),
    /// RFC 6902 operations
    #[cfg(feature = "jsonpatch")]
    #[cfg_attr(docsrs, doc(cfg(feature = "jsonpatch")))]
    Json(json_patch::Patch),
    /// RFC 7386 merge patch
    Merge(T),
    /// Strategic merge patch, honouring the merge keys of built-in types
    Strategic(T),
}

impl<T: Serialize> Patch<T> {
    pub(crate) fn is_apply(&self) -> bool {
        matches!(self, Patch::Apply(_))
    }

    /// Content-Type the apiserver expects for this strategy
    pub fn content_type(&self) -> &'static str {
        match self {
            Patch::Apply(_) => "application/apply-patch+yaml",
            #[cfg(feature = "jsonpatch")]
            Patch::Json(_) => "application/json-patch+json",
            Patch::Merge(_) => "application/merge-patch+json",
            Patch::Strategic(_) => "application/strategic-merge-patch+json",
        }
    }

    // apply bodies are YAML on the wire and JSON is valid YAML
    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Patch::Apply(body) | Patch::Merge(body) | Patch::Strategic(body) => serde_json::to_vec(body),
            #[cfg(feature = "jsonpatch")]
            Patch::Json(ops) => serde_json::to_vec(ops),
        }
    }
}

/// Options of patch calls
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatchParams {
    /// Validate and admit without persisting
    pub dry_run: bool,
    /// Take over conflicting fields; apply patches only
    pub force: bool,
    /// The actor recorded in `managedFields`, required to apply
    pub manager: Option<String>,
    /// `fieldValidation`
    pub validation: Option<ValidationDirective>,
}

impl PatchParams {
    /// Parameters for server-side apply as `manager`
    pub fn apply(manager: &str) -> Self {
        PatchParams {
            manager: Some(manager.into()),
            ..PatchParams::default()
        }
    }

    /// Force conflicts through
    #[must_use]
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    /// Validate and admit without persisting
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Set `fieldValidation`
    #[must_use]
    pub fn validation(mut self, directive: ValidationDirective) -> Self {
        self.validation = Some(directive);
        self
    }

    /// Check these parameters against the patch they go out with
    pub fn check_patch<P: Serialize>(&self, patch: &Patch<P>) -> Result<(), Error> {
        self.check()?;
        match (patch.is_apply(), self.force, self.manager.is_some()) {
            (false, true, _) => Err(Error::Validation("force is only valid for apply patches".into())),
            (true, _, false) => Err(Error::Validation("apply patches need a field manager".into())),
            _ => Ok(()),
        }
    }
}

impl QueryParams for PatchParams {
    fn check(&self) -> Result<(), Error> {
        check_manager(self.manager.as_deref())
    }

    fn append_to(&self, query: &mut Query) {
        write_options(query, self.dry_run, self.force, &self.manager, self.validation);
    }
}
