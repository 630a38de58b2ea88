//! Identifiers of API groups, kinds and resource collections
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `group/version` string that does not parse
#[derive(Debug, Error)]
#[error("invalid group version {0:?}")]
pub struct ParseGroupVersionError(pub String);

/// An API group at one version; the core group is `""`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct GroupVersion {
    /// Group name
    pub group: String,
    /// Version, e.g. `v1beta1`
    pub version: String,
}

impl GroupVersion {
    /// A group at a version
    pub fn new(group: &str, version: &str) -> Self {
        GroupVersion {
            group: group.into(),
            version: version.into(),
        }
    }

    /// `v1` for the core group, `group/version` otherwise
    pub fn api_version(&self) -> String {
        self.to_string()
    }

    /// `/api/v1` for the core group, `/apis/{group}/{version}` otherwise
    pub fn url_prefix(&self) -> String {
        match self.group.as_str() {
            "" => format!("/api/{}", self.version),
            group => format!("/apis/{group}/{}", self.version),
        }
    }

    /// A kind of this group version
    pub fn kind(&self, kind: &str) -> GroupVersionKind {
        GroupVersionKind::new(&self.group, &self.version, kind)
    }

    /// A resource collection of this group version
    pub fn resource(&self, plural: &str) -> GroupVersionResource {
        GroupVersionResource::new(&self.group, &self.version, plural)
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.version)
        } else {
            write!(f, "{}/{}", self.group, self.version)
        }
    }
}

impl FromStr for GroupVersion {
    type Err = ParseGroupVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(version), None, None) if !version.is_empty() => Ok(GroupVersion::new("", version)),
            (Some(group), Some(version), None) if !group.is_empty() && !version.is_empty() => {
                Ok(GroupVersion::new(group, version))
            }
            _ => Err(ParseGroupVersionError(s.into())),
        }
    }
}

/// A kind, as found in `apiVersion` and `kind` of a manifest
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct GroupVersionKind {
    /// Group name
    pub group: String,
    /// Version
    pub version: String,
    /// Kind, e.g. `Deployment`
    pub kind: String,
}

impl GroupVersionKind {
    /// A kind of a group version
    pub fn new(group: &str, version: &str, kind: &str) -> Self {
        GroupVersionKind {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// The group version part
    pub fn group_version(&self) -> GroupVersion {
        GroupVersion::new(&self.group, &self.version)
    }

    /// The `apiVersion` of manifests of this kind
    pub fn api_version(&self) -> String {
        self.group_version().to_string()
    }
}

/// A resource collection, as found in URLs
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct GroupVersionResource {
    /// Group name
    pub group: String,
    /// Version
    pub version: String,
    /// Plural name, e.g. `deployments`
    pub resource: String,
}

impl GroupVersionResource {
    /// A collection of a group version
    pub fn new(group: &str, version: &str, resource: &str) -> Self {
        GroupVersionResource {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }

    /// The group version part
    pub fn group_version(&self) -> GroupVersion {
        GroupVersion::new(&self.group, &self.version)
    }

    /// The `apiVersion` of objects in this collection
    pub fn api_version(&self) -> String {
        self.group_version().to_string()
    }

    /// Path of the collection, inside `namespace` when given
    pub fn url_path(&self, namespace: Option<&str>) -> String {
        let prefix = self.group_version().url_prefix();
        match namespace {
            Some(ns) => format!("{prefix}/namespaces/{ns}/{}", self.resource),
            None => format!("{prefix}/{}", self.resource),
        }
    }
}
