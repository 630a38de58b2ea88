use http::Method;
use serde::Serialize;

use super::{
    resources::{ResourceDef, Subresource},
    Error,
};
use crate::{
    gvk::GroupVersionResource,
    params::{Patch, PatchParams, QueryParams},
    request::{check_segment, decode_segment, encode_segment, with_query, Payload},
};

/// What an operation does to its resource
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read a collection
    List,
    /// Create an object or a subresource
    Create,
    /// Read an object or a subresource
    Read,
    /// Replace an object or a subresource
    Replace,
    /// Patch an object or a subresource
    Patch,
    /// Delete an object
    Delete,
    /// Delete a collection
    DeleteCollection,
    /// Deprecated single object watch under `/watch/`
    Watch,
    /// Deprecated collection watch under `/watch/`
    WatchList,
    /// Streaming or proxied subresources (`exec`, `attach`, `portforward`, `proxy`)
    Connect,
    /// Version and API discovery documents
    Discovery,
}

/// Values substituted into the `{namespace}`, `{name}` and `{path}` placeholders of a template
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathArgs {
    /// The `{namespace}` placeholder
    pub namespace: Option<String>,
    /// The `{name}` placeholder
    pub name: Option<String>,
    /// The `{path}` placeholder of proxy operations, may span several segments
    pub path: Option<String>,
}

impl PathArgs {
    /// Arguments for operations without placeholders
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the proxied sub-path
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Look up a placeholder by name
    pub fn get(&self, parameter: &str) -> Option<&str> {
        match parameter {
            "namespace" => self.namespace.as_deref(),
            "name" => self.name.as_deref(),
            "path" => self.path.as_deref(),
            _ => None,
        }
    }

    fn set(&mut self, parameter: &str, value: String) {
        match parameter {
            "namespace" => self.namespace = Some(value),
            "name" => self.name = Some(value),
            "path" => self.path = Some(value),
            _ => {}
        }
    }
}

/// One REST endpoint of the apiserver
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    /// The upstream `operationId`, e.g. `listCoreV1NamespacedPod`
    pub id: String,
    /// HTTP method
    pub method: Method,
    /// Path template, e.g. `/api/v1/namespaces/{namespace}/pods/{name}`
    pub path: String,
    /// What the operation does
    pub action: Action,
    /// The resource the operation belongs to, `None` for discovery
    pub resource: Option<&'static ResourceDef>,
    /// The subresource addressed, if any
    pub subresource: Option<Subresource>,
}

impl Operation {
    /// The group, version and plural this operation acts on
    pub fn gvr(&self) -> Option<GroupVersionResource> {
        self.resource.map(ResourceDef::gvr)
    }

    /// Names of the placeholders in the path template, in order
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter_map(placeholder)
    }

    /// Whether the path carries no namespace for a namespaced resource
    pub fn is_all_namespaces(&self) -> bool {
        self.id.ends_with("ForAllNamespaces")
    }

    /// Interpolate the path template
    ///
    /// `namespace` and `name` are encoded as single segments, `path` is a sub-path
    /// whose segments are encoded individually. No value may be a dot segment.
    pub fn url(&self, args: &PathArgs) -> Result<String, Error> {
        let mut url = String::with_capacity(self.path.len());
        for (i, segment) in self.path.split('/').enumerate() {
            if i > 0 {
                url.push('/');
            }
            let Some(parameter) = placeholder(segment) else {
                url.push_str(segment);
                continue;
            };
            let value = args
                .get(parameter)
                .filter(|v| !v.trim_matches('/').is_empty())
                .ok_or_else(|| Error::MissingPathParameter {
                    operation: self.id.clone(),
                    parameter: parameter.to_string(),
                })?;
            let parts = if parameter == "path" {
                value.split('/').filter(|s| !s.is_empty()).collect()
            } else {
                vec![value]
            };
            for (j, part) in parts.into_iter().enumerate() {
                check_segment(part)?;
                if j > 0 {
                    url.push('/');
                }
                url.push_str(&encode_segment(part));
            }
        }
        Ok(url)
    }

    fn refuse(&self) -> Error {
        Error::MethodMismatch {
            operation: self.id.clone(),
            method: self.method.clone(),
        }
    }

    /// Build the request for a non-patch operation
    ///
    /// A non-empty body is sent as JSON.
    pub fn request<Q: QueryParams + ?Sized>(
        &self,
        args: &PathArgs,
        query: &Q,
        body: Vec<u8>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        if self.method == Method::PATCH && self.action != Action::Connect {
            return Err(self.refuse());
        }
        let uri = with_query(self.url(args)?, query)?;
        Ok(Payload::json(body).build(self.method.clone(), uri)?)
    }

    /// Build the request for a patch operation
    pub fn patch_request<P: Serialize>(
        &self,
        args: &PathArgs,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        if self.method != Method::PATCH || self.action != Action::Patch {
            return Err(self.refuse());
        }
        pp.check_patch(patch)?;
        let uri = with_query(self.url(args)?, pp)?;
        Ok(Payload::patch(patch)?.build(Method::PATCH, uri)?)
    }

    /// Match a concrete path against the template, capturing placeholder values
    ///
    /// Captured values are percent-decoded, so feeding them back to [`Operation::url`]
    /// yields the same path.
    pub(super) fn matches(&self, method: &Method, path: &str) -> Option<PathArgs> {
        if &self.method != method {
            return None;
        }
        let template = self.path.trim_end_matches('/').split('/').collect::<Vec<_>>();
        let concrete = path.trim_end_matches('/').split('/').collect::<Vec<_>>();
        let mut args = PathArgs::default();
        for (i, t) in template.iter().enumerate() {
            match placeholder(t) {
                Some("path") => {
                    let rest = concrete.get(i..).filter(|r| !r.is_empty())?;
                    let decoded = rest.iter().map(|s| decode_segment(s)).collect::<Option<Vec<_>>>()?;
                    args.set("path", decoded.join("/"));
                    return Some(args);
                }
                Some(parameter) => {
                    let value = concrete.get(i).filter(|v| !v.is_empty())?;
                    args.set(parameter, decode_segment(value)?);
                }
                None => {
                    if concrete.get(i) != Some(t) {
                        return None;
                    }
                }
            }
        }
        (template.len() == concrete.len()).then_some(args)
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// `rbac.authorization.k8s.io` becomes `RbacAuthorization`, the core group `Core`
pub(super) fn group_ident(group: &str) -> String {
    if group.is_empty() {
        return "Core".into();
    }
    group
        .trim_end_matches(".k8s.io")
        .split('.')
        .map(capitalize)
        .collect()
}

pub(super) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_follow_openapi_naming() {
        assert_eq!(group_ident(""), "Core");
        assert_eq!(group_ident("apps"), "Apps");
        assert_eq!(group_ident("rbac.authorization.k8s.io"), "RbacAuthorization");
        assert_eq!(group_ident("flowcontrol.apiserver.k8s.io"), "FlowcontrolApiserver");
        assert_eq!(capitalize("v1beta1"), "V1beta1");
    }

    #[test]
    fn path_args_lookup() {
        let args = PathArgs::new().namespace("ns").name("web");
        assert_eq!(args.get("namespace"), Some("ns"));
        assert_eq!(args.get("name"), Some("web"));
        assert_eq!(args.get("path"), None);
        assert_eq!(args.get("other"), None);
    }

    #[test]
    fn placeholders_are_braced_segments() {
        assert_eq!(placeholder("{name}"), Some("name"));
        assert_eq!(placeholder("pods"), None);
        assert_eq!(placeholder("{name"), None);
    }
}
