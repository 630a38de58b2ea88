//! The catalogue of REST operations served by the built-in API groups.
//!
//! Every endpoint of the apiserver follows a small number of conventions, so the
//! operations are generated from the [`RESOURCES`] table rather than written out:
//! a resource contributes its collection and item endpoints, its deprecated
//! `/watch/` endpoints, one set of endpoints per subresource, and each group and
//! version contributes its discovery documents.
//!
//! ```
//! use kubeapi_core::catalog::{Catalog, PathArgs};
//! let op = Catalog::global().get("readCoreV1NamespacedPod").unwrap();
//! let url = op.url(&PathArgs::new().namespace("default").name("blog")).unwrap();
//! assert_eq!(url, "/api/v1/namespaces/default/pods/blog");
//! ```
use std::collections::{BTreeSet, HashMap};

use http::Method;
use once_cell::sync::Lazy;
use thiserror::Error;

mod operation;
pub mod resources;

pub use operation::{Action, Operation, PathArgs};
pub use resources::{ResourceDef, Subresource, Verb, RESOURCES};

use crate::gvk::GroupVersion;
use operation::{capitalize, group_ident};

/// Possible errors when looking up or dispatching an operation
#[derive(Debug, Error)]
pub enum Error {
    /// No operation with this id, or no operation serving this method and path
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A placeholder of the path template has no value
    #[error("operation {operation} requires path parameter {parameter}")]
    MissingPathParameter {
        /// The operation id
        operation: String,
        /// The placeholder name
        parameter: String,
    },

    /// A patch was given to a non-patch operation, or a plain body to a patch operation
    #[error("operation {operation} ({method}) does not accept this kind of request")]
    MethodMismatch {
        /// The operation id
        operation: String,
        /// The operation's method
        method: Method,
    },

    /// Building the request failed
    #[error(transparent)]
    Request(#[from] crate::request::Error),
}

static GLOBAL: Lazy<Catalog> = Lazy::new(|| Catalog::new(RESOURCES));

/// An indexed set of operations
#[derive(Debug)]
pub struct Catalog {
    operations: Vec<Operation>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// The catalogue of every built-in resource
    pub fn global() -> &'static Catalog {
        &GLOBAL
    }

    /// Generate the operations of a resource table
    pub fn new(resources: &'static [ResourceDef]) -> Self {
        let mut operations = discovery_operations(resources);
        for def in resources {
            expand(def, &mut operations);
        }
        let by_id = operations
            .iter()
            .enumerate()
            .map(|(i, op)| (op.id.clone(), i))
            .collect();
        Self { operations, by_id }
    }

    /// Look up an operation by its `operationId`
    pub fn get(&self, id: &str) -> Option<&Operation> {
        self.by_id.get(id).map(|i| &self.operations[*i])
    }

    /// Look up an operation by its `operationId`, failing on unknown ids
    pub fn operation(&self, id: &str) -> Result<&Operation, Error> {
        self.get(id).ok_or_else(|| Error::UnknownOperation(id.to_string()))
    }

    /// All operations, discovery first, then by resource
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the catalogue has no operations
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Every operation on a resource and its subresources
    pub fn for_resource(&self, group: &str, version: &str, plural: &str) -> Vec<&Operation> {
        self.operations
            .iter()
            .filter(|op| {
                op.resource
                    .is_some_and(|r| r.group == group && r.version == version && r.plural == plural)
            })
            .collect()
    }

    /// Find the operation serving a concrete request, along with its path arguments
    ///
    /// Any query string on `path` is ignored.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<(&Operation, PathArgs), Error> {
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        self.operations
            .iter()
            .find_map(|op| op.matches(method, path).map(|args| (op, args)))
            .ok_or_else(|| Error::UnknownOperation(format!("{method} {path}")))
    }
}

fn discovery_operations(resources: &'static [ResourceDef]) -> Vec<Operation> {
    let discovery = |id: String, path: String| Operation {
        id,
        method: Method::GET,
        path,
        action: Action::Discovery,
        resource: None,
        subresource: None,
    };
    let mut ops = vec![
        discovery("getCodeVersion".into(), "/version/".into()),
        discovery("getAPIVersions".into(), "/apis/".into()),
        discovery("getCoreAPIVersions".into(), "/api/".into()),
        discovery("getCoreV1APIResources".into(), "/api/v1/".into()),
        discovery(
            "getServiceAccountIssuerOpenIDConfiguration".into(),
            "/.well-known/openid-configuration/".into(),
        ),
        discovery("getServiceAccountIssuerOpenIDKeyset".into(), "/openid/v1/jwks/".into()),
    ];

    let groups = resources
        .iter()
        .filter(|r| !r.group.is_empty())
        .map(|r| (r.group, r.version))
        .collect::<BTreeSet<_>>();
    let mut seen = BTreeSet::new();
    for (group, version) in groups {
        let ident = group_ident(group);
        if seen.insert(group) {
            ops.push(discovery(format!("get{ident}APIGroup"), format!("/apis/{group}/")));
        }
        ops.push(discovery(
            format!("get{ident}{}APIResources", capitalize(version)),
            format!("/apis/{group}/{version}/"),
        ));
    }
    ops
}

fn expand(def: &'static ResourceDef, ops: &mut Vec<Operation>) {
    let prefix = GroupVersion::new(def.group, def.version).url_prefix();
    let gv = format!("{}{}", group_ident(def.group), capitalize(def.version));
    let (scope, collection, watch_collection) = if def.namespaced {
        (
            "Namespaced",
            format!("{prefix}/namespaces/{{namespace}}/{}", def.plural),
            format!("{prefix}/watch/namespaces/{{namespace}}/{}", def.plural),
        )
    } else {
        (
            "",
            format!("{prefix}/{}", def.plural),
            format!("{prefix}/watch/{}", def.plural),
        )
    };
    let item = format!("{collection}/{{name}}");
    let kind = def.kind;

    let mut push = |verb: &str, method: Method, path: String, action: Action, suffix: &str| {
        ops.push(Operation {
            id: format!("{verb}{gv}{scope}{kind}{suffix}"),
            method,
            path,
            action,
            resource: Some(def),
            subresource: None,
        });
    };

    for verb in def.verbs {
        match verb {
            Verb::List => push("list", Method::GET, collection.clone(), Action::List, ""),
            Verb::Create => push("create", Method::POST, collection.clone(), Action::Create, ""),
            Verb::Read => push("read", Method::GET, item.clone(), Action::Read, ""),
            Verb::Replace => push("replace", Method::PUT, item.clone(), Action::Replace, ""),
            Verb::Patch => push("patch", Method::PATCH, item.clone(), Action::Patch, ""),
            Verb::Delete => push("delete", Method::DELETE, item.clone(), Action::Delete, ""),
            Verb::DeleteCollection => {}
            Verb::Watch => {
                let single = format!("{watch_collection}/{{name}}");
                push("watch", Method::GET, single, Action::Watch, "");
                push("watch", Method::GET, watch_collection.clone(), Action::WatchList, "List");
            }
        }
    }
    // the collection infix sits between the version and the scope
    if def.supports(Verb::DeleteCollection) {
        ops.push(Operation {
            id: format!("delete{gv}Collection{scope}{kind}"),
            method: Method::DELETE,
            path: collection.clone(),
            action: Action::DeleteCollection,
            resource: Some(def),
            subresource: None,
        });
    }
    if def.namespaced {
        let all = |verb: &str, path: String, action: Action| Operation {
            id: format!("{verb}{gv}{kind}{}ForAllNamespaces", if action == Action::WatchList { "List" } else { "" }),
            method: Method::GET,
            path,
            action,
            resource: Some(def),
            subresource: None,
        };
        if def.supports(Verb::List) {
            ops.push(all("list", format!("{prefix}/{}", def.plural), Action::List));
        }
        if def.supports(Verb::Watch) {
            ops.push(all("watch", format!("{prefix}/watch/{}", def.plural), Action::WatchList));
        }
    }

    for &sub in def.subresources {
        let path = format!("{item}/{}", sub.name());
        let mut push = |verb: &str, method: Method, path: String, action: Action, suffix: &str| {
            ops.push(Operation {
                id: format!("{verb}{gv}{scope}{kind}{}{suffix}", capitalize(sub.name())),
                method,
                path,
                action,
                resource: Some(def),
                subresource: Some(sub),
            });
        };
        match sub {
            Subresource::Status
            | Subresource::Scale
            | Subresource::EphemeralContainers
            | Subresource::Resize
            | Subresource::Approval => {
                push("read", Method::GET, path.clone(), Action::Read, "");
                push("replace", Method::PUT, path.clone(), Action::Replace, "");
                push("patch", Method::PATCH, path, Action::Patch, "");
            }
            Subresource::Binding | Subresource::Eviction | Subresource::Token => {
                push("create", Method::POST, path, Action::Create, "")
            }
            Subresource::Finalize => push("replace", Method::PUT, path, Action::Replace, ""),
            Subresource::Log => push("read", Method::GET, path, Action::Read, ""),
            Subresource::Exec | Subresource::Attach | Subresource::Portforward => {
                // connect ids put the method between the version and the scope
                for method in [Method::GET, Method::POST] {
                    ops.push(connect(def, &gv, scope, &method, sub, path.clone(), ""));
                }
            }
            Subresource::Proxy => {
                for method in PROXY_METHODS {
                    ops.push(connect(def, &gv, scope, &method, sub, path.clone(), ""));
                    ops.push(connect(def, &gv, scope, &method, sub, format!("{path}/{{path}}"), "WithPath"));
                }
            }
        }
    }
}

const PROXY_METHODS: [Method; 7] = [
    Method::DELETE,
    Method::GET,
    Method::HEAD,
    Method::OPTIONS,
    Method::PATCH,
    Method::POST,
    Method::PUT,
];

fn connect(
    def: &'static ResourceDef,
    gv: &str,
    scope: &str,
    method: &Method,
    sub: Subresource,
    path: String,
    suffix: &str,
) -> Operation {
    let verb = capitalize(&method.as_str().to_ascii_lowercase());
    Operation {
        id: format!("connect{gv}{verb}{scope}{}{}{suffix}", def.kind, capitalize(sub.name())),
        method: method.clone(),
        path,
        action: Action::Connect,
        resource: Some(def),
        subresource: Some(sub),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn op(id: &str) -> &'static Operation {
        Catalog::global()
            .get(id)
            .unwrap_or_else(|| panic!("missing operation {id}"))
    }

    fn assert_op(id: &str, method: Method, path: &str) {
        let o = op(id);
        assert_eq!(o.method, method, "{id}");
        assert_eq!(o.path, path, "{id}");
    }

    #[test]
    fn operation_ids_are_unique() {
        let mut seen = HashSet::new();
        for o in Catalog::global().iter() {
            assert!(seen.insert(&o.id), "duplicate {}", o.id);
        }
        assert_eq!(seen.len(), Catalog::global().len());
    }

    #[test]
    fn templates_only_use_known_placeholders() {
        for o in Catalog::global().iter() {
            for p in o.parameters() {
                assert!(matches!(p, "namespace" | "name" | "path"), "{}: {p}", o.id);
            }
        }
    }

    #[test]
    fn namespaced_paths_carry_the_namespace() {
        for o in Catalog::global().iter() {
            let Some(def) = o.resource else { continue };
            if def.namespaced && !o.is_all_namespaces() {
                assert!(o.path.contains("/namespaces/{namespace}/"), "{}", o.id);
            }
            if !def.namespaced {
                assert!(!o.path.contains("{namespace}"), "{}", o.id);
            }
        }
    }

    #[test]
    fn core_pod_operations() {
        assert_op("listCoreV1NamespacedPod", Method::GET, "/api/v1/namespaces/{namespace}/pods");
        assert_op("createCoreV1NamespacedPod", Method::POST, "/api/v1/namespaces/{namespace}/pods");
        assert_op("readCoreV1NamespacedPod", Method::GET, "/api/v1/namespaces/{namespace}/pods/{name}");
        assert_op("replaceCoreV1NamespacedPod", Method::PUT, "/api/v1/namespaces/{namespace}/pods/{name}");
        assert_op("patchCoreV1NamespacedPod", Method::PATCH, "/api/v1/namespaces/{namespace}/pods/{name}");
        assert_op("deleteCoreV1NamespacedPod", Method::DELETE, "/api/v1/namespaces/{namespace}/pods/{name}");
        assert_op("deleteCoreV1CollectionNamespacedPod", Method::DELETE, "/api/v1/namespaces/{namespace}/pods");
        assert_op("listCoreV1PodForAllNamespaces", Method::GET, "/api/v1/pods");
        assert_op("watchCoreV1PodListForAllNamespaces", Method::GET, "/api/v1/watch/pods");
        assert_op("watchCoreV1NamespacedPod", Method::GET, "/api/v1/watch/namespaces/{namespace}/pods/{name}");
        assert_op("watchCoreV1NamespacedPodList", Method::GET, "/api/v1/watch/namespaces/{namespace}/pods");
        assert_op("readCoreV1NamespacedPodLog", Method::GET, "/api/v1/namespaces/{namespace}/pods/{name}/log");
        assert_op(
            "readCoreV1NamespacedPodEphemeralcontainers",
            Method::GET,
            "/api/v1/namespaces/{namespace}/pods/{name}/ephemeralcontainers",
        );
        assert_op(
            "createCoreV1NamespacedPodEviction",
            Method::POST,
            "/api/v1/namespaces/{namespace}/pods/{name}/eviction",
        );
        assert_op(
            "connectCoreV1PostNamespacedPodExec",
            Method::POST,
            "/api/v1/namespaces/{namespace}/pods/{name}/exec",
        );
        assert_op(
            "connectCoreV1GetNamespacedPodPortforward",
            Method::GET,
            "/api/v1/namespaces/{namespace}/pods/{name}/portforward",
        );
        assert_op(
            "connectCoreV1HeadNamespacedPodProxyWithPath",
            Method::HEAD,
            "/api/v1/namespaces/{namespace}/pods/{name}/proxy/{path}",
        );
    }

    #[test]
    fn core_cluster_scoped_operations() {
        assert_op("listCoreV1Node", Method::GET, "/api/v1/nodes");
        assert_op("deleteCoreV1CollectionNode", Method::DELETE, "/api/v1/nodes");
        assert_op("watchCoreV1NodeList", Method::GET, "/api/v1/watch/nodes");
        assert_op("connectCoreV1OptionsNodeProxy", Method::OPTIONS, "/api/v1/nodes/{name}/proxy");
        assert_op("replaceCoreV1NamespaceFinalize", Method::PUT, "/api/v1/namespaces/{name}/finalize");
        assert_op("readCoreV1NamespaceStatus", Method::GET, "/api/v1/namespaces/{name}/status");
        assert_op("readCoreV1ComponentStatus", Method::GET, "/api/v1/componentstatuses/{name}");
        assert!(Catalog::global().get("deleteCoreV1CollectionNamespace").is_none());
        assert!(Catalog::global().get("createCoreV1ComponentStatus").is_none());
        assert_op("createCoreV1NamespacedBinding", Method::POST, "/api/v1/namespaces/{namespace}/bindings");
        assert_op(
            "createCoreV1NamespacedServiceAccountToken",
            Method::POST,
            "/api/v1/namespaces/{namespace}/serviceaccounts/{name}/token",
        );
    }

    #[test]
    fn named_group_operations() {
        assert_op(
            "readAppsV1NamespacedDeploymentScale",
            Method::GET,
            "/apis/apps/v1/namespaces/{namespace}/deployments/{name}/scale",
        );
        assert_op("watchAppsV1DeploymentListForAllNamespaces", Method::GET, "/apis/apps/v1/watch/deployments");
        assert_op(
            "patchAutoscalingV2NamespacedHorizontalPodAutoscalerStatus",
            Method::PATCH,
            "/apis/autoscaling/v2/namespaces/{namespace}/horizontalpodautoscalers/{name}/status",
        );
        assert_op(
            "deleteRbacAuthorizationV1CollectionClusterRole",
            Method::DELETE,
            "/apis/rbac.authorization.k8s.io/v1/clusterroles",
        );
        assert_op(
            "replaceCertificatesV1CertificateSigningRequestApproval",
            Method::PUT,
            "/apis/certificates.k8s.io/v1/certificatesigningrequests/{name}/approval",
        );
        assert_op(
            "createAuthorizationV1NamespacedLocalSubjectAccessReview",
            Method::POST,
            "/apis/authorization.k8s.io/v1/namespaces/{namespace}/localsubjectaccessreviews",
        );
        assert_op(
            "createAuthenticationV1TokenReview",
            Method::POST,
            "/apis/authentication.k8s.io/v1/tokenreviews",
        );
        assert_op(
            "listFlowcontrolApiserverV1FlowSchema",
            Method::GET,
            "/apis/flowcontrol.apiserver.k8s.io/v1/flowschemas",
        );
        assert_op(
            "readApiextensionsV1CustomResourceDefinitionStatus",
            Method::GET,
            "/apis/apiextensions.k8s.io/v1/customresourcedefinitions/{name}/status",
        );
        assert_op(
            "listStorageV1CSIStorageCapacityForAllNamespaces",
            Method::GET,
            "/apis/storage.k8s.io/v1/csistoragecapacities",
        );
        assert_op(
            "createPolicyV1NamespacedPodDisruptionBudget",
            Method::POST,
            "/apis/policy/v1/namespaces/{namespace}/poddisruptionbudgets",
        );
        assert!(Catalog::global().get("listAuthenticationV1TokenReview").is_none());
    }

    #[test]
    fn remaining_group_operations() {
        assert_op(
            "listAdmissionregistrationV1ValidatingWebhookConfiguration",
            Method::GET,
            "/apis/admissionregistration.k8s.io/v1/validatingwebhookconfigurations",
        );
        assert_op(
            "readApiregistrationV1APIServiceStatus",
            Method::GET,
            "/apis/apiregistration.k8s.io/v1/apiservices/{name}/status",
        );
        assert_op(
            "readAutoscalingV1NamespacedHorizontalPodAutoscaler",
            Method::GET,
            "/apis/autoscaling/v1/namespaces/{namespace}/horizontalpodautoscalers/{name}",
        );
        assert_op(
            "replaceCoordinationV1NamespacedLease",
            Method::PUT,
            "/apis/coordination.k8s.io/v1/namespaces/{namespace}/leases/{name}",
        );
        assert_op(
            "listDiscoveryV1EndpointSliceForAllNamespaces",
            Method::GET,
            "/apis/discovery.k8s.io/v1/endpointslices",
        );
        assert_op(
            "createEventsV1NamespacedEvent",
            Method::POST,
            "/apis/events.k8s.io/v1/namespaces/{namespace}/events",
        );
        assert_op(
            "patchNetworkingV1NamespacedIngressStatus",
            Method::PATCH,
            "/apis/networking.k8s.io/v1/namespaces/{namespace}/ingresses/{name}/status",
        );
        assert_op("deleteNodeV1RuntimeClass", Method::DELETE, "/apis/node.k8s.io/v1/runtimeclasses/{name}");
        assert_op(
            "readSchedulingV1PriorityClass",
            Method::GET,
            "/apis/scheduling.k8s.io/v1/priorityclasses/{name}",
        );
    }

    #[test]
    fn subresource_and_watch_rules() {
        assert_op(
            "patchCoreV1NamespacedPodResize",
            Method::PATCH,
            "/api/v1/namespaces/{namespace}/pods/{name}/resize",
        );
        assert_op("watchCoreV1Node", Method::GET, "/api/v1/watch/nodes/{name}");
        assert_eq!(op("watchCoreV1Node").action, Action::Watch);
        assert_eq!(op("watchCoreV1NodeList").action, Action::WatchList);
        assert!(Catalog::global().get("createCoreV1NamespacedPodResize").is_none());
    }

    #[test]
    fn every_group_has_a_group_document() {
        for (ident, group) in [
            ("Admissionregistration", "admissionregistration.k8s.io"),
            ("Apiregistration", "apiregistration.k8s.io"),
            ("Autoscaling", "autoscaling"),
            ("Coordination", "coordination.k8s.io"),
            ("Discovery", "discovery.k8s.io"),
            ("Events", "events.k8s.io"),
            ("Networking", "networking.k8s.io"),
            ("Node", "node.k8s.io"),
            ("Scheduling", "scheduling.k8s.io"),
        ] {
            assert_op(&format!("get{ident}APIGroup"), Method::GET, &format!("/apis/{group}/"));
        }
    }

    #[test]
    fn discovery_operations_are_catalogued() {
        assert_op("getCodeVersion", Method::GET, "/version/");
        assert_op("getAPIVersions", Method::GET, "/apis/");
        assert_op("getCoreAPIVersions", Method::GET, "/api/");
        assert_op("getCoreV1APIResources", Method::GET, "/api/v1/");
        assert_op("getAppsAPIGroup", Method::GET, "/apis/apps/");
        assert_op("getAutoscalingV2APIResources", Method::GET, "/apis/autoscaling/v2/");
        assert_op("getRbacAuthorizationV1APIResources", Method::GET, "/apis/rbac.authorization.k8s.io/v1/");
        assert_op("getServiceAccountIssuerOpenIDKeyset", Method::GET, "/openid/v1/jwks/");
        assert_eq!(op("getCodeVersion").action, Action::Discovery);
        assert!(op("getCodeVersion").gvr().is_none());
    }

    #[test]
    fn url_interpolation() {
        let o = op("readCoreV1NamespacedConfigMap");
        let url = o.url(&PathArgs::new().namespace("kube-system").name("a b")).unwrap();
        assert_eq!(url, "/api/v1/namespaces/kube-system/configmaps/a%20b");

        let err = o.url(&PathArgs::new().namespace("kube-system")).unwrap_err();
        assert!(matches!(err, Error::MissingPathParameter { ref parameter, .. } if parameter == "name"));
        let err = o.url(&PathArgs::new().namespace("").name("x")).unwrap_err();
        assert!(matches!(err, Error::MissingPathParameter { ref parameter, .. } if parameter == "namespace"));

        let o = op("connectCoreV1GetNamespacedServiceProxyWithPath");
        let url = o
            .url(&PathArgs::new().namespace("ns").name("web:80").path("/metrics/cadvisor"))
            .unwrap();
        assert_eq!(url, "/api/v1/namespaces/ns/services/web%3A80/proxy/metrics/cadvisor");
        assert_eq!(op("getCodeVersion").url(&PathArgs::new()).unwrap(), "/version/");
    }

    #[test]
    fn dot_segments_never_reach_the_path() {
        let pod = op("readCoreV1NamespacedPod");
        for name in [".", ".."] {
            let err = pod.url(&PathArgs::new().namespace("ns").name(name)).unwrap_err();
            assert!(matches!(err, Error::Request(crate::request::Error::Validation(_))), "{name}");
        }
        assert!(pod.url(&PathArgs::new().namespace("..").name("p")).is_err());
        assert!(pod.url(&PathArgs::new().namespace("ns").name("..p")).is_ok());

        let proxy = op("connectCoreV1GetNamespacedServiceProxyWithPath");
        for path in ["../../secrets/s", "a/./b", "a/.."] {
            let args = PathArgs::new().namespace("ns").name("web").path(path);
            assert!(proxy.url(&args).is_err(), "{path}");
        }
    }

    #[test]
    fn resolved_values_are_decoded() {
        let path = "/api/v1/namespaces/ns/services/web%3A80/proxy/a%20b/c";
        let (o, args) = Catalog::global().resolve(&Method::GET, path).unwrap();
        assert_eq!(o.id, "connectCoreV1GetNamespacedServiceProxyWithPath");
        assert_eq!(args.name.as_deref(), Some("web:80"));
        assert_eq!(args.path.as_deref(), Some("a b/c"));
        assert_eq!(o.url(&args).unwrap(), path);

        let (_, args) = Catalog::global()
            .resolve(&Method::GET, "/api/v1/namespaces/ns/configmaps/a%20b")
            .unwrap();
        assert_eq!(args.name.as_deref(), Some("a b"));
    }

    #[test]
    fn requests_from_operations() {
        let args = PathArgs::new().namespace("ns");
        let req = op("listCoreV1NamespacedPod")
            .request(&args, &[("labelSelector", "app=web")], vec![])
            .unwrap();
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.uri(), "/api/v1/namespaces/ns/pods?labelSelector=app%3Dweb");

        let req = op("createCoreV1NamespacedPod")
            .request(&args, &crate::params::PostParams::default(), b"{}".to_vec())
            .unwrap();
        assert_eq!(req.uri(), "/api/v1/namespaces/ns/pods");
        assert_eq!(req.headers().get("content-type").unwrap(), "application/json");

        let patch = crate::params::Patch::Merge(serde_json::json!({"metadata": {"labels": {"a": "b"}}}));
        let pp = crate::params::PatchParams::default();
        let req = op("patchCoreV1NamespacedPod")
            .patch_request(&args.clone().name("p"), &pp, &patch)
            .unwrap();
        assert_eq!(req.uri(), "/api/v1/namespaces/ns/pods/p");
        assert_eq!(req.headers().get("content-type").unwrap(), "application/merge-patch+json");

        assert!(matches!(
            op("readCoreV1NamespacedPod").patch_request(&args.clone().name("p"), &pp, &patch),
            Err(Error::MethodMismatch { .. })
        ));
        assert!(matches!(
            op("patchCoreV1NamespacedPod").request(&args.clone().name("p"), &(), b"{}".to_vec()),
            Err(Error::MethodMismatch { .. })
        ));
        assert!(op("connectCoreV1PatchNamespacedPodProxy")
            .request(&args.name("p"), &(), b"{}".to_vec())
            .is_ok());
    }

    #[test]
    fn resolve_concrete_paths() {
        let catalog = Catalog::global();
        let (o, args) = catalog
            .resolve(&Method::GET, "/api/v1/namespaces/default/pods/blog?pretty=true")
            .unwrap();
        assert_eq!(o.id, "readCoreV1NamespacedPod");
        assert_eq!(args, PathArgs::new().namespace("default").name("blog"));

        let (o, _) = catalog.resolve(&Method::GET, "/api/v1/namespaces/default").unwrap();
        assert_eq!(o.id, "readCoreV1Namespace");

        let (o, _) = catalog.resolve(&Method::GET, "/api/v1/namespaces/default/pods").unwrap();
        assert_eq!(o.id, "listCoreV1NamespacedPod");

        let (o, args) = catalog
            .resolve(&Method::POST, "/api/v1/nodes/n1/proxy/logs/kubelet.log")
            .unwrap();
        assert_eq!(o.id, "connectCoreV1PostNodeProxyWithPath");
        assert_eq!(args.path.as_deref(), Some("logs/kubelet.log"));

        let (o, _) = catalog.resolve(&Method::GET, "/apis/apps/v1").unwrap();
        assert_eq!(o.id, "getAppsV1APIResources");

        assert!(matches!(
            catalog.resolve(&Method::PUT, "/api/v1/pods"),
            Err(Error::UnknownOperation(_))
        ));
    }

    #[test]
    fn resource_operations_are_grouped() {
        let ops = Catalog::global().for_resource("batch", "v1", "jobs");
        assert!(ops.iter().all(|o| o.resource.map(|r| r.kind) == Some("Job")));
        let ids = ops.iter().map(|o| o.id.as_str()).collect::<HashSet<_>>();
        for id in [
            "listBatchV1NamespacedJob",
            "listBatchV1JobForAllNamespaces",
            "readBatchV1NamespacedJobStatus",
            "deleteBatchV1CollectionNamespacedJob",
            "watchBatchV1NamespacedJobList",
        ] {
            assert!(ids.contains(id), "{id}");
        }
        assert_eq!(Catalog::global().operation("nope").unwrap_err().to_string(), "unknown operation: nope");
    }
}
