//! The static table of built-in resources served by a Kubernetes apiserver
use crate::gvk::GroupVersionResource;

/// A REST verb a resource collection supports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `POST` on the collection
    Create,
    /// `GET` on an item
    Read,
    /// `PUT` on an item
    Replace,
    /// `PATCH` on an item
    Patch,
    /// `DELETE` on an item
    Delete,
    /// `DELETE` on the collection
    DeleteCollection,
    /// `GET` on the collection
    List,
    /// `GET` on the collection with `watch=true`
    Watch,
}

/// Named subresources with their own endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subresource {
    /// `/status`
    Status,
    /// `/scale`
    Scale,
    /// `/ephemeralcontainers`
    EphemeralContainers,
    /// `/resize`
    Resize,
    /// `/approval`
    Approval,
    /// `/binding`
    Binding,
    /// `/eviction`
    Eviction,
    /// `/token`
    Token,
    /// `/finalize`
    Finalize,
    /// `/log`
    Log,
    /// `/exec`
    Exec,
    /// `/attach`
    Attach,
    /// `/portforward`
    Portforward,
    /// `/proxy`
    Proxy,
}

impl Subresource {
    /// The path segment of the subresource
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Scale => "scale",
            Self::EphemeralContainers => "ephemeralcontainers",
            Self::Resize => "resize",
            Self::Approval => "approval",
            Self::Binding => "binding",
            Self::Eviction => "eviction",
            Self::Token => "token",
            Self::Finalize => "finalize",
            Self::Log => "log",
            Self::Exec => "exec",
            Self::Attach => "attach",
            Self::Portforward => "portforward",
            Self::Proxy => "proxy",
        }
    }
}

/// Static description of one built-in resource
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceDef {
    /// API group, empty for core
    pub group: &'static str,
    /// API version
    pub version: &'static str,
    /// Kind
    pub kind: &'static str,
    /// Plural used in URLs
    pub plural: &'static str,
    /// Whether objects live inside a namespace
    pub namespaced: bool,
    /// Verbs served on the main resource
    pub verbs: &'static [Verb],
    /// Subresources served below each item
    pub subresources: &'static [Subresource],
}

impl ResourceDef {
    /// The group, version and plural of this resource
    pub fn gvr(&self) -> GroupVersionResource {
        GroupVersionResource::new(self.group, self.version, self.plural)
    }

    /// Whether the verb is served on the main resource
    pub fn supports(&self, verb: Verb) -> bool {
        self.verbs.contains(&verb)
    }

    /// Whether the subresource is served
    pub fn has_subresource(&self, sub: Subresource) -> bool {
        self.subresources.contains(&sub)
    }
}

use Subresource::*;
use Verb::*;

const ALL: &[Verb] = &[Create, Read, Replace, Patch, Delete, DeleteCollection, List, Watch];
const NO_DELETE_COLLECTION: &[Verb] = &[Create, Read, Replace, Patch, Delete, List, Watch];
const CREATE_ONLY: &[Verb] = &[Create];
const GET_LIST: &[Verb] = &[Read, List];

const fn ns(
    group: &'static str,
    version: &'static str,
    kind: &'static str,
    plural: &'static str,
    subresources: &'static [Subresource],
) -> ResourceDef {
    ResourceDef {
        group,
        version,
        kind,
        plural,
        namespaced: true,
        verbs: ALL,
        subresources,
    }
}

const fn cluster(
    group: &'static str,
    version: &'static str,
    kind: &'static str,
    plural: &'static str,
    subresources: &'static [Subresource],
) -> ResourceDef {
    ResourceDef {
        group,
        version,
        kind,
        plural,
        namespaced: false,
        verbs: ALL,
        subresources,
    }
}

const fn with_verbs(def: ResourceDef, verbs: &'static [Verb]) -> ResourceDef {
    ResourceDef { verbs, ..def }
}

const ADMISSION: &str = "admissionregistration.k8s.io";
const AUTHN: &str = "authentication.k8s.io";
const AUTHZ: &str = "authorization.k8s.io";
const FLOWCONTROL: &str = "flowcontrol.apiserver.k8s.io";
const NETWORKING: &str = "networking.k8s.io";
const RBAC: &str = "rbac.authorization.k8s.io";
const STORAGE: &str = "storage.k8s.io";

/// Every resource of the core group and the GA API groups
pub static RESOURCES: &[ResourceDef] = &[
    // core/v1
    with_verbs(ns("", "v1", "Binding", "bindings", &[]), CREATE_ONLY),
    with_verbs(cluster("", "v1", "ComponentStatus", "componentstatuses", &[]), GET_LIST),
    ns("", "v1", "ConfigMap", "configmaps", &[]),
    ns("", "v1", "Endpoints", "endpoints", &[]),
    ns("", "v1", "Event", "events", &[]),
    ns("", "v1", "LimitRange", "limitranges", &[]),
    with_verbs(
        cluster("", "v1", "Namespace", "namespaces", &[Status, Finalize]),
        NO_DELETE_COLLECTION,
    ),
    cluster("", "v1", "Node", "nodes", &[Status, Proxy]),
    ns("", "v1", "PersistentVolumeClaim", "persistentvolumeclaims", &[Status]),
    cluster("", "v1", "PersistentVolume", "persistentvolumes", &[Status]),
    ns("", "v1", "Pod", "pods", &[
        Status,
        EphemeralContainers,
        Resize,
        Binding,
        Eviction,
        Log,
        Exec,
        Attach,
        Portforward,
        Proxy,
    ]),
    ns("", "v1", "PodTemplate", "podtemplates", &[]),
    ns("", "v1", "ReplicationController", "replicationcontrollers", &[Status, Scale]),
    ns("", "v1", "ResourceQuota", "resourcequotas", &[Status]),
    ns("", "v1", "Secret", "secrets", &[]),
    ns("", "v1", "ServiceAccount", "serviceaccounts", &[Token]),
    ns("", "v1", "Service", "services", &[Status, Proxy]),
    // admissionregistration.k8s.io/v1
    cluster(ADMISSION, "v1", "MutatingWebhookConfiguration", "mutatingwebhookconfigurations", &[]),
    cluster(ADMISSION, "v1", "ValidatingAdmissionPolicy", "validatingadmissionpolicies", &[Status]),
    cluster(ADMISSION, "v1", "ValidatingAdmissionPolicyBinding", "validatingadmissionpolicybindings", &[]),
    cluster(ADMISSION, "v1", "ValidatingWebhookConfiguration", "validatingwebhookconfigurations", &[]),
    // apiextensions.k8s.io/v1
    cluster("apiextensions.k8s.io", "v1", "CustomResourceDefinition", "customresourcedefinitions", &[Status]),
    // apiregistration.k8s.io/v1
    cluster("apiregistration.k8s.io", "v1", "APIService", "apiservices", &[Status]),
    // apps/v1
    ns("apps", "v1", "ControllerRevision", "controllerrevisions", &[]),
    ns("apps", "v1", "DaemonSet", "daemonsets", &[Status]),
    ns("apps", "v1", "Deployment", "deployments", &[Status, Scale]),
    ns("apps", "v1", "ReplicaSet", "replicasets", &[Status, Scale]),
    ns("apps", "v1", "StatefulSet", "statefulsets", &[Status, Scale]),
    // authentication.k8s.io/v1
    with_verbs(cluster(AUTHN, "v1", "SelfSubjectReview", "selfsubjectreviews", &[]), CREATE_ONLY),
    with_verbs(cluster(AUTHN, "v1", "TokenReview", "tokenreviews", &[]), CREATE_ONLY),
    // authorization.k8s.io/v1
    with_verbs(ns(AUTHZ, "v1", "LocalSubjectAccessReview", "localsubjectaccessreviews", &[]), CREATE_ONLY),
    with_verbs(cluster(AUTHZ, "v1", "SelfSubjectAccessReview", "selfsubjectaccessreviews", &[]), CREATE_ONLY),
    with_verbs(cluster(AUTHZ, "v1", "SelfSubjectRulesReview", "selfsubjectrulesreviews", &[]), CREATE_ONLY),
    with_verbs(cluster(AUTHZ, "v1", "SubjectAccessReview", "subjectaccessreviews", &[]), CREATE_ONLY),
    // autoscaling/v1 and autoscaling/v2
    ns("autoscaling", "v1", "HorizontalPodAutoscaler", "horizontalpodautoscalers", &[Status]),
    ns("autoscaling", "v2", "HorizontalPodAutoscaler", "horizontalpodautoscalers", &[Status]),
    // batch/v1
    ns("batch", "v1", "CronJob", "cronjobs", &[Status]),
    ns("batch", "v1", "Job", "jobs", &[Status]),
    // certificates.k8s.io/v1
    cluster("certificates.k8s.io", "v1", "CertificateSigningRequest", "certificatesigningrequests", &[
        Status, Approval,
    ]),
    // coordination.k8s.io/v1
    ns("coordination.k8s.io", "v1", "Lease", "leases", &[]),
    // discovery.k8s.io/v1
    ns("discovery.k8s.io", "v1", "EndpointSlice", "endpointslices", &[]),
    // events.k8s.io/v1
    ns("events.k8s.io", "v1", "Event", "events", &[]),
    // flowcontrol.apiserver.k8s.io/v1
    cluster(FLOWCONTROL, "v1", "FlowSchema", "flowschemas", &[Status]),
    cluster(FLOWCONTROL, "v1", "PriorityLevelConfiguration", "prioritylevelconfigurations", &[Status]),
    // networking.k8s.io/v1
    cluster(NETWORKING, "v1", "IPAddress", "ipaddresses", &[]),
    cluster(NETWORKING, "v1", "IngressClass", "ingressclasses", &[]),
    ns(NETWORKING, "v1", "Ingress", "ingresses", &[Status]),
    ns(NETWORKING, "v1", "NetworkPolicy", "networkpolicies", &[]),
    cluster(NETWORKING, "v1", "ServiceCIDR", "servicecidrs", &[Status]),
    // node.k8s.io/v1
    cluster("node.k8s.io", "v1", "RuntimeClass", "runtimeclasses", &[]),
    // policy/v1
    ns("policy", "v1", "PodDisruptionBudget", "poddisruptionbudgets", &[Status]),
    // rbac.authorization.k8s.io/v1
    cluster(RBAC, "v1", "ClusterRoleBinding", "clusterrolebindings", &[]),
    cluster(RBAC, "v1", "ClusterRole", "clusterroles", &[]),
    ns(RBAC, "v1", "RoleBinding", "rolebindings", &[]),
    ns(RBAC, "v1", "Role", "roles", &[]),
    // scheduling.k8s.io/v1
    cluster("scheduling.k8s.io", "v1", "PriorityClass", "priorityclasses", &[]),
    // storage.k8s.io/v1
    cluster(STORAGE, "v1", "CSIDriver", "csidrivers", &[]),
    cluster(STORAGE, "v1", "CSINode", "csinodes", &[]),
    ns(STORAGE, "v1", "CSIStorageCapacity", "csistoragecapacities", &[]),
    cluster(STORAGE, "v1", "StorageClass", "storageclasses", &[]),
    cluster(STORAGE, "v1", "VolumeAttachment", "volumeattachments", &[Status]),
];

/// Find the table entry for a group, version and plural
pub fn find(group: &str, version: &str, plural: &str) -> Option<&'static ResourceDef> {
    RESOURCES
        .iter()
        .find(|r| r.group == group && r.version == version && r.plural == plural)
}
