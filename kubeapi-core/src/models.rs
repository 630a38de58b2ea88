//! Every object schema of the API, by group
//!
//! The types are generated by `k8s-openapi`; the binary picks the Kubernetes
//! version through one of its feature flags.
//!
//! ```
//! use kubeapi_core::{models::api::core::v1::Pod, Resource};
//! assert_eq!(Pod::url_path(Some("default")), "/api/v1/namespaces/default/pods");
//! ```
pub use k8s_openapi::{api, apiextensions_apiserver, apimachinery, kube_aggregator, ByteString};

pub use crate::{
    object::{ListMeta, ObjectList, ObjectMeta, TypeMeta},
    response::{ErrorResponse, Status, StatusCause, StatusDetails, StatusSummary},
    watch::{Bookmark, BookmarkMeta, WatchEvent},
};
