//! Types for talking to the Kubernetes REST API without a client
//!
//! This crate holds the typed object catalogue, the query parameter families of
//! the API, a URL and verb builder for resource collections, and the catalogue of
//! every REST operation of the built-in API groups.
//! Everything here is re-exported from `kubeapi` under `kubeapi::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub use catalog::{Catalog, Operation, PathArgs};

pub mod gvk;
pub use gvk::{GroupVersion, GroupVersionKind, GroupVersionResource};

pub mod models;

pub mod object;
pub use object::{ObjectList, TypeMeta};

pub mod params;

pub mod request;
pub use request::Request;

mod resource;
pub use resource::{ClusterResourceScope, NamespaceResourceScope, Resource, ResourceExt, ResourceScope};

pub mod response;
pub use response::{ErrorResponse, Status};

pub mod subresource;

pub mod watch;
pub use watch::WatchEvent;
