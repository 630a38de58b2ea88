//! Client and typed API surface for the Kubernetes REST API
//!
//! This crate is re-exported from `kubeapi` and is normally used through it.
//!
//! - [`Client`] sends requests over the `kube-client` transport and decodes the
//!   answers. Every catalogue operation is reachable by id through [`Client::call`]
//!   and its siblings.
//! - [`Api`] binds a [`Client`] to one resource collection and exposes typed verbs.
//! - [`Config`] locates the cluster and its credentials, from a kubeconfig or the
//!   in-cluster environment.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod client;
pub mod error;

/// Cluster location and credentials
///
/// Loading is done by `kube-client`; [`Config::infer`] tries the local
/// kubeconfig first and the in-cluster service account second.
pub mod config {
    pub use kube_client::config::{
        Config, InClusterError, InferConfigError, KubeConfigOptions, Kubeconfig, KubeconfigError,
    };
}

#[doc(inline)]
pub use api::Api;
#[doc(inline)]
pub use client::Client;
#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use error::Error;

/// Convenient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub use kubeapi_core as core;
pub use kubeapi_core::{Resource, ResourceExt};
