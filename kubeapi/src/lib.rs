//! Kubeapi is an umbrella crate for talking to the [Kubernetes](http://kubernetes.io) REST API in Rust.
//!
//! # Overview
//!
//! The main modules are:
//!
//! - [`models`](crate::models) with the typed object catalogue of every API group
//! - [`core`](crate::core) with the request parameters, the URL builder and the operation catalogue
//! - [`client`](crate::client) with the Kubernetes [`Client`](crate::Client)
//! - [`config`](crate::config) for cluster [`Config`](crate::Config)
//! - [`api`](crate::api) with the generic typed [`Api`](crate::Api)
//!
//! # Using the typed Api
//! ```no_run
//! use kubeapi::{Client, api::{Api, ListParams, ResourceExt}};
//! use kubeapi::models::api::core::v1::Pod;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Infer the runtime environment and try to create a Kubernetes Client
//!     let client = Client::try_default().await?;
//!
//!     let pods: Api<Pod> = Api::default_namespaced(client);
//!     for p in pods.list(&ListParams::default()).await? {
//!         println!("found pod {}", p.name_any());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Calling an operation by id
//!
//! Every REST endpoint of the built-in API groups is in the operation catalogue,
//! addressed by its upstream `operationId`:
//!
//! ```no_run
//! use kubeapi::{Client, core::{PathArgs, params::ListParams}};
//! use kubeapi::models::{api::apps::v1::Deployment, ObjectList};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::try_default().await?;
//!     let args = PathArgs::new().namespace("kube-system");
//!     let deploys: ObjectList<Deployment> = client
//!         .call("listAppsV1NamespacedDeployment", &args, &ListParams::default(), vec![])
//!         .await?;
//!     println!("{} deployments", deploys.items.len());
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

macro_rules! cfg_client {
    ($($item:item)*) => {
        $(
            #[cfg_attr(docsrs, doc(cfg(feature = "client")))]
            #[cfg(feature = "client")]
            $item
        )*
    }
}

cfg_client! {
    pub use kubeapi_client::api;
    pub use kubeapi_client::client;
    pub use kubeapi_client::config;
    pub use kubeapi_client::error;

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
}

pub use crate::core::{Resource, ResourceExt};
/// Re-exports from [`kubeapi_core`]
#[doc(inline)]
pub use kubeapi_core as core;
/// The typed object catalogue
pub use kubeapi_core::models;
