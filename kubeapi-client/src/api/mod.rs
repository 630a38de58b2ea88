//! Typed access to one resource collection
mod core_methods;
mod subresource;

use std::{fmt, marker::PhantomData};

use bytes::Bytes;
use either::Either;
use futures::Stream;
use serde::{de::DeserializeOwned, Serialize};

pub use subresource::{
    Approve, Attach, Bind, EphemeralContainers, Evict, Execute, Finalize, Log, Portforward, Proxy, Token,
};

pub use kubeapi_core::{
    gvk::{GroupVersionKind, GroupVersionResource},
    object::{ListMeta, ObjectList, ObjectMeta, TypeMeta},
    params::{
        DeleteParams, GetParams, ListParams, Patch, PatchParams, PostParams, Preconditions, PropagationPolicy,
        ValidationDirective, VersionMatch, WatchParams,
    },
    request::Request,
    response::Status,
    subresource::{AttachParams, EvictParams, LogParams, Scale, ScaleSpec, ScaleStatus},
    watch::WatchEvent,
    Resource, ResourceExt,
};
use kubeapi_core::{catalog::Catalog, request, NamespaceResourceScope};

use crate::{client::OperationId, Client, Error, Result};

/// A [`Client`] bound to the collection of `K`, in one namespace or across all
///
/// Anything without a typed method here is reachable by operation id through
/// [`Client::call`].
pub struct Api<K> {
    request: Request,
    client: Client,
    namespace: Option<String>,
    kind: PhantomData<fn() -> K>,
}

impl<K: Resource> Api<K> {
    fn at(client: Client, namespace: Option<&str>) -> Self {
        Api {
            request: Request::new(K::url_path(namespace)),
            client,
            namespace: namespace.map(String::from),
            kind: PhantomData,
        }
    }

    /// Cluster scoped resources, or namespaced ones across every namespace
    ///
    /// ```no_run
    /// # fn doc(client: kubeapi_client::Client) {
    /// use k8s_openapi::api::core::v1::{Node, Pod};
    /// use kubeapi_client::Api;
    /// let nodes: Api<Node> = Api::all(client.clone());
    /// let every_pod: Api<Pod> = Api::all(client);
    /// # }
    /// ```
    pub fn all(client: Client) -> Self {
        Self::at(client, None)
    }

    /// Namespaced resources in `ns`
    ///
    /// Cluster scoped kinds are rejected at compile time:
    ///
    /// ```compile_fail
    /// # fn doc(client: kubeapi_client::Client) {
    /// use k8s_openapi::api::core::v1::Node;
    /// let nodes: kubeapi_client::Api<Node> = kubeapi_client::Api::namespaced(client, "default");
    /// # }
    /// ```
    pub fn namespaced(client: Client, ns: &str) -> Self
    where
        K: Resource<Scope = NamespaceResourceScope>,
    {
        Self::at(client, Some(ns))
    }

    /// Namespaced resources in the client's default namespace
    pub fn default_namespaced(client: Client) -> Self
    where
        K: Resource<Scope = NamespaceResourceScope>,
    {
        let ns = client.default_namespace().to_owned();
        Self::at(client, Some(&ns))
    }
}

impl<K> Api<K> {
    /// Path of the collection
    pub fn resource_url(&self) -> &str {
        &self.request.url_path
    }

    /// Bound namespace; `None` for cluster wide access
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Give back the client
    pub fn into_client(self) -> Client {
        self.client
    }

    fn prepare(&self, built: Result<http::Request<Vec<u8>>, request::Error>) -> Result<http::Request<Vec<u8>>> {
        let req = built?;
        let id = Catalog::global()
            .resolve(req.method(), req.uri().path())
            .ok()
            .map(|(op, _)| op.id.as_str());
        tracing::debug!(operation = id, uri = %req.uri());
        Ok(match id {
            Some(id) => OperationId(id).tag(req),
            None => req,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, built: Result<http::Request<Vec<u8>>, request::Error>) -> Result<T> {
        self.client.request(self.prepare(built)?).await
    }

    async fn fetch_status<T: DeserializeOwned>(
        &self,
        built: Result<http::Request<Vec<u8>>, request::Error>,
    ) -> Result<Either<T, Status>> {
        self.client.request_status(self.prepare(built)?).await
    }

    async fn fetch_text(&self, built: Result<http::Request<Vec<u8>>, request::Error>) -> Result<String> {
        self.client.request_text(self.prepare(built)?).await
    }

    async fn fetch_stream(
        &self,
        built: Result<http::Request<Vec<u8>>, request::Error>,
    ) -> Result<impl Stream<Item = Result<Bytes>>> {
        self.client.request_stream(self.prepare(built)?).await
    }

    async fn fetch_events<T: DeserializeOwned>(
        &self,
        built: Result<http::Request<Vec<u8>>, request::Error>,
    ) -> Result<impl Stream<Item = Result<WatchEvent<T>>>> {
        self.client.request_events(self.prepare(built)?).await
    }
}

fn to_json<T: Serialize>(data: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(data).map_err(Error::SerdeError)
}

impl<K> Clone for Api<K> {
    fn clone(&self) -> Self {
        Api {
            request: self.request.clone(),
            client: self.client.clone(),
            namespace: self.namespace.clone(),
            kind: PhantomData,
        }
    }
}

impl<K> From<Api<K>> for Client {
    fn from(api: Api<K>) -> Self {
        api.client
    }
}

impl<K> fmt::Debug for Api<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("url_path", &self.request.url_path)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{client::fake, Api};
    use k8s_openapi::api::{
        apps::v1::Deployment,
        core::v1::{ConfigMap, Node, PersistentVolume, Pod},
    };

    #[tokio::test]
    async fn scope_decides_the_url() {
        let client = fake::idle();
        let pods: Api<Pod> = Api::default_namespaced(client.clone());
        assert_eq!(pods.resource_url(), "/api/v1/namespaces/default/pods");
        assert_eq!(pods.namespace(), Some("default"));

        let cms: Api<ConfigMap> = Api::namespaced(client.clone(), "apps");
        assert_eq!(cms.resource_url(), "/api/v1/namespaces/apps/configmaps");

        let deploys: Api<Deployment> = Api::all(client.clone());
        assert_eq!(deploys.resource_url(), "/apis/apps/v1/deployments");
        assert_eq!(deploys.namespace(), None);

        let _: Api<Node> = Api::all(client.clone());
        let pvs: Api<PersistentVolume> = Api::all(client);
        assert!(format!("{pvs:?}").contains("/api/v1/persistentvolumes"));
    }
}
