use bytes::Bytes;
use either::Either;
use futures::Stream;
use http::Method;
use k8s_openapi::api::{
    authentication::v1::TokenRequest,
    certificates::v1::CertificateSigningRequest,
    core::v1::{Binding, Namespace, Node, Pod, Service, ServiceAccount},
};
use kubeapi_core::{
    params::{Patch, PatchParams, PostParams, QueryParams},
    response::Status,
    subresource::{AttachParams, EvictParams, LogParams, Scale},
};
use serde::{de::DeserializeOwned, Serialize};

use super::{to_json, Api};
use crate::Result;

/// `scale` and any other subresource by name
impl<K: DeserializeOwned> Api<K> {
    /// Read the `scale` of `name`
    pub async fn get_scale(&self, name: &str) -> Result<Scale> {
        self.fetch(self.request.get_subresource("scale", name)).await
    }

    /// Patch the `scale` of `name`
    pub async fn patch_scale<P: Serialize>(&self, name: &str, pp: &PatchParams, patch: &Patch<P>) -> Result<Scale> {
        self.fetch(self.request.patch_subresource("scale", name, pp, patch)).await
    }

    /// Replace the `scale` of `name` with a serialized `Scale`
    pub async fn replace_scale(&self, name: &str, pp: &PostParams, data: Vec<u8>) -> Result<Scale> {
        self.fetch(self.request.replace_subresource("scale", name, pp, data)).await
    }

    /// Read any subresource answered with a `K`
    pub async fn get_subresource(&self, subresource: &str, name: &str) -> Result<K> {
        self.fetch(self.request.get_subresource(subresource, name)).await
    }

    /// Post to a subresource, decoding the answer as `T`
    pub async fn create_subresource<T: DeserializeOwned>(
        &self,
        subresource: &str,
        name: &str,
        pp: &PostParams,
        data: Vec<u8>,
    ) -> Result<T> {
        self.fetch(self.request.create_subresource(subresource, name, pp, data)).await
    }

    /// Patch any subresource answered with a `K`
    pub async fn patch_subresource<P: Serialize>(
        &self,
        subresource: &str,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<K> {
        self.fetch(self.request.patch_subresource(subresource, name, pp, patch)).await
    }

    /// Replace any subresource answered with a `K`
    pub async fn replace_subresource(&self, subresource: &str, name: &str, pp: &PostParams, data: Vec<u8>) -> Result<K> {
        self.fetch(self.request.replace_subresource(subresource, name, pp, data)).await
    }

    /// Read `name` through its `status` subresource
    pub async fn get_status(&self, name: &str) -> Result<K> {
        self.get_subresource("status", name).await
    }

    /// Patch only the status of `name`
    pub async fn patch_status<P: Serialize>(&self, name: &str, pp: &PatchParams, patch: &Patch<P>) -> Result<K> {
        self.patch_subresource("status", name, pp, patch).await
    }

    /// Replace only the status of `name`
    pub async fn replace_status(&self, name: &str, pp: &PostParams, data: Vec<u8>) -> Result<K> {
        self.replace_subresource("status", name, pp, data).await
    }
}

/// Kinds with container logs
pub trait Log {}
impl Log for Pod {}

impl<K: Log> Api<K> {
    /// Logs of `name` as one string
    pub async fn logs(&self, name: &str, lp: &LogParams) -> Result<String> {
        self.fetch_text(self.request.logs(name, lp)).await
    }

    /// Logs of `name` as they arrive; set `follow` to keep the stream open
    pub async fn log_stream(&self, name: &str, lp: &LogParams) -> Result<impl Stream<Item = Result<Bytes>>> {
        self.fetch_stream(self.request.logs(name, lp)).await
    }
}

/// Kinds that can be evicted
pub trait Evict {}
impl Evict for Pod {}

impl<K: Evict> Api<K> {
    /// Evict `name`, honouring disruption budgets
    pub async fn evict(&self, name: &str, ep: &EvictParams) -> Result<Status> {
        self.fetch(self.request.evict(name, ep)).await
    }
}

/// Kinds that can be bound to a node
pub trait Bind {}
impl Bind for Pod {}

impl<K: Bind> Api<K> {
    /// Assign `name` to the node in `binding`
    pub async fn bind(&self, name: &str, pp: &PostParams, binding: &Binding) -> Result<Either<Binding, Status>> {
        let body = to_json(binding)?;
        self.fetch_status(self.request.create_subresource("binding", name, pp, body)).await
    }
}

/// Kinds that issue tokens
pub trait Token {}
impl Token for ServiceAccount {}

impl<K: Token> Api<K> {
    /// Issue a token for the service account `name`
    pub async fn create_token(&self, name: &str, pp: &PostParams, request: &TokenRequest) -> Result<TokenRequest> {
        let body = to_json(request)?;
        self.fetch(self.request.create_subresource("token", name, pp, body)).await
    }
}

/// Kinds with a `finalize` subresource
pub trait Finalize {}
impl Finalize for Namespace {}

impl<K: Finalize + DeserializeOwned + Serialize> Api<K> {
    /// Replace the finalizers of `name` with those in `data`
    pub async fn finalize(&self, name: &str, pp: &PostParams, data: &K) -> Result<K> {
        let body = to_json(data)?;
        self.fetch(self.request.replace_subresource("finalize", name, pp, body)).await
    }
}

/// Kinds with an `approval` subresource
pub trait Approve {}
impl Approve for CertificateSigningRequest {}

impl<K: Approve + DeserializeOwned> Api<K> {
    /// Read `name` through its `approval` subresource
    pub async fn get_approval(&self, name: &str) -> Result<K> {
        self.get_subresource("approval", name).await
    }

    /// Patch the approval conditions of `name`
    pub async fn patch_approval<P: Serialize>(&self, name: &str, pp: &PatchParams, patch: &Patch<P>) -> Result<K> {
        self.patch_subresource("approval", name, pp, patch).await
    }

    /// Replace the approval conditions of `name`
    pub async fn replace_approval(&self, name: &str, pp: &PostParams, data: Vec<u8>) -> Result<K> {
        self.replace_subresource("approval", name, pp, data).await
    }
}

/// Kinds with ephemeral containers
pub trait EphemeralContainers {}
impl EphemeralContainers for Pod {}

impl<K: EphemeralContainers + DeserializeOwned> Api<K> {
    /// Read `name` through its `ephemeralcontainers` subresource
    pub async fn get_ephemeral_containers(&self, name: &str) -> Result<K> {
        self.get_subresource("ephemeralcontainers", name).await
    }

    /// Patch the ephemeral containers of `name`
    pub async fn patch_ephemeral_containers<P: Serialize>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<K> {
        self.patch_subresource("ephemeralcontainers", name, pp, patch).await
    }

    /// Replace the ephemeral containers of `name`
    pub async fn replace_ephemeral_containers(&self, name: &str, pp: &PostParams, data: Vec<u8>) -> Result<K> {
        self.replace_subresource("ephemeralcontainers", name, pp, data).await
    }
}

// The connect subresources switch protocols on a real apiserver; only the
// plain HTTP answer is read here.

/// Kinds that can be attached to
pub trait Attach {}
impl Attach for Pod {}

impl<K: Attach> Api<K> {
    /// Attach to the running process of `name`
    pub async fn attach(&self, name: &str, ap: &AttachParams) -> Result<String> {
        self.fetch_text(self.request.attach(name, ap)).await
    }
}

/// Kinds that run commands
pub trait Execute {}
impl Execute for Pod {}

impl<K: Execute> Api<K> {
    /// Run `command` in `name`
    pub async fn exec<I, T>(&self, name: &str, command: I, ap: &AttachParams) -> Result<String>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.fetch_text(self.request.exec(name, command, ap)).await
    }
}

/// Kinds that forward ports
pub trait Portforward {}
impl Portforward for Pod {}

impl<K: Portforward> Api<K> {
    /// Forward `ports` of `name`
    pub async fn portforward(&self, name: &str, ports: &[u16]) -> Result<String> {
        self.fetch_text(self.request.portforward(name, ports)).await
    }
}

/// Kinds reachable through the apiserver proxy
pub trait Proxy {}
impl Proxy for Pod {}
impl Proxy for Service {}
impl Proxy for Node {}

impl<K: Proxy> Api<K> {
    /// `GET` `path` on `name` through the proxy
    pub async fn proxy_get(&self, name: &str, path: &str) -> Result<String> {
        self.proxy_request(Method::GET, name, path, &(), vec![]).await
    }

    /// Any method on `path` of `name` through the proxy
    ///
    /// `name` may carry a scheme and port, e.g. `https:web:8443`.
    pub async fn proxy_request<Q: QueryParams + ?Sized>(
        &self,
        method: Method,
        name: &str,
        path: &str,
        query: &Q,
        body: Vec<u8>,
    ) -> Result<String> {
        self.fetch_text(self.request.proxy(method, name, path, query, body)).await
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;
    use http::Method;
    use k8s_openapi::api::{
        apps::v1::Deployment,
        authentication::v1::{TokenRequest, TokenRequestSpec},
        core::v1::{Pod, Service, ServiceAccount},
    };
    use serde_json::json;

    use crate::{
        api::{Api, AttachParams, EvictParams, LogParams, Patch, PatchParams, PostParams},
        client::fake,
        Error,
    };

    #[tokio::test]
    async fn scale_and_status() {
        let (client, apiserver) = fake::serve(2, |n, seen| match n {
            0 => {
                assert_eq!(seen.method, Method::PATCH);
                assert_eq!(seen.uri, "/apis/apps/v1/namespaces/prod/deployments/web/scale");
                assert_eq!(seen.operation, Some("patchAppsV1NamespacedDeploymentScale"));
                fake::json(200, json!({
                    "apiVersion": "autoscaling/v1", "kind": "Scale",
                    "metadata": { "name": "web" }, "spec": { "replicas": 2 }, "status": { "replicas": 1 }
                }))
            }
            _ => {
                assert_eq!(seen.method, Method::PUT);
                assert_eq!(seen.operation, Some("replaceAppsV1NamespacedDeploymentStatus"));
                fake::json(200, json!({ "apiVersion": "apps/v1", "kind": "Deployment", "metadata": { "name": "web" } }))
            }
        });
        let deploys: Api<Deployment> = Api::namespaced(client, "prod");
        let scale = deploys
            .patch_scale("web", &PatchParams::default(), &Patch::Merge(json!({ "spec": { "replicas": 2 } })))
            .await
            .unwrap();
        assert_eq!(scale.status.unwrap().replicas, 1);

        let status = serde_json::to_vec(&json!({ "status": { "replicas": 1 } })).unwrap();
        deploys.replace_status("web", &PostParams::default(), status).await.unwrap();
        apiserver.done().await;
    }

    #[tokio::test]
    async fn logs_whole_or_streamed() {
        let (client, apiserver) = fake::serve(2, |_, seen| {
            assert_eq!(seen.uri, "/api/v1/namespaces/ns/pods/web/log?container=app&tailLines=2");
            fake::text(200, "one\ntwo\n")
        });
        let pods: Api<Pod> = Api::namespaced(client, "ns");
        let lp = LogParams {
            container: Some("app".into()),
            tail_lines: Some(2),
            ..LogParams::default()
        };
        assert_eq!(pods.logs("web", &lp).await.unwrap(), "one\ntwo\n");
        let chunks: Vec<_> = pods.log_stream("web", &lp).await.unwrap().try_collect().await.unwrap();
        assert_eq!(chunks.concat(), b"one\ntwo\n");
        apiserver.done().await;
    }

    #[tokio::test]
    async fn eviction_and_tokens() {
        let (client, apiserver) = fake::serve(2, |n, seen| match n {
            0 => {
                assert_eq!(seen.uri, "/api/v1/namespaces/ns/pods/web/eviction");
                assert_eq!(seen.json()["metadata"], json!({ "name": "web", "namespace": "ns" }));
                fake::json(201, json!({ "kind": "Status", "apiVersion": "v1", "status": "Success" }))
            }
            _ => {
                assert_eq!(seen.uri, "/api/v1/namespaces/ns/serviceaccounts/builder/token");
                assert_eq!(seen.json()["spec"]["audiences"], json!(["vault"]));
                fake::json(201, json!({
                    "apiVersion": "authentication.k8s.io/v1", "kind": "TokenRequest",
                    "metadata": {}, "spec": { "audiences": ["vault"] },
                    "status": { "token": "jwt", "expirationTimestamp": "2030-01-01T00:00:00Z" }
                }))
            }
        });
        let pods: Api<Pod> = Api::namespaced(client.clone(), "ns");
        assert!(pods.evict("web", &EvictParams::default()).await.unwrap().is_success());

        let accounts: Api<ServiceAccount> = Api::namespaced(client, "ns");
        let request = TokenRequest {
            spec: TokenRequestSpec {
                audiences: vec!["vault".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let issued = accounts.create_token("builder", &PostParams::default(), &request).await.unwrap();
        assert_eq!(issued.status.unwrap().token, "jwt");
        apiserver.done().await;
    }

    #[tokio::test]
    async fn connect_subresources_answer_text() {
        let (client, apiserver) = fake::serve(2, |n, seen| {
            let expected = [
                "/api/v1/namespaces/ns/pods/web/exec?stdout=true&stderr=true&command=ls&command=-l",
                "/api/v1/namespaces/ns/pods/web/portforward?ports=80%2C443",
            ];
            assert_eq!(seen.uri, expected[n]);
            fake::text(200, "upgrade required")
        });
        let pods: Api<Pod> = Api::namespaced(client, "ns");
        let out = pods.exec("web", ["ls", "-l"], &AttachParams::default()).await.unwrap();
        assert_eq!(out, "upgrade required");
        pods.portforward("web", &[80, 443]).await.unwrap();
        apiserver.done().await;
    }

    #[tokio::test]
    async fn proxied_requests() {
        let (client, apiserver) = fake::serve(2, |n, seen| match n {
            0 => {
                assert_eq!(seen.uri, "/api/v1/namespaces/ns/services/https%3Aweb%3A8443/proxy/healthz");
                assert_eq!(seen.operation, Some("connectCoreV1GetNamespacedServiceProxyWithPath"));
                fake::text(200, "ok")
            }
            _ => {
                assert_eq!((seen.method, seen.uri.as_str()), (Method::POST, "/api/v1/namespaces/ns/pods/web/proxy/api/v1/items?page=2"));
                assert_eq!(seen.content_type.as_deref(), Some("application/json"));
                fake::text(201, "created")
            }
        });
        let services: Api<Service> = Api::namespaced(client.clone(), "ns");
        assert_eq!(services.proxy_get("https:web:8443", "/healthz").await.unwrap(), "ok");

        let pods: Api<Pod> = Api::namespaced(client, "ns");
        let text = pods
            .proxy_request(Method::POST, "web", "api/v1/items", &[("page", "2")], b"{}".to_vec())
            .await
            .unwrap();
        assert_eq!(text, "created");
        apiserver.done().await;
    }

    #[tokio::test]
    async fn proxy_paths_stay_below_the_object() {
        let services: Api<Service> = Api::namespaced(fake::idle(), "ns");
        for path in ["../../secrets/token", "a/./b", "a/.."] {
            assert!(matches!(services.proxy_get("web", path).await, Err(Error::BuildRequest(_))), "{path}");
        }
    }
}
