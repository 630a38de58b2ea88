//! Catalogue operations addressed by their `operationId`
use either::Either;
use futures::Stream;
use http::Method;
use k8s_openapi::apimachinery::pkg::{
    apis::meta::v1::{APIGroupList, APIResourceList, APIVersions},
    version::Info,
};
use kubeapi_core::{
    catalog::{Catalog, Operation, PathArgs},
    params::{Patch, PatchParams, QueryParams},
    response::Status,
    WatchEvent,
};
use serde::{de::DeserializeOwned, Serialize};

use super::Client;
use crate::Result;

/// Request extension naming the catalogue operation a request performs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OperationId(pub &'static str);

impl OperationId {
    /// Tag `request` with this id
    pub fn tag<B>(self, mut request: http::Request<B>) -> http::Request<B> {
        request.extensions_mut().insert(self);
        request
    }
}

fn find(operation_id: &str) -> Result<&'static Operation> {
    Ok(Catalog::global().operation(operation_id)?)
}

/// Any operation of the catalogue
///
/// ```no_run
/// # async fn doc(client: kubeapi_client::Client) -> Result<(), Box<dyn std::error::Error>> {
/// use k8s_openapi::api::core::v1::Pod;
/// use kubeapi_client::core::{catalog::PathArgs, params::ListParams, ObjectList};
///
/// let args = PathArgs::new().namespace("kube-system");
/// let pods: ObjectList<Pod> = client
///     .call("listCoreV1NamespacedPod", &args, &ListParams::default().limit(10), vec![])
///     .await?;
/// # Ok(())
/// # }
/// ```
impl Client {
    /// The request an operation would send
    pub fn operation_request<Q: QueryParams + ?Sized>(
        &self,
        operation_id: &str,
        args: &PathArgs,
        query: &Q,
        body: Vec<u8>,
    ) -> Result<http::Request<Vec<u8>>> {
        let op = find(operation_id)?;
        let request = op.request(args, query, body)?;
        tracing::debug!(operation = %op.id, uri = %request.uri());
        Ok(OperationId(op.id.as_str()).tag(request))
    }

    /// Perform an operation, decoding its JSON answer
    ///
    /// A non-empty `body` goes out as JSON. Patches use [`Client::call_patch`].
    pub async fn call<T, Q>(&self, operation_id: &str, args: &PathArgs, query: &Q, body: Vec<u8>) -> Result<T>
    where
        T: DeserializeOwned,
        Q: QueryParams + ?Sized,
    {
        self.request(self.operation_request(operation_id, args, query, body)?).await
    }

    /// Perform an operation answered by the object or, once it is gone, a [`Status`]
    pub async fn call_status<T, Q>(
        &self,
        operation_id: &str,
        args: &PathArgs,
        query: &Q,
        body: Vec<u8>,
    ) -> Result<Either<T, Status>>
    where
        T: DeserializeOwned,
        Q: QueryParams + ?Sized,
    {
        self.request_status(self.operation_request(operation_id, args, query, body)?).await
    }

    /// Perform an operation answered in plain text: logs and connect operations
    pub async fn call_text<Q>(&self, operation_id: &str, args: &PathArgs, query: &Q, body: Vec<u8>) -> Result<String>
    where
        Q: QueryParams + ?Sized,
    {
        self.request_text(self.operation_request(operation_id, args, query, body)?).await
    }

    /// Perform a patch operation
    pub async fn call_patch<T, P>(
        &self,
        operation_id: &str,
        args: &PathArgs,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let op = find(operation_id)?;
        let request = op.patch_request(args, pp, patch)?;
        self.request(OperationId(op.id.as_str()).tag(request)).await
    }

    /// Perform a watch: a list operation with `watch=true`, or a `/watch/` operation
    pub async fn call_events<T, Q>(
        &self,
        operation_id: &str,
        args: &PathArgs,
        query: &Q,
    ) -> Result<impl Stream<Item = Result<WatchEvent<T>>>>
    where
        T: DeserializeOwned,
        Q: QueryParams + ?Sized,
    {
        self.request_events(self.operation_request(operation_id, args, query, vec![])?).await
    }
}

/// Discovery documents
impl Client {
    async fn discovery<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (op, args) = Catalog::global().resolve(&Method::GET, path)?;
        self.call(&op.id, &args, &(), vec![]).await
    }

    /// Version of the apiserver
    pub async fn apiserver_version(&self) -> Result<Info> {
        self.discovery("/version/").await
    }

    /// Named API groups
    pub async fn list_api_groups(&self) -> Result<APIGroupList> {
        self.discovery("/apis/").await
    }

    /// Resources of a named group version such as `apps/v1`
    pub async fn list_api_group_resources(&self, group_version: &str) -> Result<APIResourceList> {
        self.discovery(&format!("/apis/{group_version}/")).await
    }

    /// Versions of the core group
    pub async fn list_core_api_versions(&self) -> Result<APIVersions> {
        self.discovery("/api/").await
    }

    /// Resources of a core group version
    pub async fn list_core_api_resources(&self, version: &str) -> Result<APIResourceList> {
        self.discovery(&format!("/api/{version}/")).await
    }
}
