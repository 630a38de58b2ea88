use either::Either;
use futures::Stream;
use serde::{de::DeserializeOwned, Serialize};

use super::{to_json, Api};
use crate::{Error, Result};
use kubeapi_core::{params::*, response::Status, ObjectList, WatchEvent};

/// Verbs on the collection and its objects
impl<K: DeserializeOwned> Api<K> {
    /// Read `name`; a missing object is an [`Error::Api`] with code 404
    pub async fn get(&self, name: &str) -> Result<K> {
        self.get_with(name, &GetParams::default()).await
    }

    /// Read `name` at a resource version
    pub async fn get_with(&self, name: &str, gp: &GetParams) -> Result<K> {
        self.fetch(self.request.get(name, gp)).await
    }

    /// Read `name`, `None` when it does not exist
    pub async fn get_opt(&self, name: &str) -> Result<Option<K>> {
        match self.get(name).await {
            Err(err) if err.is_not_found() => Ok(None),
            res => res.map(Some),
        }
    }

    /// One page of the collection
    ///
    /// ```no_run
    /// # async fn doc(client: kubeapi_client::Client) -> kubeapi_client::Result<()> {
    /// use k8s_openapi::api::core::v1::Pod;
    /// use kubeapi_client::api::{Api, ListParams, ResourceExt};
    ///
    /// let pods: Api<Pod> = Api::namespaced(client, "apps");
    /// let mut lp = ListParams::default().labels("app=blog").limit(50);
    /// loop {
    ///     let page = pods.list(&lp).await?;
    ///     page.iter().for_each(|p| println!("{}", p.name_any()));
    ///     match page.continue_token() {
    ///         Some(token) => lp = lp.continue_token(token),
    ///         None => break,
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self, lp: &ListParams) -> Result<ObjectList<K>> {
        self.fetch(self.request.list(lp)).await
    }

    /// Create an object; the server fills in generated fields
    pub async fn create(&self, pp: &PostParams, data: &K) -> Result<K>
    where
        K: Serialize,
    {
        self.fetch(self.request.create(pp, to_json(data)?)).await
    }

    /// Replace `name` with `data`
    ///
    /// `data` should carry the resource version it was read at, or the server
    /// overwrites unconditionally.
    pub async fn replace(&self, name: &str, pp: &PostParams, data: &K) -> Result<K>
    where
        K: Serialize,
    {
        self.fetch(self.request.replace(name, pp, to_json(data)?)).await
    }

    /// Patch `name`
    pub async fn patch<P: Serialize>(&self, name: &str, pp: &PatchParams, patch: &Patch<P>) -> Result<K> {
        self.fetch(self.request.patch(name, pp, patch)).await
    }

    /// Delete `name`
    ///
    /// Answers with the object while finalizers or foreground deletion hold it,
    /// and with a `Status` once it is gone.
    pub async fn delete(&self, name: &str, dp: &DeleteParams) -> Result<Either<K, Status>> {
        self.fetch_status(self.request.delete(name, dp)).await
    }

    /// Delete every object matching `lp`
    pub async fn delete_collection(
        &self,
        dp: &DeleteParams,
        lp: &ListParams,
    ) -> Result<Either<ObjectList<K>, Status>> {
        self.fetch_status(self.request.delete_collection(dp, lp)).await
    }

    /// Changes after `version`
    ///
    /// The stream ends when the server closes the watch; resume from the last
    /// seen resource version. A `410` error event means `version` is too old.
    pub async fn watch(&self, wp: &WatchParams, version: &str) -> Result<impl Stream<Item = Result<WatchEvent<K>>>> {
        self.fetch_events(self.request.watch(wp, version)).await
    }
}
