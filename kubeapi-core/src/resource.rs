use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::ObjectReference,
    apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference},
    Metadata,
};

use crate::{
    catalog::{Catalog, Operation},
    gvk::{GroupVersionKind, GroupVersionResource},
    object::TypeMeta,
};

pub use k8s_openapi::{ClusterResourceScope, NamespaceResourceScope, ResourceScope};

/// A catalogued object type with standard object metadata
///
/// Every top-level type of `k8s_openapi` implements it. The group, version,
/// kind, plural and scope come from `k8s_openapi::Resource`; this trait adds
/// the URL and catalogue lookups built on them.
pub trait Resource: k8s_openapi::Resource + Metadata<Ty = ObjectMeta> {
    /// Group, version and kind
    fn gvk() -> GroupVersionKind {
        GroupVersionKind::new(Self::GROUP, Self::VERSION, Self::KIND)
    }

    /// Group, version and plural
    fn gvr() -> GroupVersionResource {
        GroupVersionResource::new(Self::GROUP, Self::VERSION, Self::URL_PATH_SEGMENT)
    }

    /// Path of the collection, inside `namespace` when given
    fn url_path(namespace: Option<&str>) -> String {
        Self::gvr().url_path(namespace)
    }

    /// Catalogued operations on this type and its subresources
    fn operations() -> Vec<&'static Operation> {
        Catalog::global().for_resource(Self::GROUP, Self::VERSION, Self::URL_PATH_SEGMENT)
    }

    /// `apiVersion` and `kind` of this type
    fn type_meta() -> TypeMeta {
        TypeMeta::resource::<Self>()
    }

    /// Reference to this object, for events and bindings
    fn object_ref(&self) -> ObjectReference {
        let meta = self.metadata();
        ObjectReference {
            api_version: Some(Self::API_VERSION.into()),
            kind: Some(Self::KIND.into()),
            name: meta.name.clone(),
            namespace: meta.namespace.clone(),
            resource_version: meta.resource_version.clone(),
            uid: meta.uid.clone(),
            field_path: None,
        }
    }

    /// Owner reference marking this object as controller of another
    ///
    /// Needs both a name and a uid, so it is `None` before creation.
    fn controller_owner_ref(&self) -> Option<OwnerReference> {
        let meta = self.metadata();
        let (name, uid) = (meta.name.clone()?, meta.uid.clone()?);
        Some(OwnerReference {
            api_version: Self::API_VERSION.into(),
            kind: Self::KIND.into(),
            name,
            uid,
            controller: Some(true),
            block_owner_deletion: None,
        })
    }
}

impl<K> Resource for K where K: k8s_openapi::Resource + Metadata<Ty = ObjectMeta> {}

static NO_ENTRIES: BTreeMap<String, String> = BTreeMap::new();

/// Shortcuts into the metadata of a [`Resource`]
pub trait ResourceExt: Resource {
    /// `name`, else `generateName`, else `""`
    fn name_any(&self) -> String {
        let meta = self.metadata();
        meta.name.as_ref().or(meta.generate_name.as_ref()).cloned().unwrap_or_default()
    }

    /// Namespace
    fn namespace(&self) -> Option<String> {
        self.metadata().namespace.clone()
    }

    /// Resource version
    fn resource_version(&self) -> Option<String> {
        self.metadata().resource_version.clone()
    }

    /// Uid
    fn uid(&self) -> Option<String> {
        self.metadata().uid.clone()
    }

    /// Labels, empty when unset
    fn labels(&self) -> &BTreeMap<String, String> {
        self.metadata().labels.as_ref().unwrap_or(&NO_ENTRIES)
    }

    /// Labels, created on first use
    fn labels_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.metadata_mut().labels.get_or_insert_with(BTreeMap::new)
    }

    /// Annotations, empty when unset
    fn annotations(&self) -> &BTreeMap<String, String> {
        self.metadata().annotations.as_ref().unwrap_or(&NO_ENTRIES)
    }

    /// Annotations, created on first use
    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.metadata_mut().annotations.get_or_insert_with(BTreeMap::new)
    }

    /// Finalizers
    fn finalizers(&self) -> &[String] {
        self.metadata().finalizers.as_deref().unwrap_or(&[])
    }
}

impl<K: Resource> ResourceExt for K {}
