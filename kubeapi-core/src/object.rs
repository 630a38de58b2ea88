//! Envelopes around objects: type information and lists
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};
use serde::{Deserialize, Serialize};

use crate::Resource;

/// `apiVersion` and `kind` of a serialized object
#[derive(Deserialize, Serialize, Clone, Default, Debug, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    /// `group/version`, or the bare version for the core group
    pub api_version: String,
    /// Kind
    pub kind: String,
}

impl TypeMeta {
    /// For objects of `K`
    pub fn resource<K: Resource + ?Sized>() -> Self {
        TypeMeta {
            api_version: K::API_VERSION.into(),
            kind: K::KIND.into(),
        }
    }

    /// For lists of `K`
    pub fn list<K: Resource + ?Sized>() -> Self {
        TypeMeta {
            kind: format!("{}List", K::KIND),
            ..Self::resource::<K>()
        }
    }
}

/// Any `*List` answer of the apiserver
///
/// One generic shape for every list and collection delete, in place of the
/// per-kind list types of `k8s_openapi`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ObjectList<T> {
    /// Absent from some aggregated apiservers
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub type_meta: Option<TypeMeta>,
    /// Carries the `continue` token and the version the list was read at
    #[serde(default)]
    pub metadata: ListMeta,
    /// The objects
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> ObjectList<T> {
    /// Borrowing iterator over the items
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Mutable iterator over the items
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Token for the next page; `None` on the last page
    pub fn continue_token(&self) -> Option<&str> {
        match self.metadata.continue_.as_deref() {
            Some("") | None => None,
            token => token,
        }
    }

    /// Version the list was read at
    pub fn resource_version(&self) -> Option<&str> {
        self.metadata.resource_version.as_deref()
    }
}

impl<T> IntoIterator for ObjectList<T> {
    type IntoIter = std::vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ObjectList<T> {
    type IntoIter = std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ObjectList<T> {
    type IntoIter = std::slice::IterMut<'a, T>;
    type Item = &'a mut T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
