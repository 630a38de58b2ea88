//! Events of a watch stream, one JSON document per line
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{object::TypeMeta, response::ErrorResponse};

const INITIAL_EVENTS_END: &str = "k8s.io/initial-events-end";

/// One line of a watch response
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(tag = "type", content = "object", rename_all = "UPPERCASE")]
pub enum WatchEvent<K> {
    /// Created, or present when the watch started with initial events
    Added(K),
    /// Changed
    Modified(K),
    /// Removed; carries the last state
    Deleted(K),
    /// Progress marker, only a resource version to resume from
    Bookmark(Bookmark),
    /// The server gave up on the watch, e.g. `410 Expired`
    Error(ErrorResponse),
}

/// Body of a [`WatchEvent::Bookmark`]
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Bookmark {
    /// Type of the watched collection
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    /// All a bookmark has of object metadata
    pub metadata: BookmarkMeta,
}

/// Metadata of a [`Bookmark`]
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkMeta {
    /// Resume point
    pub resource_version: String,
    /// Marks the end of initial events
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl Bookmark {
    /// Resume point of the watch
    pub fn resource_version(&self) -> &str {
        &self.metadata.resource_version
    }

    /// Whether all initial events of a streaming list have been sent
    pub fn is_initial_events_end(&self) -> bool {
        self.metadata.annotations.get(INITIAL_EVENTS_END).map(String::as_str) == Some("true")
    }
}
