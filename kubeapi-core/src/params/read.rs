use super::{Query, QueryParams};
use crate::request::Error;

/// How `resourceVersion` is interpreted by a list
///
/// See the [API concepts](https://kubernetes.io/docs/reference/using-api/api-concepts/#semantics-for-get-and-list)
/// for the full table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionMatch {
    /// Anything at least as new as the given version, "0" reads the watch cache
    NotOlderThan,
    /// Exactly the given version, `410 Gone` once it is compacted
    Exact,
}

impl VersionMatch {
    fn as_str(self) -> &'static str {
        match self {
            VersionMatch::NotOlderThan => "NotOlderThan",
            VersionMatch::Exact => "Exact",
        }
    }
}

/// Options of list and delete-collection calls
///
/// ```
/// use kubeapi_core::params::ListParams;
/// let lp = ListParams::default()
///     .labels("app=web,tier!=cache")
///     .limit(100)
///     .match_any();
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListParams {
    /// `labelSelector`
    pub labels: Option<String>,
    /// `fieldSelector`, e.g. `status.phase=Running`
    pub fields: Option<String>,
    /// `timeoutSeconds` of the call
    pub timeout_seconds: Option<u32>,
    /// Page size; more pages follow through [`ListParams::continue_token`]
    pub limit: Option<u32>,
    /// The opaque `continue` token of the previous page
    pub page_token: Option<String>,
    /// `resourceVersion` to read at
    pub resource_version: Option<String>,
    /// How [`ListParams::resource_version`] is matched
    pub version_match: Option<VersionMatch>,
}

impl ListParams {
    /// Restrict by label selector
    #[must_use]
    pub fn labels(mut self, selector: &str) -> Self {
        self.labels = Some(selector.into());
        self
    }

    /// Restrict by field selector
    #[must_use]
    pub fn fields(mut self, selector: &str) -> Self {
        self.fields = Some(selector.into());
        self
    }

    /// Server side timeout in seconds
    #[must_use]
    pub fn timeout(mut self, seconds: u32) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Page size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue from a previous page
    #[must_use]
    pub fn continue_token(mut self, token: &str) -> Self {
        self.page_token = Some(token.into());
        self
    }

    /// Read at a resource version
    #[must_use]
    pub fn at(mut self, resource_version: &str) -> Self {
        self.resource_version = Some(resource_version.into());
        self
    }

    /// Match the resource version with the given strategy
    #[must_use]
    pub fn matching(mut self, version_match: VersionMatch) -> Self {
        self.version_match = Some(version_match);
        self
    }

    /// Any version, served from the watch cache
    #[must_use]
    pub fn match_any(self) -> Self {
        self.at("0").matching(VersionMatch::NotOlderThan)
    }
}

impl QueryParams for ListParams {
    fn check(&self) -> Result<(), Error> {
        match (self.resource_version.as_deref(), self.version_match) {
            (None, Some(_)) => Err(Error::Validation(
                "a resource version is required with a version match".into(),
            )),
            (Some("0"), Some(VersionMatch::Exact)) => Err(Error::Validation(
                "an exact version match needs a non-zero resource version".into(),
            )),
            _ => Ok(()),
        }
    }

    fn append_to(&self, query: &mut Query) {
        query
            .opt("fieldSelector", self.fields.as_ref())
            .opt("labelSelector", self.labels.as_ref())
            .opt("timeoutSeconds", self.timeout_seconds)
            .opt("limit", self.limit);
        // a continue token pins the version on its own
        if self.page_token.is_some() {
            query.opt("continue", self.page_token.as_ref());
            return;
        }
        match self.resource_version.as_deref() {
            // "0" with a limit would make the cache ignore the limit
            Some("0") if self.limit.is_some() => {}
            Some(rv) => {
                query
                    .pair("resourceVersion", rv)
                    .opt("resourceVersionMatch", self.version_match.map(VersionMatch::as_str));
            }
            None => {}
        }
    }
}

/// Options of get calls
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetParams {
    /// Unset reads the latest version, "0" any cached one
    pub resource_version: Option<String>,
}

impl GetParams {
    /// Read at least at `resource_version`
    pub fn at(resource_version: &str) -> Self {
        GetParams {
            resource_version: Some(resource_version.into()),
        }
    }

    /// Read any cached version
    pub fn any() -> Self {
        Self::at("0")
    }
}

impl QueryParams for GetParams {
    fn append_to(&self, query: &mut Query) {
        query.opt("resourceVersion", self.resource_version.as_ref());
    }
}

// the apiserver closes watches itself shortly after this
const MAX_WATCH_TIMEOUT: u32 = 295;
const DEFAULT_WATCH_TIMEOUT: u32 = 290;

/// Options of watch calls
///
/// The version to start from is given separately to
/// [`Request::watch`](crate::Request::watch).
#[derive(Clone, Debug, PartialEq)]
pub struct WatchParams {
    /// `labelSelector`
    pub labels: Option<String>,
    /// `fieldSelector`
    pub fields: Option<String>,
    /// Below 295 seconds, 290 when unset
    pub timeout_seconds: Option<u32>,
    /// Ask for `BOOKMARK` events, on by default
    pub bookmarks: bool,
    /// Replay the current state as `ADDED` events, ending with a bookmark
    /// annotated `k8s.io/initial-events-end`
    pub initial_events: bool,
}

impl Default for WatchParams {
    fn default() -> Self {
        WatchParams {
            labels: None,
            fields: None,
            timeout_seconds: None,
            bookmarks: true,
            initial_events: false,
        }
    }
}

impl WatchParams {
    /// A streaming list: initial events with bookmarks
    pub fn streaming_lists() -> Self {
        WatchParams::default().initial_events()
    }

    /// Restrict by label selector
    #[must_use]
    pub fn labels(mut self, selector: &str) -> Self {
        self.labels = Some(selector.into());
        self
    }

    /// Restrict by field selector
    #[must_use]
    pub fn fields(mut self, selector: &str) -> Self {
        self.fields = Some(selector.into());
        self
    }

    /// Server side timeout in seconds
    #[must_use]
    pub fn timeout(mut self, seconds: u32) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Turn bookmarks off
    #[must_use]
    pub fn disable_bookmarks(mut self) -> Self {
        self.bookmarks = false;
        self
    }

    /// Replay the current state first
    #[must_use]
    pub fn initial_events(mut self) -> Self {
        self.initial_events = true;
        self
    }
}

impl QueryParams for WatchParams {
    fn check(&self) -> Result<(), Error> {
        if self.timeout_seconds.is_some_and(|t| t >= MAX_WATCH_TIMEOUT) {
            return Err(Error::Validation(format!(
                "watch timeout must be below {MAX_WATCH_TIMEOUT}s"
            )));
        }
        if self.initial_events && !self.bookmarks {
            return Err(Error::Validation("initial events need bookmarks".into()));
        }
        Ok(())
    }

    fn append_to(&self, query: &mut Query) {
        query
            .pair("watch", "true")
            .opt(
                "timeoutSeconds",
                Some(self.timeout_seconds.unwrap_or(DEFAULT_WATCH_TIMEOUT)),
            )
            .opt("fieldSelector", self.fields.as_ref())
            .opt("labelSelector", self.labels.as_ref())
            .flag("allowWatchBookmarks", self.bookmarks)
            .flag("sendInitialEvents", self.initial_events);
        if self.initial_events {
            query.pair("resourceVersionMatch", "NotOlderThan");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_token_replaces_resource_version() {
        let lp = ListParams::default()
            .labels("app=web")
            .limit(10)
            .continue_token("abc")
            .at("500");
        assert_eq!(
            lp.query_string().unwrap(),
            "labelSelector=app%3Dweb&limit=10&continue=abc"
        );
    }

    #[test]
    fn any_version_with_limit_is_dropped() {
        let lp = ListParams::default().match_any().limit(5);
        assert_eq!(lp.query_string().unwrap(), "limit=5");

        let lp = ListParams::default().match_any();
        assert_eq!(
            lp.query_string().unwrap(),
            "resourceVersion=0&resourceVersionMatch=NotOlderThan"
        );
    }

    #[test]
    fn version_match_needs_a_version() {
        let exact = ListParams::default().matching(VersionMatch::Exact);
        assert!(exact.check().is_err());
        assert!(exact.clone().at("0").check().is_err());
        assert!(exact.at("12").check().is_ok());
    }

    #[test]
    fn get_params() {
        assert_eq!(GetParams::default().query_string().unwrap(), "");
        assert_eq!(GetParams::any().query_string().unwrap(), "resourceVersion=0");
    }

    #[test]
    fn watch_defaults() {
        let wp = WatchParams::default().fields("metadata.name=blog");
        assert_eq!(
            wp.query_string().unwrap(),
            "watch=true&timeoutSeconds=290&fieldSelector=metadata.name%3Dblog&allowWatchBookmarks=true"
        );
        assert!(WatchParams::default().timeout(295).check().is_err());
        assert!(WatchParams::default().timeout(60).check().is_ok());
    }

    #[test]
    fn streaming_lists_need_bookmarks() {
        assert!(WatchParams::streaming_lists().disable_bookmarks().check().is_err());
        let qs = WatchParams::streaming_lists().query_string().unwrap();
        assert!(qs.ends_with("allowWatchBookmarks=true&sendInitialEvents=true&resourceVersionMatch=NotOlderThan"));
    }
}
