//! URL and verb builder for one resource collection
use http::{header, Method};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use thiserror::Error;

use crate::params::{DeleteParams, GetParams, ListParams, Patch, PatchParams, PostParams, QueryParams, WatchParams};

pub(crate) const JSON_MIME: &str = "application/json";

// unreserved characters of RFC 3986 are kept
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Errors raised while building a request, before anything is sent
#[derive(Debug, Error)]
pub enum Error {
    /// The `http` builder refused the parts
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] http::Error),
    /// The body could not be serialized
    #[error("failed to serialize body: {0}")]
    SerializeBody(#[source] serde_json::Error),
    /// A parameter or path value is not acceptable
    #[error("invalid request: {0}")]
    Validation(String),
}

/// Encode a value so it stays exactly one path segment
pub(crate) fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Reverse [`encode_segment`], `None` when the bytes are not UTF-8
pub(crate) fn decode_segment(value: &str) -> Option<String> {
    percent_decode_str(value).decode_utf8().ok().map(|v| v.into_owned())
}

/// Names and other path values must not be empty or a dot segment
pub(crate) fn check_segment(value: &str) -> Result<(), Error> {
    match value {
        "" => Err(Error::Validation("path values must be non-empty".into())),
        "." | ".." => Err(Error::Validation(format!("{value:?} is not a valid path value"))),
        _ => Ok(()),
    }
}

/// Append the rendered query, if any
pub(crate) fn with_query<Q: QueryParams + ?Sized>(mut uri: String, query: &Q) -> Result<String, Error> {
    let rendered = query.query_string()?;
    if !rendered.is_empty() {
        uri.push('?');
        uri.push_str(&rendered);
    }
    Ok(uri)
}

/// What a request carries
pub(crate) enum Payload {
    Empty,
    Json(Vec<u8>),
    Patch(&'static str, Vec<u8>),
}

impl Payload {
    /// JSON bytes; nothing at all when there are none
    pub(crate) fn json(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            Payload::Empty
        } else {
            Payload::Json(bytes)
        }
    }

    pub(crate) fn serialize<T: Serialize>(value: &T) -> Result<Self, Error> {
        serde_json::to_vec(value)
            .map(Payload::json)
            .map_err(Error::SerializeBody)
    }

    pub(crate) fn patch<P: Serialize>(patch: &Patch<P>) -> Result<Self, Error> {
        let bytes = patch.to_bytes().map_err(Error::SerializeBody)?;
        Ok(Payload::Patch(patch.content_type(), bytes))
    }

    pub(crate) fn build(self, method: Method, uri: String) -> Result<http::Request<Vec<u8>>, Error> {
        let builder = http::Request::builder().method(method).uri(uri);
        let (builder, body) = match self {
            Payload::Empty => (builder, Vec::new()),
            Payload::Json(body) => (builder.header(header::CONTENT_TYPE, JSON_MIME), body),
            Payload::Patch(content_type, body) => (
                builder
                    .header(header::ACCEPT, JSON_MIME)
                    .header(header::CONTENT_TYPE, content_type),
                body,
            ),
        };
        builder.body(body).map_err(Error::BuildRequest)
    }
}

/// Builds the requests of one resource collection
///
/// `url_path` is the collection, e.g. `/apis/apps/v1/namespaces/prod/deployments`.
/// Object names and subresources are appended as encoded segments.
#[derive(Clone, Debug)]
pub struct Request {
    /// Path of the collection
    pub url_path: String,
}

impl Request {
    /// Builder for the collection at `url_path`
    pub fn new(url_path: impl Into<String>) -> Self {
        Request {
            url_path: url_path.into(),
        }
    }

    /// `url_path` plus the given segments and query
    pub(crate) fn uri<Q: QueryParams + ?Sized>(&self, segments: &[&str], query: &Q) -> Result<String, Error> {
        if let Some(ns) = self.namespace() {
            check_segment(ns)?;
        }
        let mut uri = self.url_path.clone();
        for segment in segments {
            check_segment(segment)?;
            uri.push('/');
            uri.push_str(&encode_segment(segment));
        }
        with_query(uri, query)
    }

    /// The namespace of the collection, if it is namespaced
    pub(crate) fn namespace(&self) -> Option<&str> {
        let (_, rest) = self.url_path.split_once("/namespaces/")?;
        rest.split('/').next()
    }
}

/// Verbs on the collection and its objects
impl Request {
    /// `GET` the collection
    pub fn list(&self, lp: &ListParams) -> Result<http::Request<Vec<u8>>, Error> {
        Payload::Empty.build(Method::GET, self.uri(&[], lp)?)
    }

    /// `GET` the collection as a watch starting after `version`
    pub fn watch(&self, wp: &WatchParams, version: &str) -> Result<http::Request<Vec<u8>>, Error> {
        // watch=true is always there, so a query already exists
        let mut uri = self.uri(&[], wp)?;
        uri.push_str("&resourceVersion=");
        uri.extend(form_urlencoded::byte_serialize(version.as_bytes()));
        Payload::Empty.build(Method::GET, uri)
    }

    /// `GET` one object
    pub fn get(&self, name: &str, gp: &GetParams) -> Result<http::Request<Vec<u8>>, Error> {
        Payload::Empty.build(Method::GET, self.uri(&[name], gp)?)
    }

    /// `POST` a new object
    pub fn create(&self, pp: &PostParams, data: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        Payload::json(data).build(Method::POST, self.uri(&[], pp)?)
    }

    /// `PUT` a whole object, `metadata.resourceVersion` must be set in `data`
    pub fn replace(&self, name: &str, pp: &PostParams, data: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        Payload::json(data).build(Method::PUT, self.uri(&[name], pp)?)
    }

    /// `PATCH` an object with the strategy of `patch`
    pub fn patch<P: Serialize>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        pp.check_patch(patch)?;
        Payload::patch(patch)?.build(Method::PATCH, self.uri(&[name], pp)?)
    }

    /// `DELETE` an object, the options go in the body
    pub fn delete(&self, name: &str, dp: &DeleteParams) -> Result<http::Request<Vec<u8>>, Error> {
        Payload::serialize(dp)?.build(Method::DELETE, self.uri(&[name], &())?)
    }

    /// `DELETE` every object the list selects
    ///
    /// Empty delete options send no body at all.
    pub fn delete_collection(&self, dp: &DeleteParams, lp: &ListParams) -> Result<http::Request<Vec<u8>>, Error> {
        let payload = if dp.is_empty() {
            Payload::Empty
        } else {
            Payload::serialize(dp)?
        };
        payload.build(Method::DELETE, self.uri(&[], lp)?)
    }
}

/// Verbs on a subresource such as `status` or `scale`
impl Request {
    /// `GET` the subresource
    pub fn get_subresource(&self, subresource: &str, name: &str) -> Result<http::Request<Vec<u8>>, Error> {
        Payload::Empty.build(Method::GET, self.uri(&[name, subresource], &())?)
    }

    /// `POST` to the subresource
    pub fn create_subresource(
        &self,
        subresource: &str,
        name: &str,
        pp: &PostParams,
        data: Vec<u8>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        Payload::json(data).build(Method::POST, self.uri(&[name, subresource], pp)?)
    }

    /// `PUT` the subresource
    pub fn replace_subresource(
        &self,
        subresource: &str,
        name: &str,
        pp: &PostParams,
        data: Vec<u8>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        Payload::json(data).build(Method::PUT, self.uri(&[name, subresource], pp)?)
    }

    /// `PATCH` the subresource
    pub fn patch_subresource<P: Serialize>(
        &self,
        subresource: &str,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        pp.check_patch(patch)?;
        Payload::patch(patch)?.build(Method::PATCH, self.uri(&[name, subresource], pp)?)
    }
}
