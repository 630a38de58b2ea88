//! Query and body parameters of the REST operations.
//!
//! The apiserver reuses a few option families across all endpoints:
//!
//! - reads: [`ListParams`], [`GetParams`] and [`WatchParams`]
//! - writes: [`PostParams`], [`PatchParams`] and the [`Patch`] body
//! - deletes: [`DeleteParams`], sent as a `DeleteOptions` body
//!
//! Per-subresource families live in [`subresource`](crate::subresource).
//! Every family implements [`QueryParams`] so it can be handed to any
//! catalogue operation.
use std::fmt::Display;

use crate::request::Error;

mod delete;
mod read;
mod write;

pub use delete::{DeleteParams, Preconditions, PropagationPolicy};
pub use read::{GetParams, ListParams, VersionMatch, WatchParams};
pub use write::{Patch, PatchParams, PostParams, ValidationDirective};

/// A query string being assembled, in `application/x-www-form-urlencoded` form
pub struct Query(form_urlencoded::Serializer<'static, String>);

impl Query {
    pub(crate) fn new() -> Self {
        Query(form_urlencoded::Serializer::new(String::new()))
    }

    /// Append `key=value`
    pub fn pair(&mut self, key: &str, value: &str) -> &mut Self {
        self.0.append_pair(key, value);
        self
    }

    /// Append `key=value` when there is a value
    pub fn opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.0.append_pair(key, &v.to_string());
        }
        self
    }

    /// Append `key=true` when `on` is set
    pub fn flag(&mut self, key: &str, on: bool) -> &mut Self {
        if on {
            self.0.append_pair(key, "true");
        }
        self
    }

    pub(crate) fn finish(mut self) -> String {
        self.0.finish()
    }
}

/// A family of query parameters
pub trait QueryParams {
    /// Reject combinations the apiserver would refuse
    fn check(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Append the parameters in wire order
    fn append_to(&self, query: &mut Query);

    /// Check the parameters and render them without a leading `?`
    fn query_string(&self) -> Result<String, Error> {
        self.check()?;
        let mut query = Query::new();
        self.append_to(&mut query);
        Ok(query.finish())
    }
}

impl QueryParams for () {
    fn append_to(&self, _: &mut Query) {}
}

fn check_keys<'a>(mut keys: impl Iterator<Item = &'a str>) -> Result<(), Error> {
    if keys.any(str::is_empty) {
        return Err(Error::Validation("query parameter names must be non-empty".into()));
    }
    Ok(())
}

/// Raw pairs for the documented extras such as `pretty`
impl QueryParams for [(&str, &str)] {
    fn check(&self) -> Result<(), Error> {
        check_keys(self.iter().map(|(k, _)| *k))
    }

    fn append_to(&self, query: &mut Query) {
        for (k, v) in self {
            query.pair(k, v);
        }
    }
}

impl<const N: usize> QueryParams for [(&str, &str); N] {
    fn check(&self) -> Result<(), Error> {
        self[..].check()
    }

    fn append_to(&self, query: &mut Query) {
        self[..].append_to(query)
    }
}

impl QueryParams for Vec<(String, String)> {
    fn check(&self) -> Result<(), Error> {
        check_keys(self.iter().map(|(k, _)| k.as_str()))
    }

    fn append_to(&self, query: &mut Query) {
        for (k, v) in self {
            query.pair(k, v);
        }
    }
}

impl<T: QueryParams + ?Sized> QueryParams for &T {
    fn check(&self) -> Result<(), Error> {
        T::check(self)
    }

    fn append_to(&self, query: &mut Query) {
        T::append_to(self, query)
    }
}

// 1..=128 characters when set
pub(crate) fn check_manager(manager: Option<&str>) -> Result<(), Error> {
    match manager.map(str::len) {
        Some(0) | Some(129..) => Err(Error::Validation(
            "field manager must be between 1 and 128 characters".into(),
        )),
        _ => Ok(()),
    }
}
