//! Parameters and request builders of the pod, service and node subresources
use http::Method;
use serde::Serialize;

use crate::{
    params::{DeleteParams, PostParams, Query, QueryParams},
    request::{Error, Payload, Request},
};

pub use k8s_openapi::api::autoscaling::v1::{Scale, ScaleSpec, ScaleStatus};

/// Options of `pods/log`
#[derive(Clone, Debug, Default)]
pub struct LogParams {
    /// Container to read, optional for single container pods
    pub container: Option<String>,
    /// Keep the connection open for new lines
    pub follow: bool,
    /// Stop after this many bytes
    pub limit_bytes: Option<i64>,
    /// Pretty print
    pub pretty: bool,
    /// Read the previous, terminated instance of the container
    pub previous: bool,
    /// Relative start in seconds; exclusive with `since_time`
    pub since_seconds: Option<i64>,
    /// RFC 3339 start; exclusive with `since_seconds`
    pub since_time: Option<String>,
    /// Only the last lines
    pub tail_lines: Option<i64>,
    /// Prefix each line with its RFC 3339 timestamp
    pub timestamps: bool,
}

impl QueryParams for LogParams {
    fn check(&self) -> Result<(), Error> {
        if self.since_seconds.is_some() && self.since_time.is_some() {
            return Err(Error::Validation("since_seconds and since_time are exclusive".into()));
        }
        Ok(())
    }

    fn append_to(&self, query: &mut Query) {
        query
            .opt("container", self.container.as_ref())
            .flag("follow", self.follow)
            .opt("limitBytes", self.limit_bytes)
            .flag("pretty", self.pretty)
            .flag("previous", self.previous)
            .opt("sinceSeconds", self.since_seconds)
            .opt("sinceTime", self.since_time.as_ref())
            .opt("tailLines", self.tail_lines)
            .flag("timestamps", self.timestamps);
    }
}

/// Options of `pods/eviction`
#[derive(Clone, Debug, Default)]
pub struct EvictParams {
    /// `deleteOptions` of the `Eviction`
    pub delete_options: Option<DeleteParams>,
    /// Query of the `POST`
    pub post_options: PostParams,
}

// policy/v1 Eviction
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Eviction<'a> {
    api_version: &'static str,
    kind: &'static str,
    metadata: EvictionMeta<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delete_options: Option<&'a DeleteParams>,
}

#[derive(Serialize)]
struct EvictionMeta<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

/// Streams of `pods/attach` and `pods/exec`
///
/// At least one stream must be on, and `tty` excludes `stderr` since a
/// terminal merges both outputs.
#[derive(Clone, Debug)]
pub struct AttachParams {
    /// Container to attach to, optional for single container pods
    pub container: Option<String>,
    /// Off by default
    pub stdin: bool,
    /// On by default
    pub stdout: bool,
    /// On by default
    pub stderr: bool,
    /// Off by default
    pub tty: bool,
}

impl Default for AttachParams {
    fn default() -> Self {
        AttachParams {
            container: None,
            stdin: false,
            stdout: true,
            stderr: true,
            tty: false,
        }
    }
}

impl AttachParams {
    /// stdin and stdout on a terminal
    pub fn interactive_tty() -> Self {
        AttachParams::default().stdin(true).stderr(false).tty(true)
    }

    /// Pick the container
    #[must_use]
    pub fn container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    /// Attach stdin
    #[must_use]
    pub fn stdin(mut self, on: bool) -> Self {
        self.stdin = on;
        self
    }

    /// Attach stdout
    #[must_use]
    pub fn stdout(mut self, on: bool) -> Self {
        self.stdout = on;
        self
    }

    /// Attach stderr
    #[must_use]
    pub fn stderr(mut self, on: bool) -> Self {
        self.stderr = on;
        self
    }

    /// Allocate a terminal
    #[must_use]
    pub fn tty(mut self, on: bool) -> Self {
        self.tty = on;
        self
    }
}

impl QueryParams for AttachParams {
    fn check(&self) -> Result<(), Error> {
        if !(self.stdin || self.stdout || self.stderr) {
            return Err(Error::Validation("at least one of stdin, stdout or stderr is needed".into()));
        }
        if self.tty && self.stderr {
            return Err(Error::Validation("tty cannot be combined with stderr".into()));
        }
        Ok(())
    }

    fn append_to(&self, query: &mut Query) {
        query
            .flag("stdin", self.stdin)
            .flag("stdout", self.stdout)
            .flag("stderr", self.stderr)
            .flag("tty", self.tty)
            .opt("container", self.container.as_ref());
    }
}

/// [`AttachParams`] plus the command of `pods/exec`
#[derive(Clone, Debug)]
pub struct ExecParams<'a> {
    /// Streams and container
    pub attach: &'a AttachParams,
    /// Program and arguments, sent as repeated `command` pairs
    pub command: Vec<String>,
}

impl QueryParams for ExecParams<'_> {
    fn check(&self) -> Result<(), Error> {
        if self.command.is_empty() {
            return Err(Error::Validation("exec needs a command".into()));
        }
        self.attach.check()
    }

    fn append_to(&self, query: &mut Query) {
        self.attach.append_to(query);
        for arg in &self.command {
            query.pair("command", arg);
        }
    }
}

/// Ports of `pods/portforward`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortforwardParams {
    /// 1 to 128 non-zero ports, sent comma separated
    pub ports: Vec<u16>,
}

impl QueryParams for PortforwardParams {
    fn check(&self) -> Result<(), Error> {
        match self.ports.len() {
            1..=128 if !self.ports.contains(&0) => Ok(()),
            1..=128 => Err(Error::Validation("port 0 cannot be forwarded".into())),
            n => Err(Error::Validation(format!("between 1 and 128 ports are needed, got {n}"))),
        }
    }

    fn append_to(&self, query: &mut Query) {
        let ports = self.ports.iter().map(u16::to_string).collect::<Vec<_>>();
        query.pair("ports", &ports.join(","));
    }
}

/// Subresources that are not plain reads and writes of an object
impl Request {
    /// `GET` the logs of a pod
    pub fn logs(&self, name: &str, lp: &LogParams) -> Result<http::Request<Vec<u8>>, Error> {
        Payload::Empty.build(Method::GET, self.uri(&[name, "log"], lp)?)
    }

    /// `POST` an `Eviction` of a pod
    pub fn evict(&self, name: &str, ep: &EvictParams) -> Result<http::Request<Vec<u8>>, Error> {
        let uri = self.uri(&[name, "eviction"], &ep.post_options)?;
        let eviction = Eviction {
            api_version: "policy/v1",
            kind: "Eviction",
            metadata: EvictionMeta {
                name,
                namespace: self.namespace(),
            },
            delete_options: ep.delete_options.as_ref(),
        };
        Payload::serialize(&eviction)?.build(Method::POST, uri)
    }

    /// `GET` `pods/attach`
    pub fn attach(&self, name: &str, ap: &AttachParams) -> Result<http::Request<Vec<u8>>, Error> {
        Payload::Empty.build(Method::GET, self.uri(&[name, "attach"], ap)?)
    }

    /// `GET` `pods/exec` running `command`
    pub fn exec<I, T>(&self, name: &str, command: I, ap: &AttachParams) -> Result<http::Request<Vec<u8>>, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let params = ExecParams {
            attach: ap,
            command: command.into_iter().map(Into::into).collect(),
        };
        Payload::Empty.build(Method::GET, self.uri(&[name, "exec"], &params)?)
    }

    /// `GET` `pods/portforward`
    pub fn portforward(&self, name: &str, ports: &[u16]) -> Result<http::Request<Vec<u8>>, Error> {
        let params = PortforwardParams { ports: ports.to_vec() };
        Payload::Empty.build(Method::GET, self.uri(&[name, "portforward"], &params)?)
    }

    /// Any method through `{name}/proxy/{path}` of a pod, service or node
    ///
    /// `path` is split on `/` and each part encoded on its own. Empty parts are
    /// skipped and dot segments are refused. A non-empty body goes out as JSON.
    pub fn proxy<Q: QueryParams + ?Sized>(
        &self,
        method: Method,
        name: &str,
        path: &str,
        query: &Q,
        body: Vec<u8>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        let segments = [name, "proxy"]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()))
            .collect::<Vec<_>>();
        Payload::json(body).build(method, self.uri(&segments, query)?)
    }
}
