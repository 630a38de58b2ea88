//! The [`Client`]: sends requests built by `kubeapi_core` and decodes the answers
//!
//! Connection handling, TLS, authentication and configuration come from
//! `kube_client`; this layer adds answer decoding, `Status` detection, watch line
//! framing and dispatch of catalogue operations by id ([`Client::call`]).
use std::io;

use bytes::Bytes;
use either::{Either, Left, Right};
use futures::{Stream, StreamExt, TryStreamExt};
use http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use kubeapi_core::{response::Status, ErrorResponse, WatchEvent};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::{
    codec::{FramedRead, LinesCodec, LinesCodecError},
    io::StreamReader,
};
use tower::{BoxError, Service};

use crate::{Config, Error, Result};

mod operations;
pub use operations::OperationId;

#[cfg(test)] pub(crate) mod fake;

pub use kube_client::client::Body;

/// A cheaply cloneable handle on one cluster
///
/// Build it from the environment with [`Client::try_default`], from a
/// [`Config`] with `Client::try_from`, or around any `tower` service with
/// [`Client::new`].
#[derive(Clone)]
pub struct Client {
    inner: kube_client::Client,
    default_namespace: String,
}

impl Client {
    /// Wrap a service that answers apiserver requests
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new<S, B, T>(service: S, default_namespace: T) -> Self
    where
        S: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
        T: Into<String>,
    {
        let default_namespace = default_namespace.into();
        Client {
            inner: kube_client::Client::new(service, default_namespace.clone()),
            default_namespace,
        }
    }

    /// Connect with the local kubeconfig, or else the in-cluster environment
    pub async fn try_default() -> Result<Self> {
        Self::try_from(Config::infer().await.map_err(Error::InferConfig)?)
    }

    /// Namespace of the kubeconfig context or service account; `default` otherwise
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Send a request and return the answer untouched, whatever its status
    pub async fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Body>> {
        tracing::trace!(method = %request.method(), uri = %request.uri(), "sending");
        self.inner.send(request.map(Body::from)).await.map_err(Error::Transport)
    }

    /// Send a request and decode the JSON answer
    pub async fn request<T: DeserializeOwned>(&self, request: Request<Vec<u8>>) -> Result<T> {
        let text = self.request_text(request).await?;
        decode(&text)
    }

    /// Send a request and return the answer as text
    pub async fn request_text(&self, request: Request<Vec<u8>>) -> Result<String> {
        let res = self.send(request).await?;
        let status = res.status();
        let text = read_text(res.into_body()).await?;
        if is_failure(status) {
            return Err(api_error(status, &text));
        }
        Ok(text)
    }

    /// Send a request and return the answer as a stream of chunks
    ///
    /// A failed answer is read whole and returned as [`Error::Api`].
    pub async fn request_stream(&self, request: Request<Vec<u8>>) -> Result<impl Stream<Item = Result<Bytes>>> {
        let body = self.successful(request).await?;
        Ok(body.into_data_stream().map_err(Error::Transport))
    }

    /// Send a request answered by either an object or a `Status`
    pub async fn request_status<T: DeserializeOwned>(&self, request: Request<Vec<u8>>) -> Result<Either<T, Status>> {
        let text = self.request_text(request).await?;
        let value: Value = serde_json::from_str(&text).map_err(Error::SerdeError)?;
        if value.get("kind").and_then(Value::as_str) == Some("Status") {
            tracing::trace!("status answer: {text}");
            serde_json::from_value(value).map(Right).map_err(Error::SerdeError)
        } else {
            serde_json::from_value(value).map(Left).map_err(Error::SerdeError)
        }
    }

    /// Send a watch request and decode its answer line by line
    ///
    /// The stream ends quietly when the server closes the watch or the read
    /// times out. Lines that are neither events nor a `Status` end in an error item.
    pub async fn request_events<T: DeserializeOwned>(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<impl Stream<Item = Result<WatchEvent<T>>>> {
        let body = self.successful(request).await?;
        let reader = StreamReader::new(body.into_data_stream().map_err(as_io_error));
        let lines = FramedRead::new(reader, LinesCodec::new());
        Ok(lines.filter_map(|line| async move {
            match line {
                Ok(line) => watch_line(&line),
                Err(LinesCodecError::Io(e)) if ends_watch(&e) => {
                    tracing::debug!("watch closed: {e}");
                    None
                }
                Err(LinesCodecError::Io(e)) => Some(Err(Error::ReadEvents(e))),
                Err(LinesCodecError::MaxLineLengthExceeded) => Some(Err(Error::LinesCodecMaxLineLengthExceeded)),
            }
        }))
    }

    async fn successful(&self, request: Request<Vec<u8>>) -> Result<Body> {
        let res = self.send(request).await?;
        let status = res.status();
        if is_failure(status) {
            let text = read_text(res.into_body()).await?;
            return Err(api_error(status, &text));
        }
        Ok(res.into_body())
    }
}

impl TryFrom<Config> for Client {
    type Error = Error;

    /// Connect with the default `kube_client` stack
    fn try_from(config: Config) -> Result<Self> {
        let default_namespace = config.default_namespace.clone();
        let inner = kube_client::Client::try_from(config).map_err(Error::Transport)?;
        Ok(Client {
            inner,
            default_namespace,
        })
    }
}

fn is_failure(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

async fn read_text(body: Body) -> Result<String> {
    let bytes = body.collect().await.map_err(Error::Transport)?.to_bytes();
    String::from_utf8(bytes.to_vec()).map_err(Error::FromUtf8)
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        tracing::warn!("undecodable answer {text}: {e}");
        Error::SerdeError(e)
    })
}

// A failed answer without a `Status` body still becomes an `ErrorResponse`
fn api_error(status: StatusCode, text: &str) -> Error {
    let response = serde_json::from_str::<ErrorResponse>(text).unwrap_or_else(|_| {
        tracing::warn!("failure without a status body: {text}");
        ErrorResponse {
            status: status.to_string(),
            message: format!("{text:?}"),
            reason: "Failed to parse error data".into(),
            code: status.as_u16(),
            details: None,
        }
    });
    tracing::debug!(code = response.code, reason = %response.reason, "apiserver failure");
    Error::Api(response)
}

fn watch_line<T: DeserializeOwned>(line: &str) -> Option<Result<WatchEvent<T>>> {
    match serde_json::from_str(line) {
        Ok(event) => Some(Ok(event)),
        // a blank or cut off final line
        Err(e) if e.is_eof() => None,
        Err(e) => Some(Err(match serde_json::from_str::<ErrorResponse>(line) {
            Ok(status) => Error::Api(status),
            Err(_) => Error::SerdeError(e),
        })),
    }
}

// Keep the kind of an io error found among the sources of a body error
fn as_io_error(err: kube_client::Error) -> io::Error {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(&err);
    while let Some(e) = source {
        if let Some(kind) = e.downcast_ref::<io::Error>().map(io::Error::kind) {
            return io::Error::new(kind, err);
        }
        source = e.source();
    }
    io::Error::other(err)
}

fn ends_watch(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::UnexpectedEof)
}
