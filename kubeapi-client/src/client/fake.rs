//! A stand-in apiserver that answers a fixed number of requests in order
use std::time::Duration;

use bytes::Bytes;
use futures::pin_mut;
use http::{header::CONTENT_TYPE, Method, Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tower_test::mock;

use super::{Body, OperationId};
use crate::Client;

/// A request as the apiserver received it
pub(crate) struct Seen {
    pub method: Method,
    pub uri: String,
    pub content_type: Option<String>,
    pub operation: Option<&'static str>,
    pub body: Bytes,
}

impl Seen {
    pub(crate) fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub(crate) fn json(status: u16, body: Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub(crate) fn text(status: u16, body: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

/// A failed `Status` answer
pub(crate) fn failure(code: u16, reason: &str, message: &str) -> Response<Body> {
    json(
        code,
        serde_json::json!({
            "kind": "Status", "apiVersion": "v1", "metadata": {},
            "status": "Failure", "message": message, "reason": reason, "code": code
        }),
    )
}

pub(crate) struct Apiserver(JoinHandle<()>);

impl Apiserver {
    /// Wait for every scripted request to arrive
    pub(crate) async fn done(self) {
        tokio::time::timeout(Duration::from_secs(5), self.0)
            .await
            .expect("apiserver still waiting for requests")
            .expect("apiserver assertion failed");
    }
}

/// A client whose apiserver passes request `n` to `answer(n, seen)`
pub(crate) fn serve<F>(requests: usize, mut answer: F) -> (Client, Apiserver)
where
    F: FnMut(usize, Seen) -> Response<Body> + Send + 'static,
{
    let (service, handle) = mock::pair::<Request<Body>, Response<Body>>();
    let task = tokio::spawn(async move {
        pin_mut!(handle);
        for n in 0..requests {
            let (request, reply) = handle
                .next_request()
                .await
                .unwrap_or_else(|| panic!("request {n} never sent"));
            let (parts, body) = request.into_parts();
            let seen = Seen {
                method: parts.method,
                uri: parts.uri.to_string(),
                content_type: parts
                    .headers
                    .get(CONTENT_TYPE)
                    .map(|v| v.to_str().unwrap().to_owned()),
                operation: parts.extensions.get::<OperationId>().map(|op| op.0),
                body: body.collect().await.unwrap().to_bytes(),
            };
            reply.send_response(answer(n, seen));
        }
    });
    (Client::new(service, "default"), Apiserver(task))
}

/// A client that must not send anything
pub(crate) fn idle() -> Client {
    serve(0, |_, _| unreachable!()).0
}
