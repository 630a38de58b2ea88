//! Errors of the [`Client`](crate::Client) and [`Api`](crate::Api)
use thiserror::Error;

pub use kubeapi_core::ErrorResponse;

/// Everything that can go wrong between building a request and decoding its answer
#[derive(Error, Debug)]
pub enum Error {
    /// The apiserver answered with a failed `Status`
    ///
    /// Watch streams yield it for unparsable error lines too. A `410` means the
    /// watched resource version is too old.
    #[error("ApiError: {0} ({0:?})")]
    Api(#[source] ErrorResponse),

    /// Connecting, authenticating or reading a body failed
    #[error("transport error: {0}")]
    Transport(#[source] kube_client::Error),

    /// Neither the in-cluster environment nor a kubeconfig was usable
    #[error("failed to infer configuration: {0}")]
    InferConfig(#[source] kube_client::config::InferConfigError),

    /// A text body was not UTF-8
    #[error("UTF-8 error: {0}")]
    FromUtf8(#[source] std::string::FromUtf8Error),

    /// A watch line never ended
    #[error("watch line exceeds the maximum length")]
    LinesCodecMaxLineLengthExceeded,

    /// Reading a watch stream failed
    #[error("error reading events stream: {0}")]
    ReadEvents(#[source] std::io::Error),

    /// An answer did not decode into the expected type
    #[error("error deserializing response: {0}")]
    SerdeError(#[source] serde_json::Error),

    /// The request was rejected before sending
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] kubeapi_core::request::Error),

    /// Unknown operation id or path, or a request the operation does not take
    #[error("catalog error: {0}")]
    Catalog(#[source] kubeapi_core::catalog::Error),
}

impl From<kubeapi_core::request::Error> for Error {
    fn from(err: kubeapi_core::request::Error) -> Self {
        Error::BuildRequest(err)
    }
}

impl From<kubeapi_core::catalog::Error> for Error {
    fn from(err: kubeapi_core::catalog::Error) -> Self {
        match err {
            kubeapi_core::catalog::Error::Request(e) => Error::BuildRequest(e),
            other => Error::Catalog(other),
        }
    }
}

impl Error {
    /// The apiserver's failure, if this is one
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the apiserver answered `404`
    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(ErrorResponse::is_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use kubeapi_core::{catalog, request};

    #[test]
    fn catalog_request_errors_are_build_errors() {
        let err: Error = catalog::Error::Request(request::Error::Validation("bad".into())).into();
        assert!(matches!(err, Error::BuildRequest(_)));
        let err: Error = catalog::Error::UnknownOperation("x".into()).into();
        assert!(matches!(err, Error::Catalog(_)));
        assert!(!err.is_not_found());
    }
}
