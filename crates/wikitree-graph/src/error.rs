//! Error types surfaced by node loads and graph construction.

use thiserror::Error;

/// Failure to retrieve a document from the fetch collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Errors produced while resolving microdata into entity nodes.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The document could not be fetched. Never retried by the resolver.
    #[error(transparent)]
    Transport(#[from] FetchError),

    /// The fetched page carries no top-level microdata item.
    #[error("no microdata items found at {url}")]
    NoMicrodata { url: String },

    /// A type-tagged reference has no usable `url` property.
    #[error("reference of type {type_uri} has no url property")]
    MalformedReference { type_uri: String },

    /// The attribute is absent from a loaded node.
    #[error("{url} has no attribute '{name}'")]
    UnknownAttribute { name: String, url: String },

    /// A node identity that does not parse as a URL. Only raised at load time.
    #[error("invalid entity url: {url}")]
    InvalidUrl { url: String },

    /// Configuration could not be read or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T, E = ResolveError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ResolveError::from(FetchError::Status {
            url: "https://www.wikitree.com/wiki/X-1".to_string(),
            status: 404,
        });
        assert_eq!(
            err.to_string(),
            "https://www.wikitree.com/wiki/X-1 returned HTTP 404"
        );
        assert!(matches!(err, ResolveError::Transport(_)));
    }

    #[test]
    fn test_unknown_attribute_message() {
        let err = ResolveError::UnknownAttribute {
            name: "nickname".to_string(),
            url: "https://www.wikitree.com/wiki/X-1".to_string(),
        };
        assert!(err.to_string().contains("'nickname'"));
    }
}
