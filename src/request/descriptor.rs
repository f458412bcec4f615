//! Verb-specific request construction.
//!
//! # Responsibilities
//! - Parse and hold the fully-resolved target URL
//! - Encode the payload the way each verb carries it (query string for GET,
//!   form body for POST, JSON body for PUT)
//!
//! # Design Decisions
//! - Builders are pure: no I/O, no side effects beyond the returned value
//! - GET query pairs are joined verbatim, without form-encoding keys or
//!   values; endpoints consumed through this layer rely on that
//! - An unparsable URI is the one error builders surface, and the caller is
//!   expected to propagate it rather than suppress it

use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use thiserror::Error;
use url::Url;

/// Key-value data attached to a request. Values travel in string form.
pub type Payload = BTreeMap<String, String>;

/// The verbs this layer issues. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building a descriptor.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The endpoint URI did not parse as an absolute URL.
    #[error("invalid endpoint URI '{uri}': {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    /// The payload could not be serialized as a JSON object.
    #[error("failed to encode payload as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A request resolved into the exact shape the transport needs.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestDescriptor {
    /// Descriptive form used in diagnostics, e.g.
    /// `<POST http://api.example.com/usage>`.
    pub fn summary(&self) -> String {
        format!("<{} {}>", self.method, self.url)
    }

    /// Path plus query component of the target, as sent on the wire.
    pub fn request_line(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }
}

/// Build a GET descriptor.
///
/// The payload replaces the URI's query component: pairs are rendered as
/// `key=value` joined by `&`, with no form-encoding applied. An empty
/// payload leaves the target without a query component.
pub fn get(uri: &str, payload: &Payload) -> Result<RequestDescriptor, BuildError> {
    let mut url = parse_uri(uri)?;

    if payload.is_empty() {
        url.set_query(None);
    } else {
        let query = payload
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&query));
    }

    Ok(RequestDescriptor {
        method: Method::Get,
        url,
        headers: HeaderMap::new(),
        body: None,
    })
}

/// Build a POST descriptor with the payload form-encoded as the body.
pub fn post(uri: &str, payload: &Payload) -> Result<RequestDescriptor, BuildError> {
    let url = parse_uri(uri)?;

    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(payload.iter())
        .finish();

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );

    Ok(RequestDescriptor {
        method: Method::Post,
        url,
        headers,
        body: Some(body),
    })
}

/// Build a PUT descriptor with the whole payload serialized as one JSON
/// object. Query-string semantics do not apply to PUT.
pub fn put(uri: &str, payload: &Payload) -> Result<RequestDescriptor, BuildError> {
    let url = parse_uri(uri)?;

    let body = serde_json::to_string(payload)?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(RequestDescriptor {
        method: Method::Put,
        url,
        headers,
        body: Some(body),
    })
}

fn parse_uri(uri: &str) -> Result<Url, BuildError> {
    Url::parse(uri).map_err(|source| BuildError::InvalidUri {
        uri: uri.to_string(),
        source,
    })
}
