use http::Uri;
use thiserror::Error;

use crate::normalizer::Normalizer;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request target {target:?}")]
    InvalidUri {
        target: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("request target is not valid UTF-8")]
    NotUtf8,
}

/// Path of a request target in canonical form. The query is carried along
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    pub path: String,
    pub query: Option<String>,
    /// The raw path differed from `path`.
    pub rewritten: bool,
}

impl RequestPath {
    /// `path` with `?query` appended when present.
    pub fn to_target(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }
}

/// Accepts origin-form (`/p?q`) and absolute-form (`http://h/p?q`) targets.
pub fn normalize_target(target: &str) -> Result<RequestPath, RequestError> {
    let uri: Uri = target.parse().map_err(|source| RequestError::InvalidUri {
        target: target.to_string(),
        source,
    })?;

    // Empty for authority-form targets (`host:port`); that cleans to "/".
    let raw_path = uri.path();
    let path = Normalizer::normalize_path(raw_path);
    let rewritten = path != raw_path;

    Ok(RequestPath {
        path,
        query: uri.query().map(|q| q.to_string()),
        rewritten,
    })
}

/// [`normalize_target`] for raw bytes off the wire.
pub fn normalize_target_bytes(target: &[u8]) -> Result<RequestPath, RequestError> {
    let target = std::str::from_utf8(target).map_err(|_| RequestError::NotUtf8)?;
    normalize_target(target)
}
