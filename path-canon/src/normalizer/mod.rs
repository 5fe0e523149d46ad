//! Lexical URL path cleaning.
//!
//! Produces the canonical absolute form of a path: exactly one leading `/`,
//! no empty segments, no `.` segments and no `..` that can be resolved. `..`
//! at the root is dropped. A trailing `/` is kept, and a trailing `.` segment
//! turns into one (`/a/.` becomes `/a/`).
//!
//! Nothing is decoded or validated; the input is treated as bytes and only
//! `/` and `.` carry meaning. The result borrows from the input whenever the
//! canonical form is a prefix of it, so already-clean paths cost no
//! allocation.
//!
//! ```
//! use path_canon::normalize_str;
//!
//! assert_eq!(normalize_str("/a/b/../c"), "/a/c");
//! assert_eq!(normalize_str("abc"), "/abc");
//! assert_eq!(normalize_str("/../../a"), "/a");
//! ```

mod buffer;
mod engine;

use std::borrow::Cow;

pub use buffer::INLINE_CAPACITY;

/// Canonical form of `path`.
pub fn normalize(path: &[u8]) -> Cow<'_, [u8]> {
    if path.is_empty() {
        return Cow::Borrowed(b"/");
    }
    engine::clean(path)
}

/// [`normalize`] for text. Cut points always sit next to a `/` or at the end
/// of a segment, so valid UTF-8 stays valid.
pub fn normalize_str(path: &str) -> Cow<'_, str> {
    if path.is_empty() {
        return Cow::Borrowed("/");
    }
    match engine::clean(path.as_bytes()) {
        Cow::Borrowed(b) => match path.get(..b.len()) {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(String::from_utf8_lossy(b).into_owned()),
        },
        Cow::Owned(v) => match String::from_utf8(v) {
            Ok(s) => Cow::Owned(s),
            Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        },
    }
}

/// Whether `path` is already in canonical form.
pub fn is_canonical(path: &[u8]) -> bool {
    *normalize(path) == *path
}

/// Where a router should send a request for `path`, or `None` when the path
/// is already canonical.
pub fn redirect_target(path: &str) -> Option<Cow<'_, str>> {
    let clean = normalize_str(path);
    if clean == path { None } else { Some(clean) }
}

pub struct Normalizer;

impl Normalizer {
    #[tracing::instrument(level = "trace", skip(raw), fields(path_len = raw.len() as u64))]
    pub fn normalize_path(raw: &str) -> String {
        match normalize_str(raw) {
            Cow::Borrowed(s) if s.len() == raw.len() => s.to_string(),
            clean => {
                tracing::trace!(raw, clean = %clean, "path rewritten");
                clean.into_owned()
            }
        }
    }
}
