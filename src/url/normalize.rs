use crate::UrlError;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

/// A URL in canonical form, used as the crawl's dedup key
///
/// Two spellings of the same page (differing only by fragment or trailing
/// slashes) produce equal `NormalizedUrl`s. Values can only be created through
/// [`normalize`] or [`normalize_url`], so every instance is already canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedUrl(Url);

impl NormalizedUrl {
    /// Returns the canonical string form
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the underlying parsed URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for NormalizedUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Resolves `raw` against `base` and normalizes the result
///
/// # Normalization Steps
///
/// 1. Resolve `raw` as a (possibly relative) reference against `base`
/// 2. Reject non-HTTP(S) schemes and URLs without a host
/// 3. Remove the fragment (everything after #)
/// 4. Remove trailing slashes from the path (the root path `/` is kept)
/// 5. Remove an empty query string (trailing ?); a non-empty query is kept as-is
///
/// Host lowercasing, default port removal and dot-segment removal are already
/// performed by the `url` parser.
///
/// # Arguments
///
/// * `raw` - The URL or relative reference to normalize
/// * `base` - The URL that relative references are resolved against
///
/// # Returns
///
/// * `Ok(NormalizedUrl)` - The canonical dedup key
/// * `Err(UrlError)` - The input could not be parsed or is not crawlable
///
/// # Examples
///
/// ```
/// use sumi_linkcheck::url::normalize;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// let url = normalize("guide/#intro", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs/guide");
/// ```
pub fn normalize(raw: &str, base: &Url) -> Result<NormalizedUrl, UrlError> {
    let resolved = base
        .join(raw.trim())
        .map_err(|e| UrlError::Parse(format!("'{}': {}", raw, e)))?;
    normalize_url(&resolved)
}

/// Normalizes an already-absolute URL
///
/// See [`normalize`] for the rules applied.
pub fn normalize_url(url: &Url) -> Result<NormalizedUrl, UrlError> {
    check_crawlable(url)?;

    let mut url = url.clone();
    url.set_fragment(None);

    let path = strip_trailing_slashes(url.path()).to_string();
    url.set_path(&path);

    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(NormalizedUrl(url))
}

/// Parses a seed URL supplied by the user
///
/// Unlike [`normalize`], relative references are rejected: the seed has nothing
/// to be resolved against and defines the crawl's domain boundary.
///
/// # Examples
///
/// ```
/// use sumi_linkcheck::url::parse_seed;
///
/// assert!(parse_seed("https://example.com").is_ok());
/// assert!(parse_seed("example.com/page").is_err());
/// ```
pub fn parse_seed(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("'{}': {}", raw, e)))?;
    check_crawlable(&url)?;
    Ok(url)
}

fn check_crawlable(url: &Url) -> Result<(), UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlError::MissingDomain),
    }
}

/// Removes trailing slashes unless the path is the root
fn strip_trailing_slashes(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
