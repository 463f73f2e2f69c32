use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_linkcheck::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if `candidate` lives on the same host authority as `seed`
///
/// Host and explicit port must match exactly. The scheme is ignored, so an
/// `http` link on an `https` site still counts as same-domain, but subdomains
/// never do.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_linkcheck::url::same_authority;
///
/// let seed = Url::parse("https://example.com/").unwrap();
/// assert!(same_authority(&seed, &Url::parse("http://example.com/a").unwrap()));
/// assert!(!same_authority(&seed, &Url::parse("https://blog.example.com/").unwrap()));
/// ```
pub fn same_authority(seed: &Url, candidate: &Url) -> bool {
    match (extract_domain(seed), extract_domain(candidate)) {
        (Some(a), Some(b)) => a == b && seed.port() == candidate.port(),
        _ => false,
    }
}
