use url::Url;

/// Extracts the domain (network location) from a URL
///
/// The domain is the lowercase host followed by `:port` when the URL names a
/// port other than its scheme's default. Two URLs belong to the same crawl
/// scope exactly when their domains are equal.
///
/// # Returns
///
/// * `Some(String)` - The domain
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use keyword_scout::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    if host.is_empty() {
        return None;
    }

    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Returns true if the URL has both a scheme and a network location
pub fn is_valid_url(url: &Url) -> bool {
    !url.scheme().is_empty() && extract_domain(url).is_some()
}

/// Parses a URL string and extracts its domain in one step
pub fn domain_of(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(extract_domain)
}
