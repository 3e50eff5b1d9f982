use url::Url;

/// Resolves a raw `href` into an absolute page URL
///
/// # Normalization Steps
///
/// 1. Trim whitespace; reject empty hrefs
/// 2. Reject fragment-only hrefs (same page anchors)
/// 3. Reject `javascript:`, `mailto:`, `tel:` and `data:` targets
/// 4. Join against the base URL
/// 5. Reject anything that is not HTTP(S) after resolution
/// 6. Remove the fragment so `/page` and `/page#section` are one page
///
/// # Arguments
///
/// * `href` - The attribute value as found in the markup
/// * `base` - The URL relative links are resolved against
///
/// # Returns
///
/// The absolute URL, or `None` if the href does not point at a crawlable page
///
/// # Examples
///
/// ```
/// use docs_mirror::url::normalize_link;
/// use url::Url;
///
/// let base = Url::parse("https://ai.google.dev").unwrap();
/// let url = normalize_link("/gemini-api/docs/models#overview", &base).unwrap();
/// assert_eq!(url.as_str(), "https://ai.google.dev/gemini-api/docs/models");
/// ```
pub fn normalize_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}

/// Returns true if `url` has exactly the same origin (scheme, host, port) as `base`
///
/// A plain string prefix check would let `https://ai.google.dev.example.com`
/// through, so origins are compared structurally.
pub fn is_same_origin(url: &Url, base: &Url) -> bool {
    url.origin() == base.origin()
}
