use crate::url::origin::origin_of;
use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves an `href` against the URL of the page it was found on
///
/// # Resolution Rules
///
/// 1. `href` starts with `http` → already absolute, returned unchanged
/// 2. `href` starts with `/` → root-relative: origin of `base_url` + `href`
///    verbatim (no `..` normalization)
/// 3. Otherwise → RFC 3986 relative resolution against `base_url`
///
/// Query strings and fragments are kept as written.
///
/// # Arguments
///
/// * `href` - The raw attribute value
/// * `base_url` - Absolute URL of the page
///
/// # Returns
///
/// * `Ok(String)` - The absolute URL
/// * `Err(UrlError)` - `base_url` is not absolute, or the href cannot be joined
///
/// # Examples
///
/// ```
/// use fashionhub_e2e::url::resolve_url;
///
/// assert_eq!(
///     resolve_url("about.html", "https://x.com/a/").unwrap(),
///     "https://x.com/a/about.html"
/// );
/// assert_eq!(
///     resolve_url("/cart", "https://x.com/a/").unwrap(),
///     "https://x.com/cart"
/// );
/// ```
pub fn resolve_url(href: &str, base_url: &str) -> UrlResult<String> {
    if href.starts_with("http") {
        return Ok(href.to_string());
    }

    let base = Url::parse(base_url).map_err(|e| UrlError::Parse(format!("{}: {}", base_url, e)))?;

    if href.starts_with('/') {
        return Ok(format!("{}{}", origin_of(&base)?, href));
    }

    base.join(href)
        .map(|absolute| absolute.to_string())
        .map_err(|_| UrlError::Unresolvable {
            href: href.to_string(),
            base: base_url.to_string(),
        })
}

/// Resolves an `href` with plain RFC 3986 joining
///
/// Hrefs starting with `http` are kept; everything else, root-relative paths
/// included, goes through `Url::join` against `base_url`.
pub fn join_url(href: &str, base_url: &str) -> UrlResult<String> {
    if href.starts_with("http") {
        return Ok(href.to_string());
    }

    let base = Url::parse(base_url).map_err(|e| UrlError::Parse(format!("{}: {}", base_url, e)))?;

    base.join(href)
        .map(|absolute| absolute.to_string())
        .map_err(|_| UrlError::Unresolvable {
            href: href.to_string(),
            base: base_url.to_string(),
        })
}

/// Drops the query string and fragment of a URL
///
/// Used to compare page locations and to keep submitted form values out of
/// logs.
pub fn without_query(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or(url)
            .to_string(),
    }
}
