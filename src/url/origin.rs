use crate::{UrlError, UrlResult};
use url::Url;

/// Returns the `scheme://host[:port]` prefix of a URL
///
/// The port is only included when it differs from the scheme's default,
/// matching how browsers render `location.protocol + "//" + location.host`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use fashionhub_e2e::url::origin_of;
///
/// let url = Url::parse("https://example.com/shop/index.html").unwrap();
/// assert_eq!(origin_of(&url).unwrap(), "https://example.com");
///
/// let url = Url::parse("http://localhost:4000/fashionhub/").unwrap();
/// assert_eq!(origin_of(&url).unwrap(), "http://localhost:4000");
/// ```
pub fn origin_of(url: &Url) -> UrlResult<String> {
    let host = url
        .host_str()
        .ok_or_else(|| UrlError::MissingHost(url.to_string()))?;

    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}
