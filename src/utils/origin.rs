use url::{Origin, Url};

const SCHEME_SEPARATOR: &str = "://";
const DEFAULT_SCHEME: &str = "https";

/// Parse an absolute URL.
///
/// Relative references such as `example.com/login` are rejected because
/// there is no base to resolve them against.
pub fn parse_url(input: &str) -> Option<Url> {
    Url::parse(input).ok()
}

/// Build the requesting origin from the text in front of the message header.
///
/// When the candidate carries no scheme, `https` is assumed. Candidates that
/// do not form a URL are rejected. Schemes without a tuple origin, such as
/// `chrome-extension://` or `ipfs://`, still resolve, to an opaque origin.
///
/// # Examples
///
/// ```
/// use siwe_inspector::utils::resolve_origin;
///
/// let origin = resolve_origin("example.com:3388").unwrap();
/// assert_eq!(origin.ascii_serialization(), "https://example.com:3388");
/// assert!(resolve_origin("example.com::3388").is_none());
/// ```
pub fn resolve_origin(candidate: &str) -> Option<Origin> {
    let url = if candidate.contains(SCHEME_SEPARATOR) {
        parse_url(candidate)?
    } else {
        parse_url(&format!("{}{}{}", DEFAULT_SCHEME, SCHEME_SEPARATOR, candidate))?
    };

    Some(url.origin())
}
