use percent_encoding::percent_decode_str;
use reqwest::Method;

/// Cookie the server stores its anti-forgery token under.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Header the token is echoed back in on state-changing requests.
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Looks up a value in cookie-pair text (`name=value; other=value`).
///
/// First match wins, values are percent-decoded, malformed pairs are skipped.
pub fn cookie_value(cookie_text: &str, name: &str) -> Option<String> {
    for pair in cookie_text.split(';') {
        let Some((key, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if key == name {
            return Some(percent_decode_str(value).decode_utf8_lossy().into_owned());
        }
    }
    None
}

/// Reads the CSRF token out of stored cookie text. Read once at startup;
/// `None` means the header is simply omitted and the server will reject.
pub fn csrf_token(cookie_text: &str) -> Option<String> {
    cookie_value(cookie_text, CSRF_COOKIE_NAME)
}

/// These HTTP methods do not require CSRF protection.
pub fn csrf_safe_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}
