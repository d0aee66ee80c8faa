//! Session cookie access for CSRF tokens.
//!
//! Django stores the CSRF token in a visible `csrftoken` cookie; every
//! state-changing request must echo it back in an `X-CSRFToken`
//! header. The parser is split out from the DOM access so it can be
//! unit tested without a browser.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Name of the cookie Django stores the CSRF token in.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Errors reading the CSRF token.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// A browser API call returned an error or a required object was
    /// missing.
    #[error("browser API error: {0}")]
    JsError(String),
    /// The session cookie is absent (e.g. the user has no session yet).
    #[error("cookie {0:?} not set")]
    Missing(&'static str),
}

impl From<JsValue> for CookieError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Read the CSRF token from `document.cookie`.
///
/// # Errors
///
/// Returns [`CookieError::JsError`] when the window or document is
/// unavailable, or [`CookieError::Missing`] when no `csrftoken` cookie
/// is set.
pub fn csrf_token() -> Result<String, CookieError> {
    let window = web_sys::window().ok_or_else(|| CookieError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| CookieError::JsError("no document".into()))?;
    let document: web_sys::HtmlDocument = document
        .dyn_into()
        .map_err(|_| CookieError::JsError("document is not an HtmlDocument".into()))?;
    let cookies = document.cookie()?;
    token_from_cookie_header(&cookies, CSRF_COOKIE).ok_or(CookieError::Missing(CSRF_COOKIE))
}

/// Extract a named cookie value from a `document.cookie` string.
///
/// Cookie pairs are `; `-separated; values may themselves contain `=`
/// so only the first `=` splits name from value.
#[must_use]
pub fn token_from_cookie_header(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_token_among_other_cookies() {
        let header = "sessionid=abc123; csrftoken=tok-456; theme=dark";
        assert_eq!(
            token_from_cookie_header(header, "csrftoken").as_deref(),
            Some("tok-456")
        );
    }

    #[test]
    fn missing_cookie_returns_none() {
        assert_eq!(token_from_cookie_header("sessionid=abc", "csrftoken"), None);
        assert_eq!(token_from_cookie_header("", "csrftoken"), None);
    }

    #[test]
    fn value_containing_equals_is_kept_whole() {
        let header = "csrftoken=a=b=c";
        assert_eq!(
            token_from_cookie_header(header, "csrftoken").as_deref(),
            Some("a=b=c")
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let header = "theme=dark;  csrftoken=tok ";
        assert_eq!(
            token_from_cookie_header(header, "csrftoken").as_deref(),
            Some("tok")
        );
    }

    #[test]
    fn name_must_match_exactly() {
        assert_eq!(token_from_cookie_header("xcsrftoken=t", "csrftoken"), None);
        assert_eq!(token_from_cookie_header("csrftoken2=t", "csrftoken"), None);
    }
}
