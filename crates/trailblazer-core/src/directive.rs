//! Server directive decoding.
//!
//! After a successful upload POST the server answers with a JSON
//! object telling the client how to update the page: swap the upload
//! region's markup for server-rendered HTML, or navigate elsewhere.
//! Some server versions wrap the object in a one-element array; both
//! shapes are accepted.

use serde::Deserialize;

/// The server's instruction for updating the page after a submission.
///
/// Consumed once and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ServerDirective {
    /// Replace the upload region's markup with server-rendered HTML.
    /// The client must tear down and rebind all handlers afterwards.
    Replace {
        /// Replacement markup for the region.
        html: String,
    },
    /// Navigate the browser to the given location.
    Redirect {
        /// Target URL.
        url: String,
    },
}

/// Errors decoding a server response into a [`ServerDirective`].
///
/// An unrecognized `action` is a hard error, never a silent no-op --
/// the user must learn that the upload finished but the page could not
/// be updated.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// The response body was not valid JSON.
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The response was an array with no elements.
    #[error("response array is empty")]
    EmptyResponse,
    /// The `action` field was missing or not a string.
    #[error("response has no \"action\" field")]
    MissingAction,
    /// The `action` value is not one the client understands.
    #[error("unrecognized server action: {0:?}")]
    UnrecognizedAction(String),
    /// A known action was missing its payload field.
    #[error("malformed {action:?} directive: {source}")]
    MalformedPayload {
        /// The recognized action whose payload failed to decode.
        action: String,
        /// The underlying decode error.
        source: serde_json::Error,
    },
}

impl ServerDirective {
    /// Decode a submit response body.
    ///
    /// Accepts either a bare directive object or an array whose first
    /// element is the directive (trailing elements are ignored).
    ///
    /// # Errors
    ///
    /// Returns a [`DirectiveError`] for malformed JSON, an empty
    /// array, a missing or unrecognized `action`, or a recognized
    /// action missing its payload.
    pub fn from_json(body: &str) -> Result<Self, DirectiveError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        let object = match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .next()
                .ok_or(DirectiveError::EmptyResponse)?,
            other => other,
        };

        let action = object
            .get("action")
            .and_then(serde_json::Value::as_str)
            .ok_or(DirectiveError::MissingAction)?;
        if action != "replace" && action != "redirect" {
            return Err(DirectiveError::UnrecognizedAction(action.to_owned()));
        }
        let action = action.to_owned();

        serde_json::from_value(object)
            .map_err(|source| DirectiveError::MalformedPayload { action, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_replace_directive() {
        let body = r#"{"action": "replace", "html": "<form></form>"}"#;
        let directive = ServerDirective::from_json(body);
        assert!(matches!(
            directive,
            Ok(ServerDirective::Replace { html }) if html == "<form></form>"
        ));
    }

    #[test]
    fn decodes_redirect_directive() {
        let body = r#"{"action": "redirect", "url": "/gallery/"}"#;
        let directive = ServerDirective::from_json(body);
        assert!(matches!(
            directive,
            Ok(ServerDirective::Redirect { url }) if url == "/gallery/"
        ));
    }

    #[test]
    fn unwraps_array_response() {
        let body = r#"[{"action": "redirect", "url": "/done/"}, {"ignored": true}]"#;
        let directive = ServerDirective::from_json(body);
        assert!(matches!(
            directive,
            Ok(ServerDirective::Redirect { url }) if url == "/done/"
        ));
    }

    #[test]
    fn empty_array_is_an_error() {
        assert!(matches!(
            ServerDirective::from_json("[]"),
            Err(DirectiveError::EmptyResponse)
        ));
    }

    #[test]
    fn unrecognized_action_is_an_error() {
        let body = r#"{"action": "reload"}"#;
        assert!(matches!(
            ServerDirective::from_json(body),
            Err(DirectiveError::UnrecognizedAction(a)) if a == "reload"
        ));
    }

    #[test]
    fn missing_action_is_an_error() {
        assert!(matches!(
            ServerDirective::from_json(r#"{"html": "<p></p>"}"#),
            Err(DirectiveError::MissingAction)
        ));
    }

    #[test]
    fn recognized_action_without_payload_is_an_error() {
        let body = r#"{"action": "replace"}"#;
        assert!(matches!(
            ServerDirective::from_json(body),
            Err(DirectiveError::MalformedPayload { action, .. }) if action == "replace"
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            ServerDirective::from_json("not json"),
            Err(DirectiveError::InvalidJson(_))
        ));
    }
}
