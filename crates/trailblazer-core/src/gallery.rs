//! Gallery page records and stale-response tracking.
//!
//! The gallery endpoint answers a page-number POST with
//! `{"data": [{id, name, date, caption}, ...]}`, newest first. The
//! client rebuilds the grid from scratch on every page change -- no
//! caching.
//!
//! Responses can arrive out of order when the user clicks page
//! indicators faster than the network answers. [`PageTracker`] gives
//! every request a sequence number and admits only the most recently
//! issued one; stale responses are dropped instead of applied.

use serde::Deserialize;

/// One image record in a gallery page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryImage {
    /// Database identifier, used to link to the image detail page.
    pub id: i64,
    /// Thumbnail path relative to the media root.
    pub name: String,
    /// Observation start time, preformatted by the server.
    pub date: String,
    /// Telescope name shown under the thumbnail.
    pub caption: String,
}

/// A decoded gallery query response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryResponse {
    /// Image records in server order (newest first).
    pub data: Vec<GalleryImage>,
}

/// Errors decoding a gallery query response.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// The response body did not match the expected shape.
    #[error("gallery response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl GalleryResponse {
    /// Decode a gallery query response body.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::InvalidJson`] when the body is not the
    /// expected `{"data": [...]}` shape.
    pub fn from_json(body: &str) -> Result<Self, GalleryError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Sequence-number guard against out-of-order page responses.
///
/// `begin` hands out a ticket per request; `accept` admits a ticket
/// only while it is still the newest one issued. Exactly one page
/// indicator is active at a time, reflecting the last *accepted*
/// response, which keeps a fast double-click from leaving the grid
/// showing one page with another page's indicator lit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTracker {
    next_seq: u64,
    latest: Option<(u64, u32)>,
    active: u32,
}

impl PageTracker {
    /// Create a tracker with page 0 active (the server renders page 0
    /// into the initial document).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_seq: 0,
            latest: None,
            active: 0,
        }
    }

    /// Register a request for `page`, returning its ticket.
    ///
    /// Issuing a new ticket invalidates all earlier ones.
    pub fn begin(&mut self, page: u32) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest = Some((seq, page));
        seq
    }

    /// Admit the response for ticket `seq`.
    ///
    /// Returns the page to activate when the ticket is still current,
    /// or `None` when a newer request has superseded it and the
    /// response must be discarded.
    pub fn accept(&mut self, seq: u64) -> Option<u32> {
        match self.latest {
            Some((latest_seq, page)) if latest_seq == seq => {
                self.active = page;
                Some(page)
            }
            _ => None,
        }
    }

    /// The page whose indicator is currently active.
    #[must_use]
    pub const fn active_page(&self) -> u32 {
        self.active
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decodes_image_records() {
        let body = r#"{"data": [
            {"id": 7, "name": "thumbs/small_7.jpg", "date": "2021-11-02", "caption": "VATT"},
            {"id": 3, "name": "thumbs/small_3.jpg", "date": "2021-10-30", "caption": "LDT"}
        ]}"#;
        let response = GalleryResponse::from_json(body).unwrap();
        assert_eq!(response.data.len(), 2);
        assert!(matches!(
            response.data.first(),
            Some(img) if img.id == 7 && img.caption == "VATT"
        ));
    }

    #[test]
    fn empty_page_decodes() {
        let response = GalleryResponse::from_json(r#"{"data": []}"#).unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(
            GalleryResponse::from_json("<html>"),
            Err(GalleryError::InvalidJson(_))
        ));
    }

    #[test]
    fn accept_in_order_activates_requested_page() {
        let mut tracker = PageTracker::new();
        assert_eq!(tracker.active_page(), 0);

        let seq = tracker.begin(3);
        assert_eq!(tracker.accept(seq), Some(3));
        assert_eq!(tracker.active_page(), 3);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut tracker = PageTracker::new();
        let first = tracker.begin(1);
        let second = tracker.begin(2);

        // The page-2 response lands first and wins.
        assert_eq!(tracker.accept(second), Some(2));
        // The page-1 response arrives late and must be discarded.
        assert_eq!(tracker.accept(first), None);
        assert_eq!(tracker.active_page(), 2);
    }

    #[test]
    fn duplicate_accept_of_current_ticket_is_idempotent() {
        let mut tracker = PageTracker::new();
        let seq = tracker.begin(5);
        assert_eq!(tracker.accept(seq), Some(5));
        assert_eq!(tracker.accept(seq), Some(5));
        assert_eq!(tracker.active_page(), 5);
    }
}
