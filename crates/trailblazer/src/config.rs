//! Application configuration with host-page overrides.
//!
//! The host page can set `window.TRAILBLAZER_*` globals before the
//! WASM module loads to override the defaults (e.g. the server renders
//! its configured size limit into a `<script>` tag). Absent or
//! malformed globals silently fall back to the defaults.

use trailblazer_core::UploadLimits;
use wasm_bindgen::JsValue;

/// Runtime configuration for the trailblazer client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Client-side upload size limit.
    pub limits: UploadLimits,
    /// Endpoint the upload form POSTs to.
    pub upload_url: String,
    /// Endpoint gallery page queries POST to.
    pub gallery_url: String,
    /// Number of gallery pages to offer indicators for.
    pub gallery_page_count: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            limits: UploadLimits::default(),
            upload_url: "/upload/".to_owned(),
            gallery_url: "/gallery/".to_owned(),
            gallery_page_count: 1,
        }
    }
}

impl AppConfig {
    /// Build the configuration, applying any `window.TRAILBLAZER_*`
    /// overrides the host page has set.
    #[must_use]
    pub fn from_window() -> Self {
        let mut config = Self::default();
        if let Some(limit) = window_number("TRAILBLAZER_MAX_FILE_SIZE_MB") {
            #[allow(clippy::cast_possible_truncation)] // whole megabytes
            let limit = limit.trunc() as i64;
            config.limits.max_file_size_mb = limit;
        }
        if let Some(pages) = window_number("TRAILBLAZER_GALLERY_PAGE_COUNT") {
            if pages >= 0.0 {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                // page counts are small positive integers
                let pages = pages.trunc() as u32;
                config.gallery_page_count = pages;
            }
        }
        if let Some(url) = window_string("TRAILBLAZER_UPLOAD_URL") {
            config.upload_url = url;
        }
        if let Some(url) = window_string("TRAILBLAZER_GALLERY_URL") {
            config.gallery_url = url;
        }
        config
    }
}

/// Read a numeric global from `window`, if present.
fn window_number(name: &str) -> Option<f64> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()?
        .as_f64()
}

/// Read a string global from `window`, if present.
fn window_string(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()?
        .as_string()
}
