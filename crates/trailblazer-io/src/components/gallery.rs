//! Paginated image gallery.
//!
//! Every page change POSTs the page number to the query endpoint and
//! rebuilds the grid from the response -- no caching. Responses that
//! arrive after a newer request has been issued are dropped via
//! [`PageTracker`], so a fast double-click cannot leave the grid and
//! the active indicator disagreeing.

use dioxus::prelude::*;
use trailblazer_core::{GalleryImage, GalleryResponse, PageTracker};

use crate::cookie;
use crate::request;

/// Props for the [`Gallery`] component.
#[derive(Props, Clone, PartialEq)]
pub struct GalleryProps {
    /// Endpoint the page-number POST goes to.
    pub query_url: String,
    /// Total number of pages, for the indicator row.
    pub page_count: u32,
}

/// Image gallery with page indicators.
///
/// Page 0 is fetched on mount. Exactly one indicator is active at a
/// time: the page of the most recently accepted response.
#[component]
pub fn Gallery(props: GalleryProps) -> Element {
    let mut tracker = use_signal(PageTracker::new);
    let mut images = use_signal(Vec::<GalleryImage>::new);
    let mut error = use_signal(|| Option::<String>::None);

    let query_url = props.query_url.clone();
    let request_page = use_callback(move |page: u32| {
        let query_url = query_url.clone();
        spawn(async move {
            let seq = tracker.write().begin(page);
            let token = cookie::csrf_token().unwrap_or_default();
            match request::post_page(&query_url, page, &token).await {
                Ok(body) => match GalleryResponse::from_json(&body) {
                    Ok(response) => {
                        // A newer request supersedes this one; apply
                        // the response only while it is still current.
                        if tracker.write().accept(seq).is_some() {
                            images.set(response.data);
                            error.set(None);
                        }
                    }
                    Err(e) => error.set(Some(e.to_string())),
                },
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    // Initial page load. Reads no signals, so it runs once on mount.
    use_effect(move || {
        request_page.call(0);
    });

    let active = tracker.read().active_page();

    rsx! {
        div { class: "max-w-4xl",

            if let Some(ref err) = error() {
                div {
                    class: "mb-3 p-3 rounded border border-[var(--border-error)]
                            text-[var(--text-error)] text-sm",
                    role: "alert",
                    "{err}"
                }
            }

            div { class: "grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4",
                for img in images() {
                    {render_tile(&img)}
                }
            }

            div { class: "flex flex-wrap gap-1 mt-4",
                for page in 0..props.page_count {
                    {render_indicator(page, active, &request_page)}
                }
            }
        }
    }
}

/// Render one page indicator button. The active page (and only it)
/// carries the `active` class and `aria-current`.
fn render_indicator(page: u32, active: u32, request_page: &Callback<u32>) -> Element {
    let label = page + 1;
    let is_active = page == active;
    let class = if is_active {
        "px-3 py-1 rounded bg-[var(--btn-primary)] text-white active"
    } else {
        "px-3 py-1 rounded bg-[var(--surface)] hover:bg-[var(--surface-active)] transition-colors"
    };
    let onclick = {
        let request_page = *request_page;
        move |_| request_page.call(page)
    };

    rsx! {
        button {
            r#type: "button",
            class: "{class}",
            aria_label: "Go to page {label}",
            "aria-current": if is_active { "page" } else { "false" },
            onclick: onclick,
            "{label}"
        }
    }
}

/// Render one gallery thumbnail tile.
fn render_tile(img: &GalleryImage) -> Element {
    rsx! {
        a {
            href: "/gallery/image?{img.id}",
            class: "block rounded overflow-hidden bg-[var(--surface)]
                    hover:bg-[var(--surface-active)] transition-colors",
            img {
                src: "/media/{img.name}",
                alt: "{img.caption}",
                class: "w-full aspect-square object-cover",
            }
            div { class: "p-2 text-sm",
                p { class: "font-medium", "{img.caption}" }
                p { class: "text-[var(--text-secondary)]", "{img.date}" }
            }
        }
    }
}
