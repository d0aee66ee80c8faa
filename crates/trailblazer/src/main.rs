//! Trailblazer web client entry point.
//!
//! Composes the upload widget and the paginated gallery. Both
//! components are constructed per instance with their own state, so
//! additional upload regions could be mounted on the same page without
//! sharing a file list.

use dioxus::prelude::*;
use trailblazer_io::{Gallery, UploadWidget};

mod config;

use config::AppConfig;

fn main() {
    dioxus::launch(app);
}

/// Root application component.
fn app() -> Element {
    let config = AppConfig::from_window();

    rsx! {
        div { class: "min-h-screen bg-[var(--bg)] text-[var(--text)]",
            header { class: "px-6 py-4 border-b border-[var(--border-muted)]",
                h1 { class: "text-2xl font-semibold", "Trailblazer" }
                p { class: "text-[var(--text-secondary)] text-sm",
                    "Upload telescope images with satellite streaks and browse the archive."
                }
            }

            main { class: "p-6 space-y-10",
                section {
                    h2 { class: "text-lg font-medium mb-3", "Upload FITS images" }
                    UploadWidget {
                        action_url: config.upload_url.clone(),
                        limits: config.limits,
                    }
                }

                section {
                    h2 { class: "text-lg font-medium mb-3", "Gallery" }
                    Gallery {
                        query_url: config.gallery_url.clone(),
                        page_count: config.gallery_page_count,
                    }
                }
            }
        }
    }
}
