//! Upload widget: drag-and-drop staging, validation, and progress-
//! tracked multipart submission.
//!
//! Each widget instance owns its staged-file state, so several
//! independent upload regions can coexist on one page. After a
//! successful submission the server sends back a directive: `replace`
//! swaps in server-rendered report markup and remounts the interactive
//! region (rebinding every handler against fresh nodes), `redirect`
//! navigates away.

use std::collections::HashMap;

use dioxus::html::{FileData, FormValue, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use trailblazer_core::progress::WAIT_NOTICE_PERCENT;
use trailblazer_core::{
    FileListStore, RejectedFile, ServerDirective, StagedFile, UploadLimits, stage_batch,
};

use crate::components::FileTable;
use crate::cookie;
use crate::request::{self, UploadPart};

/// Props for the [`UploadWidget`] component.
#[derive(Props, Clone, PartialEq)]
pub struct UploadWidgetProps {
    /// URL the multipart submission is POSTed to.
    pub action_url: String,
    /// Client-side file size limits.
    pub limits: UploadLimits,
}

/// Drag-and-drop upload region with staged-file table, per-file
/// validation alerts, and an upload progress bar.
///
/// Dropped or picked files are validated independently; valid files
/// are staged (re-adding a filename replaces the prior entry), invalid
/// ones are listed with their reasons in the alert area. Submission
/// sends one multipart POST carrying every named form field plus all
/// staged files, with the CSRF token from the session cookie.
#[component]
#[allow(clippy::too_many_lines)]
pub fn UploadWidget(props: UploadWidgetProps) -> Element {
    let mut store = use_signal(FileListStore::new);
    // Browser file handles for the staged entries, keyed by filename.
    // Bytes are read lazily at submit time.
    let mut handles = use_signal(HashMap::<String, FileData>::new);
    let mut rejected = use_signal(Vec::<RejectedFile>::new);
    let mut dragging = use_signal(|| false);
    let mut uploading = use_signal(|| false);
    let mut progress = use_signal(|| 0.0f64);
    let mut error = use_signal(|| Option::<String>::None);
    // Server-rendered report markup from the last `replace` directive.
    let mut report_html = use_signal(|| Option::<String>::None);
    // Bumped on every `replace` so the interactive region remounts
    // under a fresh key, discarding old nodes and their listeners.
    let mut generation = use_signal(|| 0u64);

    // Validate and stage a batch of dropped/picked files. Shared by
    // the drop and file-picker paths; the display refreshes once per
    // batch when the signals settle.
    let limits = props.limits;
    let mut stage_files = move |files: Vec<FileData>| {
        let candidates: Vec<StagedFile> = files
            .iter()
            .map(|f| StagedFile::new(f.name(), f.size(), f.content_type().unwrap_or_default()))
            .collect();
        let batch_rejected = {
            let mut store = store.write();
            stage_batch(&mut store, candidates, limits)
        };
        {
            let mut handles = handles.write();
            for file in files {
                let name = file.name();
                if batch_rejected.iter().all(|r| r.name != name) {
                    handles.insert(name, file);
                }
            }
        }
        rejected.set(batch_rejected);
    };

    let on_remove = move |name: String| {
        store.write().remove_by_name(&name);
        handles.write().remove(&name);
    };

    let on_clear = move |()| {
        store.write().clear();
        handles.write().clear();
        rejected.set(Vec::new());
    };

    // Submit: serialize fields + staged files into one multipart POST.
    // Zero staged files still submits; the server decides what that
    // means. One submission per widget is assumed; the button is
    // disabled while one is in flight.
    let action_url = props.action_url.clone();
    let on_submit = move |evt: FormEvent| {
        let action_url = action_url.clone();
        async move {
            evt.prevent_default();
            if *uploading.peek() {
                return;
            }
            uploading.set(true);
            progress.set(0.0);
            error.set(None);

            // Every named field in the form except the file input,
            // whose contents travel as blobs below.
            let fields: Vec<(String, String)> = evt
                .values()
                .into_iter()
                .filter(|(name, _)| name != "files")
                .map(|(name, value)| {
                    let value = match value {
                        FormValue::Text(text) => text,
                        FormValue::File(_) => String::new(),
                    };
                    (name, value)
                })
                .collect();

            let staged: Vec<StagedFile> = store.peek().list().to_vec();
            let mut parts = Vec::with_capacity(staged.len());
            for file in staged {
                let Some(handle) = handles.peek().get(&file.name).cloned() else {
                    continue;
                };
                match handle.read_bytes().await {
                    Ok(bytes) => parts.push(UploadPart {
                        name: file.name,
                        mime: file.mime,
                        bytes: bytes.to_vec(),
                    }),
                    Err(e) => {
                        error.set(Some(format!("Failed to read {}: {e}", file.name)));
                        uploading.set(false);
                        return;
                    }
                }
            }

            let token = cookie::csrf_token().unwrap_or_default();
            let sent = request::post_multipart(&action_url, &fields, &parts, &token, move |p| {
                progress.set(p);
            })
            .await;

            match sent {
                Ok(body) => match ServerDirective::from_json(&body) {
                    Ok(ServerDirective::Replace { html }) => {
                        // Explicit teardown before rebinding: staged
                        // state is discarded and the region remounts
                        // under a new key, so no stale listener can
                        // fire against the old nodes.
                        store.write().clear();
                        handles.write().clear();
                        rejected.set(Vec::new());
                        progress.set(0.0);
                        report_html.set(Some(html));
                        generation += 1;
                    }
                    Ok(ServerDirective::Redirect { url }) => {
                        navigate(&url);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                },
                Err(e) => error.set(Some(e.to_string())),
            }
            uploading.set(false);
        }
    };

    let border_class = if dragging() {
        "border-[var(--border-accent)] bg-[var(--surface-active)]"
    } else {
        "border-[var(--border-muted)] bg-[var(--surface)]"
    };

    rsx! {
        div { class: "max-w-2xl",

            if let Some(ref html) = report_html() {
                // Server-rendered processing report from the last
                // successful upload.
                div { class: "mb-4", dangerous_inner_html: "{html}" }
            }

            div { key: "{generation}",

                if !rejected().is_empty() {
                    div {
                        class: "mb-3 p-3 rounded border border-[var(--border-error)]
                                text-[var(--text-error)] text-sm",
                        role: "alert",
                        ul {
                            for r in rejected() {
                                li { "{r.name}: {r.reason}" }
                            }
                        }
                    }
                }

                if let Some(ref err) = error() {
                    div {
                        class: "mb-3 p-3 rounded border border-[var(--border-error)]
                                text-[var(--text-error)] text-sm",
                        role: "alert",
                        "{err}"
                    }
                }

                form {
                    action: "{props.action_url}",
                    method: "post",
                    onsubmit: on_submit,

                    div {
                        class: "border-2 border-dashed rounded-lg p-6 text-center
                                transition-colors {border_class}",
                        ondragover: move |evt| {
                            evt.prevent_default();
                            dragging.set(true);
                        },
                        ondragleave: move |_| {
                            dragging.set(false);
                        },
                        ondrop: move |evt| {
                            evt.prevent_default();
                            dragging.set(false);
                            stage_files(evt.files());
                        },

                        Icon {
                            icon: LdUpload,
                            width: 28,
                            height: 28,
                            class: "mx-auto mb-2 text-[var(--text-secondary)]",
                        }
                        p { class: "text-[var(--text-secondary)] mb-3",
                            "Drop FITS images here or "
                        }
                        label {
                            class: "inline-block px-4 py-2 bg-[var(--btn-primary)]
                                    hover:bg-[var(--btn-primary-hover)] rounded cursor-pointer
                                    text-white font-medium transition-colors",
                            input {
                                r#type: "file",
                                name: "files",
                                multiple: true,
                                accept: ".fits,.fit",
                                class: "hidden",
                                onchange: move |evt| stage_files(evt.files()),
                            }
                            "Choose Files"
                        }
                        p { class: "text-[var(--muted)] text-sm mt-2", "FITS only" }
                    }

                    if !store().is_empty() {
                        FileTable {
                            files: store().list().to_vec(),
                            on_remove: on_remove,
                            on_clear: on_clear,
                        }
                    }

                    if uploading() {
                        div { class: "mt-4 h-2 rounded bg-[var(--surface)] overflow-hidden",
                            div {
                                class: "h-full bg-[var(--btn-primary)] transition-all",
                                style: "width: {progress()}%",
                            }
                        }
                        if progress() >= WAIT_NOTICE_PERCENT {
                            p { class: "mt-2 text-sm text-[var(--text-secondary)]",
                                "Upload sent, the server is processing. Please wait..."
                            }
                        }
                    }

                    button {
                        r#type: "submit",
                        disabled: uploading(),
                        class: "mt-4 px-4 py-2 bg-[var(--btn-primary)]
                                hover:bg-[var(--btn-primary-hover)] rounded text-white
                                font-medium transition-colors disabled:opacity-50",
                        "Upload"
                    }
                }
            }
        }
    }
}

/// Navigate the browser to `url`, as instructed by a redirect
/// directive. A missing window (non-browser environment) is ignored.
fn navigate(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    window.location().set_href(url).ok();
}
