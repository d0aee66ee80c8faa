//! Staged-file table with per-row removal and clear-all.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;
use trailblazer_core::StagedFile;

/// Props for the [`FileTable`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileTableProps {
    /// Staged files in display order.
    files: Vec<StagedFile>,
    /// Callback fired with the filename when a row's remove button is
    /// clicked.
    on_remove: EventHandler<String>,
    /// Callback fired when the clear-all button is clicked.
    on_clear: EventHandler<()>,
}

/// Table of staged files awaiting upload.
///
/// The parent hides the table entirely when nothing is staged; this
/// component always renders its rows.
#[component]
pub fn FileTable(props: FileTableProps) -> Element {
    let on_remove = props.on_remove;
    let on_clear = props.on_clear;
    rsx! {
        div { class: "mt-4",
            table { class: "w-full text-sm text-left",
                thead {
                    tr { class: "border-b border-[var(--border-muted)]",
                        th { class: "py-1 pr-2 font-medium", "File" }
                        th { class: "py-1 pr-2 font-medium text-right", "Size" }
                        th { class: "py-1 w-8", "" }
                    }
                }
                tbody {
                    for file in props.files {
                        {render_row(&file, &on_remove)}
                    }
                }
            }
            button {
                r#type: "button",
                class: "mt-2 px-3 py-1 text-sm rounded bg-[var(--surface)]
                        hover:bg-[var(--surface-active)] transition-colors",
                onclick: move |_| on_clear.call(()),
                "Clear all"
            }
        }
    }
}

/// Render one staged-file row.
fn render_row(file: &StagedFile, on_remove: &EventHandler<String>) -> Element {
    let name = file.name.clone();
    let onclick = {
        let on_remove = *on_remove;
        let name = name.clone();
        move |_| on_remove.call(name.clone())
    };

    rsx! {
        tr { class: "border-b border-[var(--border-muted)]",
            td { class: "py-1 pr-2 break-all", "{name}" }
            td { class: "py-1 pr-2 text-right whitespace-nowrap",
                {format_size(file.size)}
            }
            td { class: "py-1",
                button {
                    r#type: "button",
                    class: "p-1 rounded hover:bg-[var(--surface-active)] transition-colors",
                    aria_label: "Remove {name}",
                    onclick: onclick,
                    Icon { icon: LdX, width: 14, height: 14 }
                }
            }
        }
    }
}

/// Human-readable file size for table rows.
#[allow(clippy::cast_precision_loss)] // display only
fn format_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    const KIB: u64 = 1024;
    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_format_by_magnitude() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(11_000_000), "10.5 MB");
    }
}
