//! Dioxus UI components for trailblazer.
//!
//! Provides the upload widget (drag-and-drop region, staged-file
//! table, validation alerts, progress bar) and the paginated gallery.

mod file_table;
mod gallery;
mod upload;

pub use file_table::FileTable;
pub use gallery::Gallery;
pub use upload::UploadWidget;
