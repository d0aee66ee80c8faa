//! trailblazer-core: Pure upload/gallery interaction logic (sans-IO).
//!
//! Holds the staged-file store, client-side file validation, server
//! directive decoding, gallery page records, and request staleness
//! tracking.
//!
//! This crate has **no browser dependencies** -- it operates on plain
//! strings and in-memory collections and returns structured data. All
//! DOM and network interaction lives in `trailblazer-io`.

pub mod directive;
pub mod gallery;
pub mod progress;
pub mod staged;
pub mod validate;

pub use directive::{DirectiveError, ServerDirective};
pub use gallery::{GalleryError, GalleryImage, GalleryResponse, PageTracker};
pub use staged::{FileListStore, StagedFile};
pub use validate::{RejectReason, RejectedFile, UploadLimits, stage_batch, validate_file};
