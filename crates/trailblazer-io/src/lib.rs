//! trailblazer-io: Browser I/O and Dioxus component library.
//!
//! Handles CSRF cookie access, progress-tracked multipart uploads via
//! `XmlHttpRequest`, gallery page queries, and provides the upload
//! widget and gallery components for the trailblazer web application.

pub mod components;
pub mod cookie;
pub mod request;

pub use components::{Gallery, UploadWidget};
pub use request::{RequestError, UploadPart};
