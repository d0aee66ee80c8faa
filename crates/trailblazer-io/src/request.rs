//! Asynchronous HTTP requests with upload progress.
//!
//! Uses `XmlHttpRequest` rather than `fetch` because only XHR exposes
//! upload progress events, and the upload widget's progress bar needs
//! them. The request is wrapped in a manually constructed JS promise
//! resolved from the `load`/`error` handlers; awaiting it yields to
//! the browser event loop.
//!
//! No cancellation and no retry: a transport failure is terminal for
//! that attempt and is reported to the caller.

use std::cell::RefCell;
use std::rc::Rc;

use trailblazer_core::progress::progress_percent;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::UnwrapThrowExt;

/// Header Django expects the CSRF token in.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Form field name the server reads uploaded files from. Repeated
/// once per staged file.
const FILES_FIELD: &str = "files";

/// One file's payload for a multipart submission.
#[derive(Debug, Clone)]
pub struct UploadPart {
    /// Filename sent in the multipart disposition.
    pub name: String,
    /// MIME type for the file's blob; may be empty.
    pub mime: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Errors sending a request or reading its response.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
    /// The request failed at the transport level (network down, CORS,
    /// connection refused).
    #[error("network error, upload not completed")]
    Network,
    /// The server answered with a non-success status.
    #[error("server responded with HTTP {0}")]
    Status(u16),
}

impl From<JsValue> for RequestError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// POST a multipart form: every named field plus one `files` entry per
/// staged file, with the CSRF header set.
///
/// `on_progress` is called with a percentage in `0..=100` as the
/// browser sends request bytes. Resolves with the response body text
/// on HTTP success.
///
/// # Errors
///
/// Returns [`RequestError::Network`] on transport failure,
/// [`RequestError::Status`] on a non-2xx response, and
/// [`RequestError::JsError`] when a browser API call fails.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn post_multipart(
    url: &str,
    fields: &[(String, String)],
    files: &[UploadPart],
    csrf_token: &str,
    mut on_progress: impl FnMut(f64) + 'static,
) -> Result<String, RequestError> {
    let form = web_sys::FormData::new()?;
    for (name, value) in fields {
        form.append_with_str(name, value)?;
    }
    for part in files {
        let blob = bytes_to_blob(&part.bytes, &part.mime)?;
        form.append_with_blob_and_filename(FILES_FIELD, &blob, &part.name)?;
    }

    let xhr = web_sys::XmlHttpRequest::new()?;
    xhr.open("POST", url)?;
    xhr.set_request_header(CSRF_HEADER, csrf_token)?;

    // Upload progress -> caller's progress bar.
    let onprogress = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(
        move |event: web_sys::ProgressEvent| {
            if event.length_computable() {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                // loaded/total are byte counts, non-negative and integral
                let percent = progress_percent(event.loaded() as u64, event.total() as u64);
                on_progress(percent);
            }
        },
    );
    xhr.upload()?
        .set_onprogress(Some(onprogress.as_ref().unchecked_ref()));

    let body = send_and_await(&xhr, |x| x.send_with_opt_form_data(Some(&form))).await;

    xhr.upload()?.set_onprogress(None);
    drop(onprogress);

    body
}

/// POST a gallery page query: the page number as the request body,
/// with the CSRF header set.
///
/// # Errors
///
/// Same taxonomy as [`post_multipart`].
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn post_page(url: &str, page: u32, csrf_token: &str) -> Result<String, RequestError> {
    let xhr = web_sys::XmlHttpRequest::new()?;
    xhr.open("POST", url)?;
    xhr.set_request_header(CSRF_HEADER, csrf_token)?;

    let body = page.to_string();
    send_and_await(&xhr, move |x| x.send_with_opt_str(Some(&body))).await
}

/// Send an opened request and await its completion.
///
/// Installs `load`/`error` handlers that settle a fresh promise,
/// invokes `send`, and awaits. The closure guards are held across the
/// await so the handlers stay alive, then the handlers are detached.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
async fn send_and_await(
    xhr: &web_sys::XmlHttpRequest,
    send: impl FnOnce(&web_sys::XmlHttpRequest) -> Result<(), JsValue>,
) -> Result<String, RequestError> {
    let (promise, resolve, reject) = new_promise();

    let onload = Closure::<dyn FnMut()>::new(move || {
        resolve.call0(&JsValue::NULL).ok();
    });
    let onerror = Closure::<dyn FnMut()>::new(move || {
        reject.call0(&JsValue::NULL).ok();
    });
    xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
    xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));

    send(xhr)?;

    // The closures stay in scope across the await so the installed
    // handlers remain valid until they are detached below.
    let settled = wasm_bindgen_futures::JsFuture::from(promise).await;

    xhr.set_onload(None);
    xhr.set_onerror(None);

    if settled.is_err() {
        return Err(RequestError::Network);
    }

    let status = xhr.status()?;
    if !(200..300).contains(&status) {
        return Err(RequestError::Status(status));
    }
    Ok(xhr.response_text()?.unwrap_or_default())
}

/// Wrap raw bytes in a `Blob` with the given MIME type.
fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<web_sys::Blob, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());
    let opts = web_sys::BlobPropertyBag::new();
    opts.set_type(mime);
    web_sys::Blob::new_with_buffer_source_sequence_and_options(&parts, &opts)
}

/// Create a JS Promise along with its resolve and reject functions.
fn new_promise() -> (js_sys::Promise, js_sys::Function, js_sys::Function) {
    let resolve = Rc::new(RefCell::new(None::<js_sys::Function>));
    let reject = Rc::new(RefCell::new(None::<js_sys::Function>));
    let resolve_clone = Rc::clone(&resolve);
    let reject_clone = Rc::clone(&reject);

    let promise = js_sys::Promise::new(&mut move |res, rej| {
        *resolve_clone.borrow_mut() = Some(res);
        *reject_clone.borrow_mut() = Some(rej);
    });

    let resolve_fn = resolve
        .borrow_mut()
        .take()
        .expect_throw("resolve not captured");
    let reject_fn = reject
        .borrow_mut()
        .take()
        .expect_throw("reject not captured");

    (promise, resolve_fn, reject_fn)
}
