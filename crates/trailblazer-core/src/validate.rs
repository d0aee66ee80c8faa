//! Client-side file validation.
//!
//! Mirrors the server's acceptance rules so users learn about a
//! rejected file before the upload starts. The server re-validates
//! everything; this is a courtesy check, not a security boundary.

use crate::staged::{FileListStore, StagedFile};

/// Extensions accepted when the browser reports no MIME type.
///
/// Matched exactly as the browser sends them (no case folding);
/// browsers pass the filename through verbatim.
pub const ALLOWED_EXTENSIONS: &[&str] = &["fits", "fit"];

/// Declared MIME types accepted regardless of extension.
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/fits", "text/plain"];

/// Size limit configuration for uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Maximum file size in megabytes. Zero or negative disables the
    /// size check entirely.
    pub max_file_size_mb: i64,
}

impl Default for UploadLimits {
    /// Matches the server's `UploadForm` default of 1000 MB.
    fn default() -> Self {
        Self {
            max_file_size_mb: 1000,
        }
    }
}

/// Why a file was rejected during staging.
///
/// The `Display` strings are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    /// Neither the extension nor the declared MIME type is accepted.
    #[error("File type not allowed.")]
    TypeNotAllowed,
    /// The file exceeds the configured size limit.
    #[error("File size exceeds {limit_mb}MB.")]
    TooLarge {
        /// The configured limit, for the user-facing message.
        limit_mb: i64,
    },
}

/// A file that failed validation, paired with the reason shown to the
/// user in the alert area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    /// Filename as reported by the browser.
    pub name: String,
    /// Why it was rejected.
    pub reason: RejectReason,
}

/// Validate a single candidate file.
///
/// A file passes the type check when its declared MIME type is empty
/// and its extension is exactly `fits` or `fit`, or when the declared
/// type is one of [`ALLOWED_MIME_TYPES`]. It passes the size check
/// when the limit is disabled (`<= 0`) or its size does not exceed
/// `max_file_size_mb` mebibytes.
///
/// # Errors
///
/// Returns the [`RejectReason`] to surface to the user. The type check
/// runs first, so a file failing both reports the type error.
pub fn validate_file(
    name: &str,
    declared_mime: &str,
    size: u64,
    limits: UploadLimits,
) -> Result<(), RejectReason> {
    let type_ok = if declared_mime.is_empty() {
        has_allowed_extension(name)
    } else {
        ALLOWED_MIME_TYPES.contains(&declared_mime)
    };
    if !type_ok {
        return Err(RejectReason::TypeNotAllowed);
    }

    if limits.max_file_size_mb > 0 {
        // Mebibytes, matching the server-side check.
        let max_bytes = u64::try_from(limits.max_file_size_mb)
            .unwrap_or(0)
            .saturating_mul(1024 * 1024);
        if size > max_bytes {
            return Err(RejectReason::TooLarge {
                limit_mb: limits.max_file_size_mb,
            });
        }
    }

    Ok(())
}

/// Validate a whole batch of dropped/selected files.
///
/// Every candidate is validated independently: valid files are staged
/// in `store` (replacing same-named entries), invalid files are
/// collected for the alert area. The caller refreshes the display once
/// after the batch, not per file.
pub fn stage_batch(
    store: &mut FileListStore,
    candidates: Vec<StagedFile>,
    limits: UploadLimits,
) -> Vec<RejectedFile> {
    let mut rejected = Vec::new();
    for candidate in candidates {
        match validate_file(&candidate.name, &candidate.mime, candidate.size, limits) {
            Ok(()) => store.add(candidate),
            Err(reason) => rejected.push(RejectedFile {
                name: candidate.name,
                reason,
            }),
        }
    }
    rejected
}

/// Check whether a filename carries an allowed FITS extension.
fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_LIMIT: UploadLimits = UploadLimits {
        max_file_size_mb: 0,
    };
    const TEN_MB: UploadLimits = UploadLimits {
        max_file_size_mb: 10,
    };

    #[test]
    fn fits_extension_with_empty_type_is_valid() {
        assert_eq!(validate_file("image.fits", "", 1024, NO_LIMIT), Ok(()));
        assert_eq!(validate_file("image.fit", "", 1024, NO_LIMIT), Ok(()));
    }

    #[test]
    fn plain_text_mime_is_valid() {
        assert_eq!(
            validate_file("notes.txt", "text/plain", 1024, NO_LIMIT),
            Ok(())
        );
    }

    #[test]
    fn image_fits_mime_is_valid() {
        assert_eq!(
            validate_file("obs.fits", "image/fits", 1024, NO_LIMIT),
            Ok(())
        );
    }

    #[test]
    fn png_is_rejected_with_type_reason() {
        let result = validate_file("photo.png", "image/png", 1024, NO_LIMIT);
        assert_eq!(result, Err(RejectReason::TypeNotAllowed));
        assert_eq!(
            RejectReason::TypeNotAllowed.to_string(),
            "File type not allowed."
        );
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        // Browsers send the filename verbatim; "FITS" does not match.
        assert_eq!(
            validate_file("image.FITS", "", 1024, NO_LIMIT),
            Err(RejectReason::TypeNotAllowed)
        );
    }

    #[test]
    fn missing_extension_with_empty_type_is_rejected() {
        assert_eq!(
            validate_file("image", "", 1024, NO_LIMIT),
            Err(RejectReason::TypeNotAllowed)
        );
    }

    #[test]
    fn oversize_file_is_rejected_with_limit_in_message() {
        let result = validate_file("big.fits", "", 11_000_000, TEN_MB);
        assert_eq!(result, Err(RejectReason::TooLarge { limit_mb: 10 }));
        assert_eq!(
            RejectReason::TooLarge { limit_mb: 10 }.to_string(),
            "File size exceeds 10MB."
        );
    }

    #[test]
    fn file_under_limit_passes_size_check() {
        assert_eq!(validate_file("ok.fits", "", 9_000_000, TEN_MB), Ok(()));
    }

    #[test]
    fn zero_or_negative_limit_disables_size_check() {
        let unlimited = UploadLimits {
            max_file_size_mb: -1,
        };
        assert_eq!(validate_file("huge.fits", "", u64::MAX, NO_LIMIT), Ok(()));
        assert_eq!(validate_file("huge.fits", "", u64::MAX, unlimited), Ok(()));
    }

    #[test]
    fn type_failure_reported_before_size_failure() {
        let result = validate_file("big.png", "image/png", 11_000_000, TEN_MB);
        assert_eq!(result, Err(RejectReason::TypeNotAllowed));
    }

    #[test]
    fn stage_batch_stages_valid_and_collects_invalid() {
        let mut store = FileListStore::new();
        let batch = vec![
            StagedFile::new("a.fits".into(), 1024, String::new()),
            StagedFile::new("photo.png".into(), 1024, "image/png".into()),
            StagedFile::new("notes.txt".into(), 1024, "text/plain".into()),
        ];
        let rejected = stage_batch(&mut store, batch, UploadLimits::default());

        assert_eq!(store.len(), 2);
        assert_eq!(rejected.len(), 1);
        assert!(matches!(
            rejected.first(),
            Some(r) if r.name == "photo.png" && r.reason == RejectReason::TypeNotAllowed
        ));
    }

    #[test]
    fn stage_batch_with_all_valid_reports_nothing() {
        let mut store = FileListStore::new();
        let batch = vec![StagedFile::new("a.fits".into(), 1024, String::new())];
        assert!(stage_batch(&mut store, batch, UploadLimits::default()).is_empty());
    }
}
