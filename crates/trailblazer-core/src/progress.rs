//! Upload progress arithmetic.
//!
//! The progress bar shows the fraction of request bytes the browser
//! has sent. Reaching 100% does not mean the upload is done -- the
//! server may still be processing -- so the widget reveals a "please
//! wait" notice at that point.

/// Percentage at which the widget shows the please-wait notice.
pub const WAIT_NOTICE_PERCENT: f64 = 100.0;

/// Convert a bytes-sent/bytes-total pair into a percentage.
///
/// Clamped to `0..=100`. A zero-length body (a submit with no staged
/// files and empty fields still sends a request) reports 100
/// immediately so the bar never sits at an indeterminate 0/0.
#[must_use]
pub fn progress_percent(sent: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    #[allow(clippy::cast_precision_loss)] // request sizes are far below 2^52
    let fraction = sent as f64 / total as f64;
    (fraction * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_reports_fifty_percent() {
        let percent = progress_percent(500, 1000);
        assert!((percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn complete_reports_one_hundred() {
        let percent = progress_percent(1000, 1000);
        assert!((percent - 100.0).abs() < f64::EPSILON);
        assert!(percent >= WAIT_NOTICE_PERCENT);
    }

    #[test]
    fn overshoot_is_clamped() {
        // Some browsers report sent > total for the final chunk.
        let percent = progress_percent(1100, 1000);
        assert!((percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_body_reports_complete() {
        let percent = progress_percent(0, 0);
        assert!((percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn nothing_sent_reports_zero() {
        let percent = progress_percent(0, 1000);
        assert!(percent.abs() < f64::EPSILON);
    }
}
