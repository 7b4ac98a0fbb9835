//! Double-submit guard.

use std::sync::atomic::{AtomicBool, Ordering};

/// Held for the duration of one order submission; dropping it re-enables submission.
#[derive(Debug)]
pub struct SubmissionGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmissionGuard<'a> {
    /// Claim `flag`, or `None` if a submission already holds it.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
