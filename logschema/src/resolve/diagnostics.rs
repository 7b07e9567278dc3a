// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Diagnostics recorded for unexpected resolution failures

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;

use super::error::ResolveError;

/// One unexpected resolution failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveDiagnostic {
    pub path: String,
    pub error: ResolveError,
}

impl ResolveDiagnostic {
    pub fn new(path: impl Into<String>, error: ResolveError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for ResolveDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

/// Bounded diagnostic sink shared by concurrent resolutions
///
/// Holds at most `capacity` entries; recording into a full log evicts the oldest entry and
/// counts it as dropped.
#[derive(Debug)]
pub(crate) struct DiagnosticLog {
    capacity: usize,
    inner: Mutex<LogState>,
}

#[derive(Debug, Default)]
struct LogState {
    entries: VecDeque<ResolveDiagnostic>,
    dropped: usize,
}

impl DiagnosticLog {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(LogState::default()),
        }
    }

    /// Record a failure: expected failures are logged at debug and dropped, all others are
    /// logged at error and kept.
    pub(crate) fn record(&self, path: &str, error: &ResolveError) {
        if error.is_expected() {
            log::debug!("skip non-schema field: {}", path);
            return;
        }

        log::error!("cannot resolve field path '{}': {}", path, error);
        let mut state = self.inner.lock();
        if self.capacity == 0 {
            state.dropped += 1;
            return;
        }
        if state.entries.len() >= self.capacity {
            state.entries.pop_front();
            state.dropped += 1;
            if state.dropped == 1 {
                log::warn!(
                    "diagnostic log full ({} entries), evicting oldest entries",
                    self.capacity
                );
            }
        }
        state
            .entries
            .push_back(ResolveDiagnostic::new(path, error.clone()));
    }

    pub(crate) fn snapshot(&self) -> Vec<ResolveDiagnostic> {
        self.inner.lock().entries.iter().cloned().collect()
    }

    pub(crate) fn take(&self) -> Vec<ResolveDiagnostic> {
        let mut state = self.inner.lock();
        state.dropped = 0;
        std::mem::take(&mut state.entries).into()
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Entries evicted since the last drain
    pub(crate) fn dropped(&self) -> usize {
        self.inner.lock().dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_failures_are_not_recorded() {
        let log = DiagnosticLog::with_capacity(16);
        log.record(
            "root.is_train",
            &ResolveError::Opaque {
                path: "root.is_train".to_string(),
            },
        );
        assert_eq!(log.len(), 0);

        log.record("root.nope", &ResolveError::EmptyPath);
        assert_eq!(log.len(), 1);
        assert_eq!(log.snapshot()[0].path, "root.nope");
    }

    #[test]
    fn test_take_drains() {
        let log = DiagnosticLog::with_capacity(16);
        log.record("a", &ResolveError::EmptyPath);
        log.record("b", &ResolveError::EmptyPath);
        assert_eq!(log.take().len(), 2);
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_full_log_evicts_oldest() {
        let log = DiagnosticLog::with_capacity(2);
        log.record("a", &ResolveError::EmptyPath);
        log.record("b", &ResolveError::EmptyPath);
        log.record("c", &ResolveError::EmptyPath);

        let paths: Vec<String> = log.snapshot().into_iter().map(|d| d.path).collect();
        assert_eq!(paths, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(log.dropped(), 1);

        log.take();
        assert_eq!(log.dropped(), 0);
    }
}
