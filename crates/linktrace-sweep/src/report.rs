//! Fault reporting: diagnostic log file plus user notification.

use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::TraceError;

/// Receives the blocking user notification when a trace fails.
///
/// The original host showed a modal dialog; the CLI prints to stderr;
/// tests capture the message.
pub trait Notifier {
    /// Show `message` to the user.
    fn notify(&mut self, message: &str);
}

/// Writes trace failures to a fixed log file and notifies the user.
///
/// The log is overwritten on each failure, not appended: only the most
/// recent fault is kept.
#[derive(Debug, Clone)]
pub struct FaultReporter {
    log_path: PathBuf,
}

impl FaultReporter {
    /// Reporter writing to `log_path`.
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    /// Where the diagnostic log is written.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Write the full diagnostic for `err` to the log file (overwriting any
    /// previous one) and surface it through `notifier`.
    ///
    /// Returns the I/O error if the log could not be written; the
    /// notification is shown regardless.
    pub fn report(&self, err: &TraceError, notifier: &mut dyn Notifier) -> io::Result<()> {
        let diagnostic = diagnostic_text(err);
        let write_result = fs::write(&self.log_path, &diagnostic);
        notifier.notify(&diagnostic);
        write_result
    }
}

/// Render an error and its full source chain, one cause per line.
fn diagnostic_text(err: &TraceError) -> String {
    let mut text = format!("trace failed: {err}\n");
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(&format!("caused by: {cause}\n"));
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SelectionKind;
    use linktrace_host::HostError;

    #[derive(Default)]
    struct CapturedDialog(Vec<String>);

    impl Notifier for CapturedDialog {
        fn notify(&mut self, message: &str) {
            self.0.push(message.to_string());
        }
    }

    #[test]
    fn log_is_overwritten_per_failure() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = FaultReporter::new(dir.path().join("trace.log"));
        let mut dialog = CapturedDialog::default();

        let first = TraceError::Fault(HostError::MissingJoint("hinge".into()));
        reporter.report(&first, &mut dialog).unwrap();
        let second = TraceError::MissingSelection(SelectionKind::TrackedPoint);
        reporter.report(&second, &mut dialog).unwrap();

        let log = std::fs::read_to_string(reporter.log_path()).unwrap();
        assert!(log.contains("point"));
        assert!(!log.contains("hinge"), "old failure should be overwritten");
        assert_eq!(dialog.0.len(), 2);
    }

    #[test]
    fn diagnostic_includes_cause_chain() {
        let err = TraceError::Fault(HostError::Internal("transform blew up".into()));
        let text = diagnostic_text(&err);
        assert!(text.contains("trace failed"));
        assert!(text.contains("transform blew up"));
    }
}
