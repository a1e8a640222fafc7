#![warn(missing_docs)]

//! Joint-motion path sampling and curve fitting.
//!
//! Given a revolute joint, a planar reference, and one or more tracked
//! points, [`trace`] sweeps the joint's motion value at fixed angular
//! resolution, records each point's position in the reference plane's local
//! frame at every sample, restores the joint, and fits one closed fixed
//! spline per point on a working sketch built on the reference.
//!
//! The algorithm talks to its CAD host exclusively through
//! [`TraceHost`](linktrace_host::TraceHost); `linktrace-host` provides an
//! in-memory implementation.

mod report;
mod selections;
mod sweep;

pub use report::{FaultReporter, Notifier};
pub use selections::{SelectionKind, TraceSelections, ValidSelections};
pub use sweep::{trace, SweepRange, TraceOutcome, RESOLUTION};

use linktrace_host::HostError;
use thiserror::Error;

/// Errors from a trace invocation.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A required selection class is empty. Raised before any document
    /// mutation: no sketch is created and the joint is not touched.
    #[error("nothing selected for {0}: select a joint, a reference plane, and at least one point to trace")]
    MissingSelection(SelectionKind),

    /// The host failed during setup or sampling. The working sketch may
    /// already exist and the joint pose may not have been restored; nothing
    /// is rolled back.
    #[error(transparent)]
    Fault(#[from] HostError),
}
