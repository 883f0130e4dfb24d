//! The contract a security check satisfies to participate in orchestration

use crate::config::Configuration;
use crate::error::Result;
use crate::report::CheckOutcome;

/// A single named security probe.
///
/// A check owns the [`Configuration`] it was constructed with, performs its
/// probing when run, and classifies what it saw as a [`CheckOutcome`]. An
/// `Err` from [`run`](SecurityCheck::run) is not a finding: it means the
/// check could not be evaluated at all and aborts the whole scan.
pub trait SecurityCheck {
    /// Execute the check and classify the outcome
    fn run(&self) -> Result<CheckOutcome>;
}

/// Builds a runnable check from its resolved configuration.
///
/// Every construction failure surfaces as the single fatal
/// [`Error::Construction`](crate::error::Error::Construction) kind, carrying
/// the check name and the underlying cause.
pub type CheckFactory = fn(Configuration) -> Result<Box<dyn SecurityCheck>>;
