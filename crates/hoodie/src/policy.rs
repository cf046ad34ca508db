//! Error policies deciding whether a run survives a failure.
//!
//! The pipeline never swallows an error: every failure is handed to the
//! caller's [`ErrorPolicy`], which either aborts the run by returning the
//! error or records it and lets the run continue with the remaining
//! documents.

use log::error;

use crate::HoodieError;

/// Strategy applied to every failure met during a run.
pub trait ErrorPolicy {
    /// Handle one failure.
    ///
    /// Returning `Err` aborts the run with that error; returning `Ok` lets the
    /// run carry on.
    fn report(&mut self, err: HoodieError) -> Result<(), HoodieError>;

    /// Called once when the run has finished every phase.
    ///
    /// The default accepts the run.
    fn finish(&mut self) -> Result<(), HoodieError> {
        Ok(())
    }
}

/// Abort on the first failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailFast;

impl ErrorPolicy for FailFast {
    fn report(&mut self, err: HoodieError) -> Result<(), HoodieError> {
        Err(err)
    }
}

/// Log every failure and continue; the run fails at the end if anything was
/// reported.
#[derive(Debug, Default)]
pub struct KeepGoing {
    errors: Vec<HoodieError>,
}

impl KeepGoing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures recorded so far, in order.
    pub fn errors(&self) -> &[HoodieError] {
        &self.errors
    }

    /// Take the recorded failures, leaving the policy empty.
    pub fn take_errors(&mut self) -> Vec<HoodieError> {
        std::mem::take(&mut self.errors)
    }
}

impl ErrorPolicy for KeepGoing {
    fn report(&mut self, err: HoodieError) -> Result<(), HoodieError> {
        error!(err:%; "Continuing after error");
        self.errors.push(err);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), HoodieError> {
        match self.errors.len() {
            0 => Ok(()),
            count => Err(HoodieError::Aborted(count)),
        }
    }
}
