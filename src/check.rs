//! The page-check model: an ordered step sequence plus an optional
//! best-effort tail that tolerates an unseeded app.

use std::collections::HashSet;

use crate::error::{VerifyError, VerifyResult};
use crate::locator::Locator;
use crate::step::CheckStep;

/// A named sequence of page checks against the running app
#[derive(Debug, Clone)]
pub struct PageCheck {
    /// Unique name for this check, used in logs and report file names
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Required steps; any failure here fails the run
    pub steps: Vec<CheckStep>,

    /// Optional tail whose failure is tolerated when the app has no data
    pub branch: Option<BestEffortBranch>,
}

/// A fallible tail of a check.
///
/// The probe looks for the first matching element with a short timeout.
/// No match means the app has no data to verify against and the tail is
/// skipped; a failure after a successful probe is a real defect.
#[derive(Debug, Clone)]
pub struct BestEffortBranch {
    pub name: String,
    pub probe: Locator,
    pub probe_timeout_ms: u64,
    pub steps: Vec<CheckStep>,
}

impl PageCheck {
    /// Every screenshot name must be unique within the check so no
    /// artifact overwrites another.
    pub fn validate(&self) -> VerifyResult<()> {
        let mut seen = HashSet::new();
        for name in self.screenshot_names() {
            if !seen.insert(name) {
                return Err(VerifyError::DuplicateScreenshot {
                    check: self.name.clone(),
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Screenshot names across required steps and the branch, in order
    pub fn screenshot_names(&self) -> Vec<&str> {
        let branch_steps = self.branch.iter().flat_map(|b| b.steps.iter());
        self.steps
            .iter()
            .chain(branch_steps)
            .filter_map(|step| match step {
                CheckStep::Screenshot { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}
