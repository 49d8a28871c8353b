//! Summary statistics for a link audit

use crate::audit::LinkCheckResult;
use std::fmt;

/// Counts derived from a completed audit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AuditSummary {
    /// Number of links checked
    pub total: usize,

    /// Links with a status in 200..400
    pub successful: usize,

    /// Links that failed, including unreachable ones
    pub failed: usize,
}

impl AuditSummary {
    /// Builds a summary from audit results
    pub fn from_results(results: &[LinkCheckResult]) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
        }
    }

    /// Returns the success rate as a percentage
    ///
    /// An audit that found no links reports 0.0.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.successful as f64 / self.total as f64) * 100.0
    }

    /// Returns the failure rate as a percentage
    pub fn failure_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.failed as f64 / self.total as f64) * 100.0
    }
}

impl fmt::Display for AuditSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Link Check Summary:")?;
        writeln!(f, "Total links: {}", self.total)?;
        writeln!(f, "Successful links: {}", self.successful)?;
        writeln!(f, "Failed links: {}", self.failed)?;
        write!(f, "Success rate: {:.2}%", self.success_rate())
    }
}
