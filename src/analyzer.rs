//! Uniform analyzer contract
//!
//! Every quality sub-analyzer, principle sub-detector and top-level
//! component implements [`Analyzer`]: a pure function from an immutable
//! snapshot to an owned result value. Implementations hold only constant
//! configuration, so running one twice on the same snapshot yields the
//! same output and any set of analyzers may run concurrently.

use crate::models::RepoSnapshot;

pub trait Analyzer: Send + Sync {
    /// Result value handed to the caller
    type Output: Send;

    /// Stable identifier used in logs
    fn name(&self) -> &'static str;

    /// Analyze the snapshot. Total over any well-formed snapshot.
    fn analyze(&self, snapshot: &RepoSnapshot) -> Self::Output;
}
