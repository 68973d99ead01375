//! Convergence runner: guard, probe, apply, record.
//!
//! Resources run strictly in sequence. Immediate resources go first in
//! declared order, then deferred ones in declared order. A failure is
//! recorded against its resource and the run carries on; the whole batch
//! is never aborted.

use provision_core::AttributeStore;
use tracing::{info, warn};

use crate::apply::apply;
use crate::error::ResourceError;
use crate::host::Host;
use crate::probe::{ProbeOutcome, probe};
use crate::resource::Resource;

/// Outcome of converging one resource.
#[derive(Debug)]
pub enum ConvergenceResult {
    /// Guard evaluated to false; nothing was inspected or changed.
    Skipped,
    /// Already in the desired state.
    Unchanged,
    /// The action ran and succeeded.
    Applied,
    /// Probe or action failed.
    Failed(ResourceError),
}

impl ConvergenceResult {
    pub fn label(&self) -> &'static str {
        match self {
            ConvergenceResult::Skipped => "skipped",
            ConvergenceResult::Unchanged => "unchanged",
            ConvergenceResult::Applied => "applied",
            ConvergenceResult::Failed(_) => "failed",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ConvergenceResult::Failed(_))
    }
}

/// A result paired with the resource it belongs to.
#[derive(Debug)]
pub struct ResourceOutcome {
    /// Display identity, e.g. `service[munge]`.
    pub resource: String,
    pub deferred: bool,
    pub result: ConvergenceResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub skipped: usize,
    pub unchanged: usize,
    pub applied: usize,
    pub failed: usize,
}

/// Ordered results of one convergence run.
#[derive(Debug, Default)]
pub struct ConvergenceReport {
    outcomes: Vec<ResourceOutcome>,
}

impl ConvergenceReport {
    pub fn outcomes(&self) -> &[ResourceOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.is_failed())
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for outcome in &self.outcomes {
            match outcome.result {
                ConvergenceResult::Skipped => summary.skipped += 1,
                ConvergenceResult::Unchanged => summary.unchanged += 1,
                ConvergenceResult::Applied => summary.applied += 1,
                ConvergenceResult::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Converge `resources` against `host`.
///
/// Returns one outcome per resource: immediate resources in declared
/// order, followed by deferred resources in declared order.
pub fn converge(
    resources: &[Resource],
    attrs: &dyn AttributeStore,
    host: &mut dyn Host,
) -> ConvergenceReport {
    let (immediate, deferred): (Vec<&Resource>, Vec<&Resource>) =
        resources.iter().partition(|r| !r.deferred);

    info!(
        immediate = immediate.len(),
        deferred = deferred.len(),
        "starting convergence"
    );

    let mut report = ConvergenceReport::default();
    for resource in immediate.into_iter().chain(deferred) {
        let result = converge_one(resource, attrs, host);
        report.outcomes.push(ResourceOutcome {
            resource: resource.to_string(),
            deferred: resource.deferred,
            result,
        });
    }

    let summary = report.summary();
    info!(
        applied = summary.applied,
        unchanged = summary.unchanged,
        skipped = summary.skipped,
        failed = summary.failed,
        "convergence finished"
    );
    report
}

/// Converge a single resource. Guards are evaluated before any host access.
pub fn converge_one(
    resource: &Resource,
    attrs: &dyn AttributeStore,
    host: &mut dyn Host,
) -> ConvergenceResult {
    if !resource.guard.evaluate(attrs) {
        return ConvergenceResult::Skipped;
    }

    match probe(resource, &*host) {
        Ok(ProbeOutcome::Matches) => ConvergenceResult::Unchanged,
        Ok(ProbeOutcome::Mismatches) => match apply(resource, host) {
            Ok(()) => ConvergenceResult::Applied,
            Err(e) => {
                warn!(resource = %resource, error = %e, "action failed");
                ConvergenceResult::Failed(e.into())
            }
        },
        Err(e) => {
            warn!(resource = %resource, error = %e, "probe failed");
            ConvergenceResult::Failed(e.into())
        }
    }
}
