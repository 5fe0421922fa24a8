use crate::crd::api_manager::DeploymentSummary;

use super::observed::ObservedWorkload;

/// Bucket observed workloads into ready/starting/stopped, keeping input order.
pub fn deployment_summary(observed: &[ObservedWorkload]) -> DeploymentSummary {
    let mut summary = DeploymentSummary::default();
    for w in observed {
        let bucket = if w.desired_replicas == 0 {
            &mut summary.stopped
        } else if w.ready_replicas < w.desired_replicas {
            &mut summary.starting
        } else {
            &mut summary.ready
        };
        bucket.push(w.name.clone());
    }
    summary
}

/// Same names per bucket, whatever the order.
pub fn summaries_equal(a: &DeploymentSummary, b: &DeploymentSummary) -> bool {
    fn sorted(v: &[String]) -> Vec<&str> {
        let mut out: Vec<&str> = v.iter().map(String::as_str).collect();
        out.sort_unstable();
        out
    }
    sorted(&a.ready) == sorted(&b.ready)
        && sorted(&a.starting) == sorted(&b.starting)
        && sorted(&a.stopped) == sorted(&b.stopped)
}
