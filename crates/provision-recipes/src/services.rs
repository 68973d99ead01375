//! Deferred enablement of the Slurm daemons.
//!
//! `munge` is enabled on every Slurm node. The remaining daemons are gated
//! on the node role. All of them run in the deferred pass, after packages
//! and files from every other recipe are in place.

use provision_core::AttributeStore;
use provision_engine::{Guard, Resource, ServiceAction};

use crate::Recipe;

const ROLE: &[&str] = &["slurm", "role"];

pub struct ServiceEnable;

impl Recipe for ServiceEnable {
    fn name(&self) -> &'static str {
        "slurm_service_enable"
    }

    fn build(&self, attrs: &dyn AttributeStore) -> Option<Vec<Resource>> {
        if !Guard::present(&["slurm"]).evaluate(attrs) {
            return None;
        }
        Some(vec![
            enable("munge", Guard::Always),
            enable("slurmd", Guard::equals(ROLE, "execute")),
            enable("slurmdbd", Guard::equals(ROLE, "scheduler")),
            enable("slurmctld", Guard::equals(ROLE, "scheduler")),
        ])
    }
}

fn enable(service: &str, guard: Guard) -> Resource {
    Resource::service(service, &[ServiceAction::Enable])
        .with_guard(guard)
        .deferred()
}

#[cfg(test)]
mod tests {
    use super::*;
    use provision_core::NodeAttributes;
    use provision_engine::{ConvergenceResult, MemoryHost, converge};
    use serde_json::json;

    fn enabled_on(role: &str) -> Vec<String> {
        let attrs = NodeAttributes::new(json!({ "slurm": { "role": role } }));
        let resources = ServiceEnable.build(&attrs).unwrap();
        let mut host = MemoryHost::new();
        let report = converge(&resources, &attrs, &mut host);
        report
            .outcomes()
            .iter()
            .filter(|o| matches!(o.result, ConvergenceResult::Applied))
            .map(|o| o.resource.clone())
            .collect()
    }

    #[test]
    fn every_descriptor_is_deferred() {
        let attrs = NodeAttributes::new(json!({ "slurm": {} }));
        let resources = ServiceEnable.build(&attrs).unwrap();
        assert_eq!(resources.len(), 4);
        assert!(resources.iter().all(|r| r.deferred));
    }

    #[test]
    fn execute_role() {
        assert_eq!(enabled_on("execute"), vec!["service[munge]", "service[slurmd]"]);
    }

    #[test]
    fn scheduler_role() {
        assert_eq!(
            enabled_on("scheduler"),
            vec!["service[munge]", "service[slurmdbd]", "service[slurmctld]"]
        );
    }

    #[test]
    fn other_role_only_gets_munge() {
        assert_eq!(enabled_on("login"), vec!["service[munge]"]);
    }

    #[test]
    fn no_slurm_attributes_builds_nothing() {
        assert!(ServiceEnable.build(&NodeAttributes::new(json!({}))).is_none());
        assert!(ServiceEnable.build(&NodeAttributes::new(json!({ "slurm": null }))).is_none());
    }
}
