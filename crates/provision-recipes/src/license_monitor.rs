//! Cron job and log rotation for the Slurm license monitor.

use provision_core::AttributeStore;
use provision_engine::{Ownership, Resource};

use crate::Recipe;

pub const CRON_PATH: &str = "/etc/cron.d/update_slurm_resources";
pub const LOGROTATE_PATH: &str = "/etc/logrotate.d/update_slurm_resources";

const CRON_CONTENT: &str = include_str!("../files/update_slurm_resources.crond");
const LOGROTATE_CONTENT: &str = include_str!("../files/update_slurm_resources.logrotate");

pub struct LicenseMonitor;

impl Recipe for LicenseMonitor {
    fn name(&self) -> &'static str {
        "slurm_license_monitor"
    }

    fn build(&self, attrs: &dyn AttributeStore) -> Option<Vec<Resource>> {
        if attrs.get_str(&["slurm", "role"]) != Some("scheduler") {
            return None;
        }
        Some(vec![
            Resource::file(CRON_PATH, CRON_CONTENT, Ownership::root(0o644)),
            Resource::file(LOGROTATE_PATH, LOGROTATE_CONTENT, Ownership::root(0o644)),
        ])
    }
}
