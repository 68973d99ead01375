//! MariaDB backend for Slurm accounting on the scheduler.

use provision_core::AttributeStore;
use provision_engine::{Resource, ServiceAction};

use crate::Recipe;

pub struct AccountingDatabase;

impl Recipe for AccountingDatabase {
    fn name(&self) -> &'static str {
        "slurm_mariadb"
    }

    fn build(&self, attrs: &dyn AttributeStore) -> Option<Vec<Resource>> {
        if !attrs.is_truthy(&["slurm", "accounting", "enabled"]) {
            return None;
        }
        if attrs.get_str(&["slurm", "role"]) != Some("scheduler") {
            return None;
        }
        Some(vec![
            Resource::package("mariadb-server"),
            Resource::service("mariadb", &[ServiceAction::Enable, ServiceAction::Start]),
        ])
    }
}
