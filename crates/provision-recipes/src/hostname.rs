//! Set the static hostname from the portal server name.

use provision_core::AttributeStore;
use provision_engine::{CommandGuardSpec, Resource};

use crate::Recipe;

/// Exit codes of `hostnamectl status` that still carry a usable answer.
const STATUS_EXIT_CODES: [i32; 2] = [0, 1];

pub struct ServerHostname;

impl Recipe for ServerHostname {
    fn name(&self) -> &'static str {
        "ood_server_hostname"
    }

    fn build(&self, attrs: &dyn AttributeStore) -> Option<Vec<Resource>> {
        let server_name = attrs.get_str(&["ondemand", "portal", "serverName"])?;
        let label = hostname_label(server_name)?;
        Some(vec![set_hostname(label)])
    }
}

/// First dot-delimited label of `server_name`, if non-empty.
pub fn hostname_label(server_name: &str) -> Option<&str> {
    server_name.split('.').next().filter(|label| !label.is_empty())
}

/// Run `hostnamectl set-hostname` unless the static hostname already matches.
pub fn set_hostname(label: &str) -> Resource {
    Resource::command_guard(CommandGuardSpec {
        command: vec![
            "hostnamectl".to_string(),
            "set-hostname".to_string(),
            label.to_string(),
        ],
        status: vec!["hostnamectl".to_string(), "status".to_string()],
        allowed_exit: STATUS_EXIT_CODES.to_vec(),
        expect: format!(r"Static hostname:\s+{}", regex::escape(label)),
    })
}
