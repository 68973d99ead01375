//! Actions that bring one resource to its desired state.
//!
//! Each kind has exactly one action. Actions run once; failures are
//! reported to the caller and never retried.

use tracing::info;

use crate::error::ApplyError;
use crate::host::{CommandOutput, Host};
use crate::resource::{CommandGuardSpec, DesiredState, Resource, ServiceSpec};

/// Apply the action for `resource`. Only called after a probe reported a mismatch.
pub fn apply(resource: &Resource, host: &mut dyn Host) -> Result<(), ApplyError> {
    match &resource.desired {
        DesiredState::Package(pkg) => host.install_package(&pkg.name)?,
        DesiredState::Service(svc) => apply_service(svc, host)?,
        DesiredState::File(file) => {
            host.write_file(&file.path, file.content.as_bytes(), &file.ownership)?
        }
        DesiredState::Directory(dir) => {
            host.create_directory(&dir.path, &dir.ownership, dir.recursive)?
        }
        DesiredState::Mount(mount) => host.apply_mount(mount)?,
        DesiredState::CommandGuard(guard) => apply_command(guard, host)?,
    }
    info!(resource = %resource, "applied");
    Ok(())
}

/// Run the service actions that the current state does not already satisfy.
fn apply_service(svc: &ServiceSpec, host: &mut dyn Host) -> Result<(), ApplyError> {
    let mut state = host.service_state(&svc.name)?;
    for action in &svc.actions {
        if state.satisfies(*action) {
            continue;
        }
        host.service_action(&svc.name, *action)?;
        state = state.after(*action);
    }
    Ok(())
}

fn apply_command(guard: &CommandGuardSpec, host: &mut dyn Host) -> Result<(), ApplyError> {
    let CommandOutput { code, stderr, .. } = host.execute(&guard.command)?;
    if code != Some(0) {
        return Err(ApplyError::Command {
            command: guard.command.join(" "),
            code,
            stderr: stderr.trim().to_string(),
        });
    }
    Ok(())
}
