//! State probes.
//!
//! A probe compares the current state of one resource against its desired
//! state. Probes only receive `&dyn Host` and never change the machine.

use regex::Regex;
use tracing::debug;

use crate::error::ProbeError;
use crate::host::{Host, MountEntry, PathKind, PathState, content_digest};
use crate::resource::{
    CommandGuardSpec, DesiredState, DirectorySpec, FileSpec, MountSpec, Resource, ServiceSpec,
};

/// Result of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Current state already equals the desired state.
    Matches,
    /// The resource needs its action applied.
    Mismatches,
}

impl ProbeOutcome {
    fn from_bool(matches: bool) -> Self {
        if matches {
            ProbeOutcome::Matches
        } else {
            ProbeOutcome::Mismatches
        }
    }
}

/// Inspect the host and report whether `resource` is already converged.
pub fn probe(resource: &Resource, host: &dyn Host) -> Result<ProbeOutcome, ProbeError> {
    let outcome = match &resource.desired {
        DesiredState::Package(pkg) => ProbeOutcome::from_bool(host.package_installed(&pkg.name)?),
        DesiredState::Service(svc) => probe_service(svc, host)?,
        DesiredState::File(file) => probe_file(file, host)?,
        DesiredState::Directory(dir) => probe_directory(dir, host)?,
        DesiredState::Mount(mount) => probe_mount(mount, host)?,
        DesiredState::CommandGuard(guard) => probe_command_guard(guard, host)?,
    };
    debug!(resource = %resource, ?outcome, "probed");
    Ok(outcome)
}

fn probe_service(svc: &ServiceSpec, host: &dyn Host) -> Result<ProbeOutcome, ProbeError> {
    let state = host.service_state(&svc.name)?;
    Ok(ProbeOutcome::from_bool(
        svc.actions.iter().all(|action| state.satisfies(*action)),
    ))
}

fn probe_file(file: &FileSpec, host: &dyn Host) -> Result<ProbeOutcome, ProbeError> {
    let matches = match host.path_state(&file.path)? {
        Some(PathState {
            kind: PathKind::File,
            digest,
            ownership,
        }) => {
            digest.as_deref() == Some(content_digest(file.content.as_bytes()).as_str())
                && ownership == file.ownership
        }
        _ => false,
    };
    Ok(ProbeOutcome::from_bool(matches))
}

fn probe_directory(dir: &DirectorySpec, host: &dyn Host) -> Result<ProbeOutcome, ProbeError> {
    let matches = matches!(
        host.path_state(&dir.path)?,
        Some(PathState { kind: PathKind::Directory, ownership, .. }) if ownership == dir.ownership
    );
    Ok(ProbeOutcome::from_bool(matches))
}

fn probe_mount(mount: &MountSpec, host: &dyn Host) -> Result<ProbeOutcome, ProbeError> {
    let state = host.mount_state(&mount.mount_point)?;
    let desired = MountEntry::from_spec(mount);
    Ok(ProbeOutcome::from_bool(
        state.persistent.as_ref() == Some(&desired)
            && state.mounted_device.as_deref() == Some(mount.device.as_str()),
    ))
}

fn probe_command_guard(
    guard: &CommandGuardSpec,
    host: &dyn Host,
) -> Result<ProbeOutcome, ProbeError> {
    let pattern = Regex::new(&guard.expect)?;
    let output = host.inspect(&guard.status)?;

    let allowed = output
        .code
        .is_some_and(|code| guard.allowed_exit.contains(&code));
    if !allowed {
        return Err(ProbeError::UnexpectedExit {
            command: guard.status.join(" "),
            code: output.code,
            allowed: guard.allowed_exit.clone(),
        });
    }

    Ok(ProbeOutcome::from_bool(pattern.is_match(&output.stdout)))
}
