//! The `Host` seam: everything the engine knows about the machine.
//!
//! Read methods take `&self` and mutating methods take `&mut self`. The
//! prober only ever receives a shared reference, so it cannot change
//! system state.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::HostResult;
use crate::resource::{MountSpec, Ownership, ServiceAction};

/// Enabled/running bits of a service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceState {
    pub enabled: bool,
    pub active: bool,
}

impl ServiceState {
    /// Whether `action` would leave the service unchanged.
    pub fn satisfies(&self, action: ServiceAction) -> bool {
        match action {
            ServiceAction::Enable => self.enabled,
            ServiceAction::Disable => !self.enabled,
            ServiceAction::Start => self.active,
            ServiceAction::Stop => !self.active,
        }
    }

    /// The state after `action` has been applied.
    pub fn after(mut self, action: ServiceAction) -> Self {
        match action {
            ServiceAction::Enable => self.enabled = true,
            ServiceAction::Disable => self.enabled = false,
            ServiceAction::Start => self.active = true,
            ServiceAction::Stop => self.active = false,
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    Other,
}

/// Observed metadata of an existing path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathState {
    pub kind: PathKind,
    /// Hex SHA-256 of the content, for regular files.
    pub digest: Option<String>,
    pub ownership: Ownership,
}

/// One line of a mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fstype: String,
    pub options: String,
}

impl MountEntry {
    pub fn from_spec(spec: &MountSpec) -> Self {
        Self {
            device: spec.device.clone(),
            mount_point: spec.mount_point.display().to_string(),
            fstype: spec.fstype.clone(),
            options: spec.options.clone(),
        }
    }
}

/// Persistent and live mount state for one mount point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountState {
    /// The fstab entry for the mount point, if any.
    pub persistent: Option<MountEntry>,
    /// Device currently mounted at the mount point, if any.
    pub mounted_device: Option<String>,
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn exited(code: i32, stdout: &str) -> Self {
        Self {
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Hex SHA-256 digest used to compare file content.
pub fn content_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub trait Host {
    fn package_installed(&self, name: &str) -> HostResult<bool>;

    fn install_package(&mut self, name: &str) -> HostResult<()>;

    fn service_state(&self, name: &str) -> HostResult<ServiceState>;

    fn service_action(&mut self, name: &str, action: ServiceAction) -> HostResult<()>;

    /// `Ok(None)` when nothing exists at `path`.
    fn path_state(&self, path: &Path) -> HostResult<Option<PathState>>;

    fn write_file(&mut self, path: &Path, content: &[u8], ownership: &Ownership) -> HostResult<()>;

    fn create_directory(
        &mut self,
        path: &Path,
        ownership: &Ownership,
        recursive: bool,
    ) -> HostResult<()>;

    fn mount_state(&self, mount_point: &Path) -> HostResult<MountState>;

    /// Persist `spec` in the mount table and make sure it is mounted.
    fn apply_mount(&mut self, spec: &MountSpec) -> HostResult<()>;

    /// Run a read-only status command.
    fn inspect(&self, argv: &[String]) -> HostResult<CommandOutput>;

    /// Run a side-effecting command.
    fn execute(&mut self, argv: &[String]) -> HostResult<CommandOutput>;
}
