//! In-memory host used by tests.
//!
//! Holds packages, services, paths, mounts, and scripted command output.
//! Every read and write is counted so callers can assert that a resource
//! was never probed or applied.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{HostError, HostResult};
use crate::host::{
    CommandOutput, Host, MountEntry, MountState, PathKind, PathState, ServiceState, content_digest,
};
use crate::resource::{MountSpec, Ownership, ServiceAction};

#[derive(Debug, Clone)]
struct MemoryPath {
    kind: PathKind,
    content: Option<String>,
    ownership: Ownership,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    packages: BTreeSet<String>,
    services: BTreeMap<String, ServiceState>,
    paths: BTreeMap<PathBuf, MemoryPath>,
    mounts: BTreeMap<PathBuf, MountState>,
    /// Output returned for a command line, keyed by the joined argv.
    commands: HashMap<String, CommandOutput>,
    /// Executing the key replaces the output of another command.
    effects: HashMap<String, (String, CommandOutput)>,
    /// Identities whose mutations fail.
    failing: BTreeSet<String>,
    executed: Vec<String>,
    reads: Cell<usize>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: &str) -> Self {
        self.packages.insert(name.to_string());
        self
    }

    pub fn with_service(mut self, name: &str, state: ServiceState) -> Self {
        self.services.insert(name.to_string(), state);
        self
    }

    pub fn with_file(mut self, path: &str, content: &str, ownership: Ownership) -> Self {
        self.paths.insert(
            PathBuf::from(path),
            MemoryPath {
                kind: PathKind::File,
                content: Some(content.to_string()),
                ownership,
            },
        );
        self
    }

    pub fn with_directory(mut self, path: &str, ownership: Ownership) -> Self {
        self.paths.insert(
            PathBuf::from(path),
            MemoryPath {
                kind: PathKind::Directory,
                content: None,
                ownership,
            },
        );
        self
    }

    pub fn with_mount(mut self, spec: &MountSpec, mounted: bool) -> Self {
        self.mounts.insert(
            spec.mount_point.clone(),
            MountState {
                persistent: Some(MountEntry::from_spec(spec)),
                mounted_device: mounted.then(|| spec.device.clone()),
            },
        );
        self
    }

    pub fn with_command(mut self, argv: &[&str], output: CommandOutput) -> Self {
        self.commands.insert(argv.join(" "), output);
        self
    }

    /// After `argv` is executed, `status` answers with `output`.
    pub fn with_command_effect(mut self, argv: &[&str], status: &[&str], output: CommandOutput) -> Self {
        self.effects
            .insert(argv.join(" "), (status.join(" "), output));
        self
    }

    /// Make every mutation of `identity` fail.
    pub fn fail_on(mut self, identity: &str) -> Self {
        self.failing.insert(identity.to_string());
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn writes(&self) -> usize {
        self.executed.len()
    }

    /// Every mutation in order, rendered as the equivalent command.
    pub fn executed(&self) -> Vec<String> {
        self.executed.clone()
    }

    pub fn has_package(&self, name: &str) -> bool {
        self.packages.contains(name)
    }

    pub fn service(&self, name: &str) -> ServiceState {
        self.services.get(name).copied().unwrap_or_default()
    }

    pub fn file_content(&self, path: &str) -> Option<String> {
        self.paths.get(Path::new(path))?.content.clone()
    }

    pub fn ownership(&self, path: &str) -> Option<Ownership> {
        self.paths.get(Path::new(path)).map(|p| p.ownership.clone())
    }

    fn read(&self) {
        self.reads.set(self.reads.get() + 1);
    }

    fn mutate(&mut self, identity: &str, rendered: String) -> HostResult<()> {
        if self.failing.contains(identity) {
            return Err(HostError::CommandFailed {
                command: rendered,
                code: Some(1),
                stderr: "injected failure".to_string(),
            });
        }
        self.executed.push(rendered);
        Ok(())
    }

    fn output_for(&self, line: &str) -> CommandOutput {
        self.commands
            .get(line)
            .cloned()
            .unwrap_or_else(|| CommandOutput::exited(0, ""))
    }
}

impl Host for MemoryHost {
    fn package_installed(&self, name: &str) -> HostResult<bool> {
        self.read();
        Ok(self.packages.contains(name))
    }

    fn install_package(&mut self, name: &str) -> HostResult<()> {
        self.mutate(name, format!("install {name}"))?;
        self.packages.insert(name.to_string());
        Ok(())
    }

    fn service_state(&self, name: &str) -> HostResult<ServiceState> {
        self.read();
        Ok(self.service(name))
    }

    fn service_action(&mut self, name: &str, action: ServiceAction) -> HostResult<()> {
        self.mutate(name, format!("systemctl {} {name}", action.verb()))?;
        let state = self.service(name).after(action);
        self.services.insert(name.to_string(), state);
        Ok(())
    }

    fn path_state(&self, path: &Path) -> HostResult<Option<PathState>> {
        self.read();
        Ok(self.paths.get(path).map(|p| PathState {
            kind: p.kind,
            digest: p.content.as_deref().map(|c| content_digest(c.as_bytes())),
            ownership: p.ownership.clone(),
        }))
    }

    fn write_file(&mut self, path: &Path, content: &[u8], ownership: &Ownership) -> HostResult<()> {
        let display = path.display().to_string();
        self.mutate(&display, format!("write {display}"))?;
        self.paths.insert(
            path.to_path_buf(),
            MemoryPath {
                kind: PathKind::File,
                content: Some(String::from_utf8_lossy(content).into_owned()),
                ownership: ownership.clone(),
            },
        );
        Ok(())
    }

    fn create_directory(
        &mut self,
        path: &Path,
        ownership: &Ownership,
        _recursive: bool,
    ) -> HostResult<()> {
        let display = path.display().to_string();
        self.mutate(&display, format!("mkdir {display}"))?;
        self.paths.insert(
            path.to_path_buf(),
            MemoryPath {
                kind: PathKind::Directory,
                content: None,
                ownership: ownership.clone(),
            },
        );
        Ok(())
    }

    fn mount_state(&self, mount_point: &Path) -> HostResult<MountState> {
        self.read();
        Ok(self.mounts.get(mount_point).cloned().unwrap_or_default())
    }

    fn apply_mount(&mut self, spec: &MountSpec) -> HostResult<()> {
        let display = spec.mount_point.display().to_string();
        self.mutate(&display, format!("mount {display}"))?;
        self.mounts.insert(
            spec.mount_point.clone(),
            MountState {
                persistent: Some(MountEntry::from_spec(spec)),
                mounted_device: Some(spec.device.clone()),
            },
        );
        Ok(())
    }

    fn inspect(&self, argv: &[String]) -> HostResult<CommandOutput> {
        self.read();
        if argv.is_empty() {
            return Err(HostError::EmptyCommand);
        }
        Ok(self.output_for(&argv.join(" ")))
    }

    fn execute(&mut self, argv: &[String]) -> HostResult<CommandOutput> {
        if argv.is_empty() {
            return Err(HostError::EmptyCommand);
        }
        let line = argv.join(" ");
        self.mutate(&line, line.clone())?;
        let output = self.output_for(&line);
        if output.success() {
            if let Some((status, after)) = self.effects.get(&line).cloned() {
                self.commands.insert(status, after);
            }
        }
        Ok(output)
    }
}
