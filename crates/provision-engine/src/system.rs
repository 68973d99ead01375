//! `SystemHost`, the real machine.
//!
//! Packages go through rpm/dnf or dpkg/apt, services through systemctl,
//! mounts through the fstab file plus `mount(8)`. Files, fstab included,
//! are staged in a private temporary file beside the target and renamed
//! into place once mode and ownership are set.

use std::fs;
use std::io::{ErrorKind, Write};
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::process::Command;

use nix::unistd::{Gid, Group, Uid, User};
use provision_core::{HostConfig, PackageManager};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{HostError, HostResult};
use crate::host::{
    CommandOutput, Host, MountEntry, MountState, PathKind, PathState, ServiceState, content_digest,
};
use crate::resource::{MountSpec, Ownership, ServiceAction};

#[derive(Debug, Clone)]
pub struct SystemHost {
    package_manager: PackageManager,
    fstab: PathBuf,
    mounts: PathBuf,
}

impl SystemHost {
    pub fn new(config: &HostConfig) -> Self {
        Self {
            package_manager: config.package_manager,
            fstab: config.fstab.clone(),
            mounts: config.mounts.clone(),
        }
    }

    fn run(&self, argv: &[String]) -> HostResult<CommandOutput> {
        let (program, args) = argv.split_first().ok_or(HostError::EmptyCommand)?;
        let line = argv.join(" ");
        debug!(command = %line, "running");

        let mut cmd = Command::new(program);
        cmd.args(args);
        if self.package_manager == PackageManager::Apt {
            cmd.env("DEBIAN_FRONTEND", "noninteractive");
        }
        let output = cmd.output().map_err(|source| HostError::Spawn {
            command: line,
            source,
        })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Run a command that must exit successfully.
    fn run_checked(&self, argv: &[String]) -> HostResult<CommandOutput> {
        let output = self.run(argv)?;
        if !output.success() {
            return Err(HostError::CommandFailed {
                command: argv.join(" "),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }

    fn read_table(path: &Path) -> HostResult<String> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(HostError::io(path.display(), e)),
        }
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

impl Host for SystemHost {
    fn package_installed(&self, name: &str) -> HostResult<bool> {
        match self.package_manager {
            PackageManager::Dnf => Ok(self.run(&argv(&["rpm", "-q", name]))?.success()),
            PackageManager::Apt => {
                let output = self.run(&argv(&["dpkg-query", "-W", "-f=${Status}", name]))?;
                Ok(output.success() && output.stdout.contains("install ok installed"))
            }
        }
    }

    fn install_package(&mut self, name: &str) -> HostResult<()> {
        let cmd = match self.package_manager {
            PackageManager::Dnf => argv(&["dnf", "install", "-y", name]),
            PackageManager::Apt => argv(&["apt-get", "install", "-y", name]),
        };
        self.run_checked(&cmd)?;
        Ok(())
    }

    fn service_state(&self, name: &str) -> HostResult<ServiceState> {
        Ok(ServiceState {
            enabled: self.run(&argv(&["systemctl", "is-enabled", name]))?.success(),
            active: self.run(&argv(&["systemctl", "is-active", name]))?.success(),
        })
    }

    fn service_action(&mut self, name: &str, action: ServiceAction) -> HostResult<()> {
        self.run_checked(&argv(&["systemctl", action.verb(), name]))?;
        Ok(())
    }

    fn path_state(&self, path: &Path) -> HostResult<Option<PathState>> {
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(HostError::io(path.display(), e)),
        };

        let kind = if meta.is_file() {
            PathKind::File
        } else if meta.is_dir() {
            PathKind::Directory
        } else {
            PathKind::Other
        };
        let digest = match kind {
            PathKind::File => {
                let bytes = fs::read(path).map_err(|e| HostError::io(path.display(), e))?;
                Some(content_digest(&bytes))
            }
            _ => None,
        };

        Ok(Some(PathState {
            kind,
            digest,
            ownership: Ownership {
                owner: user_name(meta.uid())?,
                group: group_name(meta.gid())?,
                mode: meta.permissions().mode() & 0o7777,
            },
        }))
    }

    fn write_file(&mut self, path: &Path, content: &[u8], ownership: &Ownership) -> HostResult<()> {
        replace_file(path, content, Some(ownership))
    }

    fn create_directory(
        &mut self,
        path: &Path,
        ownership: &Ownership,
        recursive: bool,
    ) -> HostResult<()> {
        let created = if recursive {
            fs::create_dir_all(path)
        } else {
            fs::create_dir(path)
        };
        match created {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => {}
            Err(e) => return Err(HostError::io(path.display(), e)),
        }
        set_ownership(path, ownership)
    }

    fn mount_state(&self, mount_point: &Path) -> HostResult<MountState> {
        let target = mount_point.display().to_string();
        let persistent = parse_mount_table(&Self::read_table(&self.fstab)?)
            .into_iter()
            .find(|e| e.mount_point == target);
        let mounted_device = parse_mount_table(&Self::read_table(&self.mounts)?)
            .into_iter()
            .rev()
            .find(|e| e.mount_point == target)
            .map(|e| e.device);
        Ok(MountState {
            persistent,
            mounted_device,
        })
    }

    fn apply_mount(&mut self, spec: &MountSpec) -> HostResult<()> {
        let current = self.mount_state(&spec.mount_point)?;
        let desired = MountEntry::from_spec(spec);

        let fstab_changed = current.persistent.as_ref() != Some(&desired);
        if fstab_changed {
            let updated = upsert_fstab(&Self::read_table(&self.fstab)?, &desired);
            replace_file(&self.fstab, updated.as_bytes(), None)?;
            debug!(fstab = %self.fstab.display(), mount_point = %desired.mount_point, "fstab updated");
        }

        for command in mount_commands(spec, current.mounted_device.as_deref(), fstab_changed) {
            self.run_checked(&command)?;
        }

        let mounted_device = self.mount_state(&spec.mount_point)?.mounted_device;
        if mounted_device.as_deref() != Some(spec.device.as_str()) {
            return Err(HostError::MountNotConverged {
                mount_point: desired.mount_point,
                expected: spec.device.clone(),
                found: mounted_device,
            });
        }
        Ok(())
    }

    fn inspect(&self, argv: &[String]) -> HostResult<CommandOutput> {
        self.run(argv)
    }

    fn execute(&mut self, argv: &[String]) -> HostResult<CommandOutput> {
        self.run(argv)
    }
}

fn user_name(uid: u32) -> HostResult<String> {
    Ok(User::from_uid(Uid::from_raw(uid))?
        .map(|u| u.name)
        .unwrap_or_else(|| uid.to_string()))
}

fn group_name(gid: u32) -> HostResult<String> {
    Ok(Group::from_gid(Gid::from_raw(gid))?
        .map(|g| g.name)
        .unwrap_or_else(|| gid.to_string()))
}

/// Stage `content` in a fresh private file beside `path`.
///
/// The staging file is created exclusively with mode 0600 under a random
/// name, and removed again if it is dropped before being persisted.
fn stage(path: &Path, content: &[u8]) -> HostResult<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| HostError::io(path.display(), ErrorKind::InvalidInput.into()))?;

    let mut staged = tempfile::Builder::new()
        .prefix(&format!(".{}.", file_name.to_string_lossy()))
        .suffix(".provision-tmp")
        .tempfile_in(dir)
        .map_err(|e| HostError::io(dir.display(), e))?;
    staged
        .write_all(content)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| HostError::io(staged.path().display(), e))?;
    Ok(staged)
}

/// Atomically replace `path` with `content`.
///
/// With `ownership`, owner, group and mode are set on the staged file before
/// the rename. Without it, the mode of the file being replaced is kept
/// (0644 for a new file).
fn replace_file(path: &Path, content: &[u8], ownership: Option<&Ownership>) -> HostResult<()> {
    let staged = stage(path, content)?;
    match ownership {
        Some(ownership) => set_ownership(staged.path(), ownership)?,
        None => {
            let mode = fs::metadata(path)
                .map(|meta| meta.permissions().mode() & 0o7777)
                .unwrap_or(0o644);
            fs::set_permissions(staged.path(), fs::Permissions::from_mode(mode))
                .map_err(|e| HostError::io(staged.path().display(), e))?;
        }
    }
    staged
        .persist(path)
        .map_err(|e| HostError::io(path.display(), e.error))?;
    Ok(())
}

/// Commands that bring the live mount at `spec.mount_point` to `spec`, given
/// the device mounted there now and whether its fstab line was rewritten.
///
/// A foreign device is unmounted first; a remount can only change options.
pub fn mount_commands(
    spec: &MountSpec,
    mounted_device: Option<&str>,
    fstab_changed: bool,
) -> Vec<Vec<String>> {
    let mount_point = spec.mount_point.display().to_string();
    let mount = argv(&[
        "mount",
        "-t",
        spec.fstype.as_str(),
        "-o",
        spec.options.as_str(),
        spec.device.as_str(),
        mount_point.as_str(),
    ]);
    match mounted_device {
        None => vec![mount],
        Some(device) if device != spec.device => vec![argv(&["umount", mount_point.as_str()]), mount],
        Some(_) if fstab_changed => {
            let options = format!("remount,{}", spec.options);
            vec![argv(&["mount", "-o", options.as_str(), mount_point.as_str()])]
        }
        Some(_) => Vec::new(),
    }
}

fn set_ownership(path: &Path, ownership: &Ownership) -> HostResult<()> {
    let user = User::from_name(&ownership.owner)?
        .ok_or_else(|| HostError::UnknownUser(ownership.owner.clone()))?;
    let group = Group::from_name(&ownership.group)?
        .ok_or_else(|| HostError::UnknownGroup(ownership.group.clone()))?;

    nix::unistd::chown(path, Some(user.uid), Some(group.gid))
        .map_err(|e| HostError::io(path.display(), e.into()))?;
    fs::set_permissions(path, fs::Permissions::from_mode(ownership.mode))
        .map_err(|e| HostError::io(path.display(), e))
}

/// Parse fstab / `/proc/mounts` content. Comments and short lines are ignored.
pub fn parse_mount_table(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            Some(MountEntry {
                device: unescape_field(fields.next()?),
                mount_point: unescape_field(fields.next()?),
                fstype: fields.next()?.to_string(),
                options: fields.next().unwrap_or("defaults").to_string(),
            })
        })
        .collect()
}

/// Replace the line for `entry.mount_point` in an fstab, or append one.
pub fn upsert_fstab(content: &str, entry: &MountEntry) -> String {
    let line = format!(
        "{} {} {} {} 0 0",
        escape_field(&entry.device),
        escape_field(&entry.mount_point),
        entry.fstype,
        entry.options
    );

    let mut replaced = false;
    let mut lines: Vec<String> = Vec::new();
    for existing in content.lines() {
        let targets_mount_point = parse_mount_table(existing)
            .first()
            .is_some_and(|e| e.mount_point == entry.mount_point);
        if targets_mount_point {
            if !replaced {
                lines.push(line.clone());
                replaced = true;
            }
        } else {
            lines.push(existing.to_string());
        }
    }
    if !replaced {
        lines.push(line);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Mount tables encode whitespace in fields as octal escapes (`\040`).
fn unescape_field(field: &str) -> String {
    field
        .replace("\\040", " ")
        .replace("\\011", "\t")
        .replace("\\012", "\n")
        .replace("\\134", "\\")
}

fn escape_field(field: &str) -> String {
    field
        .replace('\\', "\\134")
        .replace(' ', "\\040")
        .replace('\t', "\\011")
        .replace('\n', "\\012")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeOutcome, probe};
    use crate::resource::Resource;
    use crate::runner::{ConvergenceResult, converge};
    use provision_core::NodeAttributes;

    fn current_ownership(mode: u32) -> Ownership {
        Ownership {
            owner: user_name(nix::unistd::getuid().as_raw()).unwrap(),
            group: group_name(nix::unistd::getgid().as_raw()).unwrap(),
            mode,
        }
    }

    fn host_in(dir: &Path) -> SystemHost {
        SystemHost::new(&HostConfig {
            package_manager: PackageManager::Dnf,
            fstab: dir.join("fstab"),
            mounts: dir.join("mounts"),
        })
    }

    #[test]
    fn parse_table_skips_comments() {
        let table = "\
# /etc/fstab
UUID=abc / xfs defaults 0 0

//sa.file.core.windows.net/share /mnt/my\\040share cifs ro,credentials=/x 0 0
";
        let entries = parse_mount_table(table);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].device, "//sa.file.core.windows.net/share");
        assert_eq!(entries[1].mount_point, "/mnt/my share");
        assert_eq!(entries[1].options, "ro,credentials=/x");
    }

    #[test]
    fn upsert_appends_new_entry() {
        let entry = MountEntry {
            device: "//sa/fs".into(),
            mount_point: "/mnt/fs".into(),
            fstype: "cifs".into(),
            options: "ro".into(),
        };
        let out = upsert_fstab("UUID=abc / xfs defaults 0 0\n", &entry);
        assert_eq!(out, "UUID=abc / xfs defaults 0 0\n//sa/fs /mnt/fs cifs ro 0 0\n");
    }

    #[test]
    fn upsert_replaces_existing_entry_once() {
        let entry = MountEntry {
            device: "//sa/fs".into(),
            mount_point: "/mnt/fs".into(),
            fstype: "cifs".into(),
            options: "rw".into(),
        };
        let before = "//sa/fs /mnt/fs cifs ro 0 0\n# keep\n//old/fs /mnt/fs cifs ro 0 0\n";
        let out = upsert_fstab(before, &entry);
        assert_eq!(out, "//sa/fs /mnt/fs cifs rw 0 0\n# keep\n");

        let parsed = parse_mount_table(&out);
        assert_eq!(parsed, vec![entry]);
    }

    #[test]
    fn mount_state_reads_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fstab"), "//sa/fs /mnt/fs cifs ro 0 0\n").unwrap();
        fs::write(dir.path().join("mounts"), "//sa/fs /mnt/fs cifs rw,relatime 0 0\n").unwrap();

        let host = host_in(dir.path());
        let state = host.mount_state(Path::new("/mnt/fs")).unwrap();
        assert_eq!(state.persistent.unwrap().options, "ro");
        assert_eq!(state.mounted_device.as_deref(), Some("//sa/fs"));

        let other = host.mount_state(Path::new("/mnt/other")).unwrap();
        assert_eq!(other, MountState::default());
    }

    #[test]
    fn missing_mount_tables_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let host = host_in(dir.path());
        assert_eq!(
            host.mount_state(Path::new("/mnt/fs")).unwrap(),
            MountState::default()
        );
    }

    #[test]
    fn write_file_then_path_state_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds");
        let ownership = current_ownership(0o400);
        let mut host = host_in(dir.path());

        host.write_file(&path, b"username=a\npassword=b\n", &ownership)
            .unwrap();

        let state = host.path_state(&path).unwrap().unwrap();
        assert_eq!(state.kind, PathKind::File);
        assert_eq!(state.ownership, ownership);
        assert_eq!(
            state.digest.as_deref(),
            Some(content_digest(b"username=a\npassword=b\n").as_str())
        );
        assert_eq!(leftovers(dir.path(), ".creds."), 0);
    }

    #[test]
    fn staged_content_is_private_until_ownership_is_set() {
        let dir = tempfile::tempdir().unwrap();
        let staged = stage(&dir.path().join("x.cred"), b"password=secret\n").unwrap();

        let mode = fs::metadata(staged.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        assert_eq!(fs::read(staged.path()).unwrap(), b"password=secret\n");
    }

    #[test]
    fn write_file_ignores_a_planted_staging_link() {
        let dir = tempfile::tempdir().unwrap();
        let victim = dir.path().join("victim");
        fs::write(&victim, "original").unwrap();
        std::os::unix::fs::symlink(&victim, dir.path().join(".creds.provision-tmp")).unwrap();

        let path = dir.path().join("creds");
        let mut host = host_in(dir.path());
        host.write_file(&path, b"password=secret\n", &current_ownership(0o400))
            .unwrap();

        assert_eq!(fs::read_to_string(&victim).unwrap(), "original");
        assert_eq!(fs::read_to_string(&path).unwrap(), "password=secret\n");
        assert!(!fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
    }

    fn leftovers(dir: &Path, prefix: &str) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter(|entry| {
                let name = entry.as_ref().unwrap().file_name();
                let name = name.to_string_lossy();
                name.starts_with(prefix) && name.ends_with(".provision-tmp")
            })
            .count()
    }

    fn share(dir: &Path) -> MountSpec {
        MountSpec {
            mount_point: dir.join("mnt"),
            device: "//sa/fs".into(),
            fstype: "cifs".into(),
            options: "ro".into(),
        }
    }

    fn fstab_line(spec: &MountSpec) -> String {
        format!("//sa/fs {} cifs {} 0 0", spec.mount_point.display(), spec.options)
    }

    #[test]
    fn mount_commands_cover_each_live_state() {
        let spec = MountSpec {
            mount_point: PathBuf::from("/mnt/fs"),
            device: "//sa/fs".into(),
            fstype: "cifs".into(),
            options: "ro".into(),
        };
        let mount = argv(&["mount", "-t", "cifs", "-o", "ro", "//sa/fs", "/mnt/fs"]);

        assert_eq!(mount_commands(&spec, None, true), vec![mount.clone()]);
        assert_eq!(mount_commands(&spec, None, false), vec![mount.clone()]);
        assert_eq!(
            mount_commands(&spec, Some("//sa/fs"), true),
            vec![argv(&["mount", "-o", "remount,ro", "/mnt/fs"])]
        );
        assert!(mount_commands(&spec, Some("//sa/fs"), false).is_empty());

        let foreign = vec![argv(&["umount", "/mnt/fs"]), mount];
        assert_eq!(mount_commands(&spec, Some("//other/old"), false), foreign);
        assert_eq!(mount_commands(&spec, Some("//other/old"), true), foreign);
    }

    #[test]
    fn apply_mount_rewrites_fstab_before_mounting() {
        let dir = tempfile::tempdir().unwrap();
        let fstab = dir.path().join("fstab");
        fs::write(&fstab, "UUID=abc / xfs defaults 0 0\n").unwrap();
        fs::set_permissions(&fstab, fs::Permissions::from_mode(0o640)).unwrap();
        let spec = share(dir.path());
        let mut host = host_in(dir.path());

        // The mount point does not exist, so mount(8) cannot succeed here.
        assert!(host.apply_mount(&spec).is_err());

        assert_eq!(
            fs::read_to_string(&fstab).unwrap(),
            format!("UUID=abc / xfs defaults 0 0\n{}\n", fstab_line(&spec))
        );
        assert_eq!(fs::metadata(&fstab).unwrap().permissions().mode() & 0o777, 0o640);
        assert_eq!(leftovers(dir.path(), ".fstab."), 0);
    }

    #[test]
    fn foreign_device_is_never_reported_as_applied() {
        let dir = tempfile::tempdir().unwrap();
        let spec = share(dir.path());
        let fstab = format!("{}\n", fstab_line(&spec));
        fs::write(dir.path().join("fstab"), &fstab).unwrap();
        fs::write(
            dir.path().join("mounts"),
            format!("//other/old {} cifs rw 0 0\n", spec.mount_point.display()),
        )
        .unwrap();
        let mut host = host_in(dir.path());
        let resources = [Resource::mount(spec.clone())];

        for _ in 0..2 {
            let report = converge(&resources, &NodeAttributes::default(), &mut host);
            assert!(report.outcomes()[0].result.is_failed());
        }
        assert_eq!(fs::read_to_string(dir.path().join("fstab")).unwrap(), fstab);
        assert_eq!(probe(&resources[0], &host).unwrap(), ProbeOutcome::Mismatches);
    }

    #[test]
    fn converged_mount_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let spec = share(dir.path());
        let fstab = format!("# static\n{}\n", fstab_line(&spec));
        fs::write(dir.path().join("fstab"), &fstab).unwrap();
        fs::write(
            dir.path().join("mounts"),
            format!("//sa/fs {} cifs ro,relatime 0 0\n", spec.mount_point.display()),
        )
        .unwrap();
        let mut host = host_in(dir.path());
        let resources = [Resource::mount(spec.clone())];

        let report = converge(&resources, &NodeAttributes::default(), &mut host);
        assert!(matches!(report.outcomes()[0].result, ConvergenceResult::Unchanged));
        assert_eq!(probe(&resources[0], &host).unwrap(), ProbeOutcome::Matches);

        // Applying anyway is a no-op that still verifies the live table.
        host.apply_mount(&spec).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("fstab")).unwrap(), fstab);
    }

    #[test]
    fn create_directory_recursive_sets_leaf_mode() {
        let dir = tempfile::tempdir().unwrap();
        let leaf = dir.path().join("a/b/c");
        let mut host = host_in(dir.path());

        host.create_directory(&leaf, &current_ownership(0o700), true)
            .unwrap();
        let state = host.path_state(&leaf).unwrap().unwrap();
        assert_eq!(state.kind, PathKind::Directory);
        assert_eq!(state.ownership.mode, 0o700);

        // Existing directory converges instead of failing.
        host.create_directory(&leaf, &current_ownership(0o755), false)
            .unwrap();
        assert_eq!(host.path_state(&leaf).unwrap().unwrap().ownership.mode, 0o755);
    }

    #[test]
    fn missing_path_state_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let host = host_in(dir.path());
        assert!(host.path_state(&dir.path().join("nope")).unwrap().is_none());
    }

    #[test]
    fn unknown_owner_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host_in(dir.path());
        let ownership = Ownership {
            owner: "no-such-user-provision".into(),
            group: "root".into(),
            mode: 0o644,
        };
        let err = host
            .write_file(&dir.path().join("f"), b"x", &ownership)
            .unwrap_err();
        assert!(matches!(err, HostError::UnknownUser(_)));
        assert!(!dir.path().join("f").exists());
    }

    #[test]
    fn empty_command_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let host = host_in(dir.path());
        assert!(matches!(host.inspect(&[]), Err(HostError::EmptyCommand)));
    }

    #[test]
    fn inspect_captures_exit_code_and_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let host = host_in(dir.path());
        let output = host
            .inspect(&argv(&["sh", "-c", "echo 'Static hostname: node01'; exit 1"]))
            .unwrap();
        assert_eq!(output.code, Some(1));
        assert!(output.stdout.contains("Static hostname: node01"));
    }
}
