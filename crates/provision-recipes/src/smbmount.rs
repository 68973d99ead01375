//! Mount an Azure Files share over SMB with a generated credentials file.

use std::path::{Path, PathBuf};

use provision_core::AttributeStore;
use provision_engine::{MountSpec, Ownership, Resource};
use tracing::debug;

use crate::Recipe;

pub const CREDENTIALS_DIR: &str = "/etc/smbcredentials";
pub const DEFAULT_OPTIONS: &str =
    "nofail,dir_mode=0777,file_mode=0777,serverino,nosharesock,actimeo=30";

pub struct SmbMount;

impl Recipe for SmbMount {
    fn name(&self) -> &'static str {
        "smbmount"
    }

    fn build(&self, attrs: &dyn AttributeStore) -> Option<Vec<Resource>> {
        if !attrs.is_truthy(&["smbmount", "enabled"]) {
            return None;
        }
        let account = attrs.get_non_empty(&["smbmount", "sa"])?;
        let key = attrs.get_non_empty(&["smbmount", "key"])?;
        let mount_point = attrs.get_non_empty(&["smbmount", "mountpoint"])?;
        let share = attrs.get_non_empty(&["smbmount", "fileshare"])?;

        let credfile = credentials_path(account);
        let source = share_source(account, share);
        let options = mount_options(attrs.get_str(&["smbmount", "options"]), &credfile);

        debug!(%source, mount_point, "enable SMB mount");

        Some(vec![
            Resource::package("cifs-utils"),
            Resource::directory(CREDENTIALS_DIR, Ownership::root(0o700), true),
            Resource::file(
                credfile,
                credentials_content(account, key),
                Ownership::root(0o400),
            ),
            Resource::directory(mount_point, Ownership::root(0o755), true),
            Resource::mount(MountSpec {
                mount_point: PathBuf::from(mount_point),
                device: source,
                fstype: "cifs".to_string(),
                options,
            }),
        ])
    }
}

pub fn credentials_path(account: &str) -> PathBuf {
    Path::new(CREDENTIALS_DIR).join(format!("{account}.cred"))
}

pub fn credentials_content(account: &str, key: &str) -> String {
    format!("username={account}\npassword={key}\n")
}

pub fn share_source(account: &str, share: &str) -> String {
    format!("//{account}.file.core.windows.net/{share}")
}

/// Configured options replace the defaults only when non-empty; the
/// credentials option is always appended last.
pub fn mount_options(configured: Option<&str>, credfile: &Path) -> String {
    let base = configured
        .filter(|options| !options.is_empty())
        .unwrap_or(DEFAULT_OPTIONS);
    format!("{base},credentials={}", credfile.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use provision_core::NodeAttributes;
    use provision_engine::{ConvergenceResult, DesiredState, MemoryHost, converge};
    use serde_json::json;

    fn smb_attrs(options: serde_json::Value) -> NodeAttributes {
        NodeAttributes::new(json!({
            "smbmount": {
                "enabled": true,
                "sa": "acct1",
                "key": "secret",
                "mountpoint": "/mnt/share",
                "fileshare": "data",
                "options": options,
            }
        }))
    }

    #[test]
    fn credentials_content_is_exact() {
        assert_eq!(
            credentials_content("acct1", "secret"),
            "username=acct1\npassword=secret\n"
        );
    }

    #[test]
    fn options_fall_back_to_default_when_empty() {
        let credfile = credentials_path("acct1");
        let expected = format!("{DEFAULT_OPTIONS},credentials=/etc/smbcredentials/acct1.cred");
        assert_eq!(mount_options(Some(""), &credfile), expected);
        assert_eq!(mount_options(None, &credfile), expected);
    }

    #[test]
    fn configured_options_replace_default() {
        assert_eq!(
            mount_options(Some("ro"), &credentials_path("acct1")),
            "ro,credentials=/etc/smbcredentials/acct1.cred"
        );
    }

    #[test]
    fn builds_resources_in_dependency_order() {
        let resources = SmbMount.build(&smb_attrs(json!("ro"))).unwrap();
        let ids: Vec<_> = resources.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            ids,
            vec![
                "package[cifs-utils]",
                "directory[/etc/smbcredentials]",
                "file[/etc/smbcredentials/acct1.cred]",
                "directory[/mnt/share]",
                "mount[/mnt/share]",
            ]
        );

        let DesiredState::File(cred) = &resources[2].desired else {
            panic!("expected credentials file");
        };
        assert_eq!(cred.content, "username=acct1\npassword=secret\n");
        assert_eq!(cred.ownership, Ownership::root(0o400));

        let DesiredState::Directory(dir) = &resources[1].desired else {
            panic!("expected credentials directory");
        };
        assert_eq!(dir.ownership.mode, 0o700);
        assert!(dir.recursive);

        let DesiredState::Mount(mount) = &resources[4].desired else {
            panic!("expected mount");
        };
        assert_eq!(mount.device, "//acct1.file.core.windows.net/data");
        assert_eq!(mount.fstype, "cifs");
        assert_eq!(mount.options, "ro,credentials=/etc/smbcredentials/acct1.cred");
    }

    #[test]
    fn disabled_or_incomplete_builds_nothing() {
        let disabled = NodeAttributes::new(json!({ "smbmount": { "enabled": false, "sa": "a" } }));
        assert!(SmbMount.build(&disabled).is_none());

        let no_key = NodeAttributes::new(json!({
            "smbmount": { "enabled": true, "sa": "a", "mountpoint": "/mnt", "fileshare": "f" }
        }));
        assert!(SmbMount.build(&no_key).is_none());

        assert!(SmbMount.build(&NodeAttributes::new(json!({}))).is_none());
    }

    #[test]
    fn converges_then_settles() {
        let attrs = smb_attrs(json!(""));
        let resources = SmbMount.build(&attrs).unwrap();
        let mut host = MemoryHost::new();

        let first = converge(&resources, &attrs, &mut host);
        assert_eq!(first.summary().applied, 5);
        assert_eq!(
            host.file_content("/etc/smbcredentials/acct1.cred").as_deref(),
            Some("username=acct1\npassword=secret\n")
        );

        let second = converge(&resources, &attrs, &mut host);
        assert!(
            second
                .outcomes()
                .iter()
                .all(|o| matches!(o.result, ConvergenceResult::Unchanged))
        );
    }
}
