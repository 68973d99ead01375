//! Resource descriptors, declarative statements of desired system state.
//!
//! A [`Resource`] is plain data: what the state should be, a [`Guard`]
//! deciding whether it applies at all, and whether it runs in the deferred
//! pass. Descriptors are built once per run and never mutated.

use std::fmt;
use std::path::PathBuf;

use provision_core::AttributeStore;
use serde::{Deserialize, Serialize};

/// Resource kind, used for display identities and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Package,
    Service,
    File,
    Directory,
    Mount,
    CommandGuard,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Package => "package",
            ResourceKind::Service => "service",
            ResourceKind::File => "file",
            ResourceKind::Directory => "directory",
            ResourceKind::Mount => "mount",
            ResourceKind::CommandGuard => "execute",
        }
    }
}

/// One desired unit of system state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub desired: DesiredState,
    #[serde(default)]
    pub guard: Guard,
    #[serde(default)]
    pub deferred: bool,
}

/// Kind-specific desired state payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DesiredState {
    Package(PackageSpec),
    Service(ServiceSpec),
    File(FileSpec),
    Directory(DirectorySpec),
    Mount(MountSpec),
    CommandGuard(CommandGuardSpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceAction {
    Enable,
    Start,
    Disable,
    Stop,
}

impl ServiceAction {
    pub fn verb(&self) -> &'static str {
        match self {
            ServiceAction::Enable => "enable",
            ServiceAction::Start => "start",
            ServiceAction::Disable => "disable",
            ServiceAction::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub name: String,
    /// Applied in order; each action is skipped if already satisfied.
    pub actions: Vec<ServiceAction>,
}

/// Owner, group, and permission bits of a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub owner: String,
    pub group: String,
    #[serde(with = "octal")]
    pub mode: u32,
}

impl Ownership {
    pub fn root(mode: u32) -> Self {
        Self {
            owner: "root".to_string(),
            group: "root".to_string(),
            mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
    pub ownership: Ownership,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySpec {
    pub path: PathBuf,
    pub ownership: Ownership,
    /// Create missing parents. Ownership applies to the leaf only.
    pub recursive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountSpec {
    pub mount_point: PathBuf,
    pub device: String,
    pub fstype: String,
    pub options: String,
}

/// Run `command` unless the output of `status` matches `expect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandGuardSpec {
    pub command: Vec<String>,
    pub status: Vec<String>,
    /// Exit codes of `status` that count as a valid answer.
    pub allowed_exit: Vec<i32>,
    /// Regex matched against the stdout of `status`.
    pub expect: String,
}

/// Precondition over the node attributes. Evaluated before any I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    #[default]
    Always,
    /// The path exists and is not null.
    Present(Vec<String>),
    /// The path holds anything other than null or `false`.
    Truthy(Vec<String>),
    /// The path holds exactly this string.
    Equals(Vec<String>, String),
    All(Vec<Guard>),
    Not(Box<Guard>),
}

impl Guard {
    pub fn present(path: &[&str]) -> Self {
        Guard::Present(owned_path(path))
    }

    pub fn truthy(path: &[&str]) -> Self {
        Guard::Truthy(owned_path(path))
    }

    pub fn equals(path: &[&str], value: &str) -> Self {
        Guard::Equals(owned_path(path), value.to_string())
    }

    pub fn evaluate(&self, attrs: &dyn AttributeStore) -> bool {
        match self {
            Guard::Always => true,
            Guard::Present(path) => {
                !matches!(attrs.get(&borrowed_path(path)), None | Some(serde_json::Value::Null))
            }
            Guard::Truthy(path) => attrs.is_truthy(&borrowed_path(path)),
            Guard::Equals(path, value) => {
                attrs.get_str(&borrowed_path(path)) == Some(value.as_str())
            }
            Guard::All(guards) => guards.iter().all(|g| g.evaluate(attrs)),
            Guard::Not(guard) => !guard.evaluate(attrs),
        }
    }
}

fn owned_path(path: &[&str]) -> Vec<String> {
    path.iter().map(|s| s.to_string()).collect()
}

fn borrowed_path(path: &[String]) -> Vec<&str> {
    path.iter().map(String::as_str).collect()
}

impl Resource {
    pub fn new(desired: DesiredState) -> Self {
        Self {
            desired,
            guard: Guard::Always,
            deferred: false,
        }
    }

    pub fn package(name: &str) -> Self {
        Self::new(DesiredState::Package(PackageSpec {
            name: name.to_string(),
        }))
    }

    pub fn service(name: &str, actions: &[ServiceAction]) -> Self {
        Self::new(DesiredState::Service(ServiceSpec {
            name: name.to_string(),
            actions: actions.to_vec(),
        }))
    }

    pub fn file(path: impl Into<PathBuf>, content: impl Into<String>, ownership: Ownership) -> Self {
        Self::new(DesiredState::File(FileSpec {
            path: path.into(),
            content: content.into(),
            ownership,
        }))
    }

    pub fn directory(path: impl Into<PathBuf>, ownership: Ownership, recursive: bool) -> Self {
        Self::new(DesiredState::Directory(DirectorySpec {
            path: path.into(),
            ownership,
            recursive,
        }))
    }

    pub fn mount(spec: MountSpec) -> Self {
        Self::new(DesiredState::Mount(spec))
    }

    pub fn command_guard(spec: CommandGuardSpec) -> Self {
        Self::new(DesiredState::CommandGuard(spec))
    }

    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    pub fn deferred(mut self) -> Self {
        self.deferred = true;
        self
    }

    pub fn kind(&self) -> ResourceKind {
        match &self.desired {
            DesiredState::Package(_) => ResourceKind::Package,
            DesiredState::Service(_) => ResourceKind::Service,
            DesiredState::File(_) => ResourceKind::File,
            DesiredState::Directory(_) => ResourceKind::Directory,
            DesiredState::Mount(_) => ResourceKind::Mount,
            DesiredState::CommandGuard(_) => ResourceKind::CommandGuard,
        }
    }

    /// The unique key of this resource within its kind.
    pub fn identity(&self) -> String {
        match &self.desired {
            DesiredState::Package(p) => p.name.clone(),
            DesiredState::Service(s) => s.name.clone(),
            DesiredState::File(f) => f.path.display().to_string(),
            DesiredState::Directory(d) => d.path.display().to_string(),
            DesiredState::Mount(m) => m.mount_point.display().to_string(),
            DesiredState::CommandGuard(c) => c.command.join(" "),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind().label(), self.identity())
    }
}

/// Serialize permission bits as a zero-padded octal string ("0644").
mod octal {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(mode: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{mode:04o}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let s = String::deserialize(deserializer)?;
        u32::from_str_radix(&s, 8).map_err(D::Error::custom)
    }
}
