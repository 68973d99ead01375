//! Error types for probing and applying resources.

use thiserror::Error;

/// Result type alias for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors raised by a [`Host`](crate::host::Host) while reading or changing system state.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}: {stderr}", exit_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("unknown group: {0}")]
    UnknownGroup(String),

    #[error("account lookup failed: {0}")]
    Lookup(#[from] nix::Error),

    #[error("empty command line")]
    EmptyCommand,

    #[error("{mount_point} still has {} mounted, expected {expected}", .found.as_deref().unwrap_or("nothing"))]
    MountNotConverged {
        mount_point: String,
        expected: String,
        found: Option<String>,
    },
}

impl HostError {
    pub(crate) fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }
}

/// The inspection step could not determine the current state.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("status command `{command}` exited with {}, expected one of {allowed:?}", exit_label(.code))]
    UnexpectedExit {
        command: String,
        code: Option<i32>,
        allowed: Vec<i32>,
    },

    #[error("invalid status pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The side-effecting action failed.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("`{command}` exited with {}: {stderr}", exit_label(.code))]
    Command {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Why a single resource failed to converge.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("probe failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("apply failed: {0}")]
    Apply(#[from] ApplyError),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}
