//! Idempotent system-state convergence.
//!
//! Resources declare desired state for packages, services, files,
//! directories, mounts, and guarded commands. The runner brings the host
//! to that state, touching only what differs.
//!
//! # Architecture
//!
//! ```text
//! converge(resources, attrs, host)
//!   ├── partition: immediate, then deferred (order kept)
//!   └── per resource
//!       ├── Guard::evaluate(attrs)      false → Skipped (no I/O)
//!       ├── probe(&dyn Host)            Matches → Unchanged
//!       └── apply(&mut dyn Host)        Ok → Applied, Err → Failed
//! ```
//!
//! Probes get a shared borrow of the host and actions get an exclusive one,
//! so inspection can never change system state. Failures are isolated to
//! their resource; the run always completes.

pub mod apply;
pub mod error;
pub mod host;
pub mod memory;
pub mod probe;
pub mod resource;
pub mod runner;
pub mod system;

pub use error::{ApplyError, HostError, HostResult, ProbeError, ResourceError};
pub use host::{CommandOutput, Host, MountEntry, MountState, PathKind, PathState, ServiceState};
pub use memory::MemoryHost;
pub use probe::ProbeOutcome;
pub use resource::{
    CommandGuardSpec, DesiredState, DirectorySpec, FileSpec, Guard, MountSpec, Ownership,
    PackageSpec, Resource, ResourceKind, ServiceAction, ServiceSpec,
};
pub use runner::{ConvergenceReport, ConvergenceResult, ResourceOutcome, Summary, converge};
pub use system::SystemHost;
