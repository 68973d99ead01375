pub mod attributes;
pub mod config;

pub use attributes::{AttributeError, AttributeStore, NodeAttributes};
pub use config::{ConfigError, HostConfig, PackageManager, ProvisionConfig, RunConfig};
