//! Node recipes built on the convergence engine.
//!
//! A recipe reads the node attributes and produces the resources it wants
//! converged. When a required attribute is missing the recipe produces
//! nothing at all, before any resource reaches the runner.

use provision_core::AttributeStore;
use provision_engine::Resource;
use thiserror::Error;
use tracing::debug;

pub mod hostname;
pub mod license_monitor;
pub mod mariadb;
pub mod services;
pub mod smbmount;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("unknown recipe: {name} (known: {})", known_names().join(", "))]
    Unknown { name: String },
}

pub trait Recipe {
    fn name(&self) -> &'static str;

    /// Resources for this node, or `None` when the recipe does not apply.
    fn build(&self, attrs: &dyn AttributeStore) -> Option<Vec<Resource>>;
}

/// Every recipe, in default run order.
pub const RECIPES: &[&dyn Recipe] = &[
    &hostname::ServerHostname,
    &license_monitor::LicenseMonitor,
    &mariadb::AccountingDatabase,
    &services::ServiceEnable,
    &smbmount::SmbMount,
];

pub fn known_names() -> Vec<&'static str> {
    RECIPES.iter().map(|r| r.name()).collect()
}

pub fn find(name: &str) -> Option<&'static dyn Recipe> {
    RECIPES.iter().copied().find(|r| r.name() == name)
}

/// Look up every name in `run_list`. Fails on the first unknown name.
pub fn resolve<S: AsRef<str>>(run_list: &[S]) -> Result<Vec<&'static dyn Recipe>, RecipeError> {
    run_list
        .iter()
        .map(|name| {
            find(name.as_ref()).ok_or_else(|| RecipeError::Unknown {
                name: name.as_ref().to_string(),
            })
        })
        .collect()
}

/// Build the resources of `recipes` in order from one attribute snapshot.
pub fn build_resources(recipes: &[&dyn Recipe], attrs: &dyn AttributeStore) -> Vec<Resource> {
    let mut resources = Vec::new();
    for recipe in recipes {
        match recipe.build(attrs) {
            Some(built) => {
                debug!(recipe = recipe.name(), resources = built.len(), "recipe built");
                resources.extend(built);
            }
            None => debug!(recipe = recipe.name(), "recipe not applicable"),
        }
    }
    resources
}
