pub mod converge;
pub mod plan;

use std::path::Path;

use anyhow::Context;
use provision_core::{NodeAttributes, ProvisionConfig};
use provision_engine::Resource;

/// Everything one run needs: the attribute snapshot, the config, and the
/// resources built from the run list.
pub struct Loaded {
    pub attrs: NodeAttributes,
    pub config: ProvisionConfig,
    pub resources: Vec<Resource>,
}

pub fn load(attributes: &Path, config: Option<&Path>) -> anyhow::Result<Loaded> {
    let config = ProvisionConfig::load(config).context("loading engine configuration")?;
    let recipes = provision_recipes::resolve(&config.run.run_list)?;
    let attrs = NodeAttributes::from_file(attributes).context("loading node attributes")?;
    let resources = provision_recipes::build_resources(&recipes, &attrs);
    Ok(Loaded {
        attrs,
        config,
        resources,
    })
}
