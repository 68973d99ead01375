use std::path::Path;

use provision_engine::host::content_digest;
use provision_engine::{DesiredState, Resource};
use serde_json::Value;

use super::load;

pub fn plan(attributes: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let loaded = load(attributes, config)?;
    println!("{}", serde_json::to_string_pretty(&plan_json(&loaded.resources)?)?);
    Ok(())
}

/// Descriptors as JSON. File content is replaced by its size and digest so
/// that secrets such as SMB credentials never reach stdout.
pub fn plan_json(resources: &[Resource]) -> serde_json::Result<Value> {
    resources
        .iter()
        .map(|resource| {
            let mut value = serde_json::to_value(resource)?;
            let desired = value.get_mut("desired").and_then(Value::as_object_mut);
            if let (DesiredState::File(file), Some(desired)) = (&resource.desired, desired) {
                desired.insert("content".to_string(), Value::String(redacted(&file.content)));
            }
            Ok(value)
        })
        .collect::<serde_json::Result<Vec<_>>>()
        .map(Value::Array)
}

fn redacted(content: &str) -> String {
    format!(
        "<{} bytes, sha256:{}>",
        content.len(),
        content_digest(content.as_bytes())
    )
}

pub fn recipes() {
    for name in provision_recipes::known_names() {
        println!("{name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provision_engine::Ownership;

    #[test]
    fn file_content_is_redacted() {
        let resources = [
            Resource::package("cifs-utils"),
            Resource::file(
                "/etc/smbcredentials/acct1.cred",
                "username=acct1\npassword=secret\n",
                Ownership::root(0o400),
            ),
        ];
        let plan = plan_json(&resources).unwrap();

        let content = plan[1]["desired"]["content"].as_str().unwrap();
        assert!(!content.contains("secret"));
        assert_eq!(
            content,
            format!(
                "<31 bytes, sha256:{}>",
                content_digest(b"username=acct1\npassword=secret\n")
            )
        );
        assert_eq!(plan[1]["desired"]["ownership"]["mode"], "0400");
        assert_eq!(plan[0]["desired"]["name"], "cifs-utils");
    }
}
