//! Print the role → permission/ability matrix as JSON.
//!
//! Usage: `licensehub-policy-audit [ROLE]` (e.g. `VENDOR_ADMIN`).

use anyhow::{Context, bail};

use licensehub_auth::{PolicyRegistry, Role};

fn main() -> anyhow::Result<()> {
    licensehub_observability::init();

    let registry = PolicyRegistry::standard();

    let output = match std::env::args().nth(1) {
        Some(name) => {
            let role = Role::parse(&name);
            let Some(definition) = registry.role(&role) else {
                bail!("role '{name}' is not part of the standard policy");
            };
            serde_json::to_string_pretty(definition).context("failed to render role definition")?
        }
        None => serde_json::to_string_pretty(&registry)
            .context("failed to render policy registry")?,
    };

    tracing::info!(roles = registry.roles.len(), "policy matrix rendered");
    println!("{output}");
    Ok(())
}
