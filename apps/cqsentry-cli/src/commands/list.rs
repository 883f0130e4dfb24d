//! List registered checks

use cqsentry_checks::registry::REGISTRY;

pub fn run() -> anyhow::Result<()> {
    for descriptor in REGISTRY {
        println!(
            "{:<20} [{:<10}] {}",
            descriptor.name,
            descriptor.capability.to_string(),
            descriptor.description
        );
    }
    Ok(())
}
