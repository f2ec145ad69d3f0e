//! Rules command implementation

use marklint_core::RuleCatalog;
use miette::Result;

pub fn run_list_rules() -> Result<()> {
    let catalog = RuleCatalog::builtin();

    println!(
        "{:<6} {:<28} {:<10} {:<8} Aliases",
        "Id", "Name", "Severity", "Enabled"
    );
    for descriptor in catalog.descriptors() {
        println!(
            "{:<6} {:<28} {:<10} {:<8} {}",
            descriptor.id,
            descriptor.name,
            descriptor.default_severity.as_str(),
            if descriptor.default_enabled { "yes" } else { "no" },
            descriptor.aliases.join(", ")
        );
    }

    Ok(())
}
