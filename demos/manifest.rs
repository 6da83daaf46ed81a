//! Example resolving a JSON declaration manifest without the derive macro

use environmentality::{convert, Options, PropertyDeclaration, Snapshot};

const MANIFEST: &str = r#"[
    {"name": "HOST", "default": "localhost"},
    {"name": "PORT", "type": "number", "default": 3000},
    {"name": "FEATURES", "array": true, "enumValues": ["search", "billing", "chat"]},
    {"name": "VERBOSE", "type": "boolean", "required": false}
]"#;

fn main() -> anyhow::Result<()> {
    let decls = PropertyDeclaration::list_from_json(MANIFEST)?;

    let snapshot: Snapshot = [("PORT", "8080"), ("FEATURES", "search,chat")]
        .into_iter()
        .collect();

    // Exits with a report if anything is invalid
    let resolved = convert(&decls, &snapshot, Options::default());

    println!("Resolved values:");
    for (name, value) in &resolved {
        match value {
            Some(value) => println!("  {name} = {value}"),
            None => println!("  {name} = (unset)"),
        }
    }

    println!("\nAs JSON: {}", serde_json::to_string(&resolved)?);

    Ok(())
}
