//! Example demonstrating array values and allowed-value constraints

use environmentality::Environmentality;

#[derive(Debug, Environmentality)]
struct Config {
    // Comma-separated; "\," keeps a literal comma inside an element
    #[env(default)]
    pub tags: Vec<String>,

    #[env(default = vec![80, 443])]
    pub ports: Vec<u16>,

    #[env(default = "info".to_string(), enum_values = ["debug", "info", "warn", "error"])]
    pub log_level: String,

    // Every element must be allowed
    #[env(default, enum_values = ["read", "write", "admin"])]
    pub permissions: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("TAGS", "web,api,eu\\,west");
    std::env::set_var("PORTS", "8080,8443");
    std::env::set_var("PERMISSIONS", "read,write");

    let config = Config::from_env()?;

    println!("Arrays and enums:");
    println!("  Tags: {:?}", config.tags);
    println!("  Ports: {:?}", config.ports);
    println!("  Log level: {}", config.log_level);
    println!("  Permissions: {:?}", config.permissions);

    // Invalid elements are each reported
    std::env::set_var("PERMISSIONS", "read,root,sudo");
    if let Err(e) = Config::from_env() {
        println!("\n{e}");
    }

    Ok(())
}
