//! Example demonstrating prefix and case-insensitive matching

use environmentality::Environmentality;

#[derive(Debug, Environmentality)]
#[env(prefix = "MYAPP_", case_insensitive)]
struct Config {
    // Environment variables will be prefixed: MYAPP_DATABASE_URL, MYAPP_PORT, etc.
    pub database_url: String,

    #[env(default = 8080)]
    pub port: u16,

    #[env(default)]
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    // Matched ignoring case
    std::env::set_var("myapp_database_url", "postgres://localhost/db");
    std::env::set_var("MYAPP_PORT", "3000");

    let config = Config::from_env()?;

    println!("Configuration with prefix 'MYAPP_':");
    println!("  Database URL: {}", config.database_url);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);

    Ok(())
}
