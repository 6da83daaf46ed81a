//! Basic usage example

use environmentality::Environmentality;

#[derive(Debug, Environmentality)]
struct Config {
    // Required field: loaded from DATABASE_URL environment variable
    pub database_url: String,

    // With default value
    #[env(default = "localhost".to_string())]
    pub host: String,

    // Numeric type
    #[env(default = 3000)]
    pub port: u16,

    // Boolean type, accepts true/false in any case
    #[env(default = false)]
    pub debug: bool,

    // Optional: None when LOG_FILE is not set
    pub log_file: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("PORT", "8080");
    std::env::set_var("DEBUG", "TRUE");

    // Load configuration
    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Host: {}", config.host);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);
    println!("  Log file: {:?}", config.log_file);

    Ok(())
}
