//! Example demonstrating file-based secrets

use environmentality::Environmentality;
use std::io::Write;

#[derive(Debug, Environmentality)]
struct Config {
    // Reads from DB_PASSWORD or from the file named by DB_PASSWORD_FILE
    #[env(from_file)]
    pub db_password: String,

    // File-based with a fallback default
    #[env(from_file, default = "dev-token".to_string())]
    pub api_token: String,
}

fn main() -> anyhow::Result<()> {
    let dir = std::env::temp_dir();
    let secret_path = dir.join("environmentality_demo_db_password");
    let mut file = std::fs::File::create(&secret_path)?;
    writeln!(file, "s3cr3t")?;

    std::env::remove_var("DB_PASSWORD");
    std::env::set_var("DB_PASSWORD_FILE", &secret_path);
    std::env::remove_var("API_TOKEN");
    std::env::remove_var("API_TOKEN_FILE");

    let config = Config::from_env()?;

    println!("File-based secrets:");
    println!("  DB password length: {}", config.db_password.len());
    println!("  API token: {}", config.api_token);

    std::fs::remove_file(&secret_path)?;
    Ok(())
}
