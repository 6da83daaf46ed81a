//! Example demonstrating error policies

use environmentality::{Environmentality, ErrorPolicy};

#[derive(Debug, Environmentality)]
struct Config {
    pub api_key: String,

    #[env(default = 3000)]
    pub port: u16,

    #[env(default = false)]
    pub debug: bool,
}

fn main() {
    std::env::remove_var("API_KEY");
    std::env::set_var("PORT", "not-a-port");
    std::env::set_var("DEBUG", "maybe");

    // Hand every message to a callback instead of exiting
    let result = Config::from_env_with(ErrorPolicy::callback(|errors| {
        println!("{} configuration error(s):", errors.len());
        for error in errors {
            println!("  - {error}");
        }
    }));
    assert!(result.is_err());

    // The default policy prints a report and exits with status 1
    std::env::set_var("API_KEY", "secret");
    std::env::set_var("PORT", "8080");
    std::env::set_var("DEBUG", "true");
    let config = Config::from_env_or_exit();
    println!("\nLoaded: {config:?}");
}
