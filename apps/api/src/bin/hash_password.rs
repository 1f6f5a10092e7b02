//! Produces a bcrypt hash for the bootstrap admin account.
//!
//! Usage:
//!     cargo run --bin hash_password
//!
//! Copy the printed line into `.env` together with `ADMIN_USERNAME`.

use std::io::{self, Write};
use travelog::infrastructure::security::PasswordHasher;

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}\n> ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> anyhow::Result<()> {
    let password = prompt("Enter the admin password:")?;
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }
    if password != prompt("Confirm password:")? {
        anyhow::bail!("Passwords do not match");
    }

    let cost = std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(12);
    let hash = PasswordHasher::new(cost).hash(&password)?;

    println!("\nADMIN_PASSWORD_HASH=\"{}\"", hash);
    Ok(())
}
