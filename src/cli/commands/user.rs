//! User management commands.

use clap::Subcommand;
use console::style;

use crate::config::Settings;
use crate::models::User;
use crate::repository::is_unique_violation;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a user to the directory
    Add {
        /// Email address (unique)
        email: String,
        /// Display name
        name: String,
    },

    /// List all users
    List,
}

/// Dispatch a user subcommand.
pub async fn cmd_user(settings: &Settings, command: UserCommands) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    let repo = ctx.users();

    match command {
        UserCommands::Add { email, name } => {
            let user = User::new(email, name);
            if let Err(e) = repo.save(&user).await {
                if is_unique_violation(&e) {
                    anyhow::bail!("A user with email '{}' already exists", user.email);
                }
                return Err(e.into());
            }
            println!(
                "{} Added user {} ({})",
                style("✓").green(),
                user.name,
                user.id
            );
        }

        UserCommands::List => {
            let users = repo.get_all().await?;
            if users.is_empty() {
                println!("No users registered");
                return Ok(());
            }
            for user in &users {
                println!("{:<24} {}", user.name, user.email);
            }
            println!("{} user(s)", users.len());
        }
    }

    Ok(())
}
