//! Asset management commands.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;
use console::style;

use crate::config::Settings;
use crate::models::{Asset, User};
use crate::repository::{is_unique_violation, AssetRepository, UserRepository};

#[derive(Subcommand)]
pub enum AssetCommands {
    /// Register a new asset
    Add {
        /// Human-readable name
        name: String,
        /// Category, e.g. "laptop"
        #[arg(short = 't', long = "type")]
        asset_type: String,
        /// Manufacturer serial number
        #[arg(short, long)]
        serial_no: String,
        /// Organization serial code (unique)
        #[arg(short, long)]
        code: String,
        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Purchase date (YYYY-MM-DD)
        #[arg(short, long)]
        purchased: Option<String>,
        /// User who registered the asset (id or email)
        #[arg(long)]
        added_by: Option<String>,
    },

    /// List all assets
    List,

    /// Show one asset by id or code
    Show {
        /// Asset id or organization code
        asset: String,
    },

    /// Assign an asset to a user
    Assign {
        /// Asset id or organization code
        asset: String,
        /// User id or email
        user: String,
        /// Return date (YYYY-MM-DD)
        #[arg(short, long)]
        return_date: Option<String>,
    },

    /// Reclaim an asset from its assignee
    Reclaim {
        /// Asset id or organization code
        asset: String,
    },

    /// Mark an asset lost (or found with --found)
    Lost {
        /// Asset id or organization code
        asset: String,
        /// Mark the asset found instead
        #[arg(long)]
        found: bool,
    },
}

/// Parse a YYYY-MM-DD date argument.
fn parse_date_arg(value: &str) -> anyhow::Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}", value, e))?;
    Ok(date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc())
}

/// Resolve an asset argument as id first, then organization code.
async fn resolve_asset(repo: &AssetRepository, arg: &str) -> anyhow::Result<Asset> {
    if let Some(asset) = repo.get(arg).await? {
        return Ok(asset);
    }
    if let Some(asset) = repo.get_by_code(arg).await? {
        return Ok(asset);
    }
    anyhow::bail!("No asset with id or code '{}'", arg)
}

/// Resolve a user argument as id first, then email.
async fn resolve_user(repo: &UserRepository, arg: &str) -> anyhow::Result<User> {
    if let Some(user) = repo.get(arg).await? {
        return Ok(user);
    }
    if let Some(user) = repo.get_by_email(arg).await? {
        return Ok(user);
    }
    anyhow::bail!("No user with id or email '{}'", arg)
}

fn print_asset_line(asset: &Asset) {
    let display = asset.display();
    let status = match display.status.as_str() {
        "available" => style(display.status.as_str()).green(),
        "assigned" => style(display.status.as_str()).cyan(),
        _ => style(display.status.as_str()).red(),
    };

    println!(
        "{:<10} {:<24} {:<10} {}",
        display.code,
        display.name,
        status,
        display.return_date.as_deref().unwrap_or("")
    );
}

/// Dispatch an asset subcommand.
pub async fn cmd_asset(settings: &Settings, command: AssetCommands) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    let repo = ctx.assets();

    match command {
        AssetCommands::Add {
            name,
            asset_type,
            serial_no,
            code,
            description,
            purchased,
            added_by,
        } => {
            let adder = match added_by.as_deref() {
                Some(arg) => Some(resolve_user(&ctx.users(), arg).await?),
                None => None,
            };

            let purchased = purchased.as_deref().map(parse_date_arg).transpose()?;
            let asset = Asset::new(
                name,
                asset_type,
                description,
                serial_no,
                code,
                purchased,
                adder.map(|u| u.id),
            );
            if let Err(e) = repo.save(&asset).await {
                if is_unique_violation(&e) {
                    anyhow::bail!("An asset with code '{}' already exists", asset.code);
                }
                return Err(e.into());
            }

            println!(
                "{} Added asset {} ({})",
                style("✓").green(),
                asset.name,
                asset.id
            );
        }

        AssetCommands::List => {
            let assets = repo.get_all().await?;
            if assets.is_empty() {
                println!("No assets registered");
                return Ok(());
            }
            for asset in &assets {
                print_asset_line(asset);
            }
            println!("{} asset(s)", assets.len());
        }

        AssetCommands::Show { asset } => {
            let asset = resolve_asset(&repo, &asset).await?;
            let display = asset.display();

            println!("{}", style(&display.name).bold());
            println!("  id:          {}", display.id);
            println!("  type:        {}", display.asset_type);
            println!("  serial:      {}", display.serial_no);
            println!("  code:        {}", display.code);
            println!("  status:      {}", display.status.as_str());
            println!(
                "  purchased:   {}",
                display.purchased.as_deref().unwrap_or("-")
            );
            if let Some(user_id) = &display.added_by {
                let adder = ctx
                    .users()
                    .get(user_id)
                    .await?
                    .map(|u| u.name)
                    .unwrap_or_else(|| user_id.clone());
                println!("  added by:    {}", adder);
            }
            if let Some(user_id) = &display.assigned_to {
                let assignee = ctx
                    .users()
                    .get(user_id)
                    .await?
                    .map(|u| u.name)
                    .unwrap_or_else(|| user_id.clone());
                println!("  assigned to: {}", assignee);
                println!(
                    "  due back:    {}{}",
                    display.return_date.as_deref().unwrap_or("-"),
                    if display.overdue {
                        " (overdue)"
                    } else if display.due_soon {
                        " (due soon)"
                    } else {
                        ""
                    }
                );
            }
        }

        AssetCommands::Assign {
            asset,
            user,
            return_date,
        } => {
            let asset = resolve_asset(&repo, &asset).await?;
            let assignee = resolve_user(&ctx.users(), &user).await?;

            let due = return_date.as_deref().map(parse_date_arg).transpose()?;
            repo.assign(&asset.id, &assignee.id, due).await?;

            println!(
                "{} Assigned {} to {}",
                style("✓").green(),
                asset.name,
                assignee.name
            );
        }

        AssetCommands::Reclaim { asset } => {
            let asset = resolve_asset(&repo, &asset).await?;
            if !asset.is_assigned() {
                anyhow::bail!("Asset '{}' is not assigned", asset.name);
            }
            repo.reclaim(&asset.id).await?;
            println!("{} Reclaimed {}", style("✓").green(), asset.name);
        }

        AssetCommands::Lost { asset, found } => {
            let asset = resolve_asset(&repo, &asset).await?;
            repo.set_lost(&asset.id, !found).await?;
            println!(
                "{} Marked {} as {}",
                style("✓").green(),
                asset.name,
                if found { "found" } else { "lost" }
            );
        }
    }

    Ok(())
}
