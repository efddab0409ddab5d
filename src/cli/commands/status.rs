//! Inventory status command.

use console::style;

use crate::config::Settings;

/// Show inventory counts.
pub async fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    let assets = ctx.assets();

    let total = assets.count().await?;
    let assigned = assets.count_assigned().await?;
    let lost = assets.count_lost().await?;
    let users = ctx.users().count().await?;

    println!("{}", style("Inventory status").bold());
    println!("  database:  {}", settings.database_url());
    println!("  users:     {}", users);
    println!("  assets:    {}", total);
    println!("  assigned:  {}", assigned);
    println!("  lost:      {}", lost);

    Ok(())
}
