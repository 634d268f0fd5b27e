//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigFile};
use crate::error::StoreResult;
use console::style;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, file: &ConfigFile) -> StoreResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", file.path().display()),
        Some(ConfigAction::Init { force }) => init_config(file, force).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> StoreResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(file: &ConfigFile, force: bool) -> StoreResult<()> {
    let path = file.path();

    if file.exists() && !force {
        println!(
            "{} Config already exists at {}",
            style("!").yellow(),
            path.display()
        );
        println!("  {}", style("Use --force to overwrite").dim());
        return Ok(());
    }

    file.save(&Config::default()).await?;
    println!(
        "{} Configuration initialized at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}
