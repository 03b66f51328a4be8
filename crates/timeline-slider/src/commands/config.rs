use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    print_entry("defaults.theme", config.theme_name());
    print_entry("breakpoints", &config.policy().to_string());
    print_entry(
        "preview.resize_debounce_ms",
        &config.resize_debounce().as_millis().to_string(),
    );
    print_entry("preview.watch", &config.watch().to_string());
    Ok(())
}

fn print_entry(key: &str, value: &str) {
    println!("  {:<28} {}", key.cyan(), value);
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Saved".green().bold(),
        key.cyan(),
        value,
        path.display().to_string().dimmed()
    );
    Ok(())
}
