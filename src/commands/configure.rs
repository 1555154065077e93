use crate::cli::{ConfigCommands, ThemeArgs};
use crate::config::{Config, Theme};
use crate::utils::{self, OutputStyle};
use anyhow::Result;

pub fn handle_config_command(mut config: Config, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config),
        Some(ConfigCommands::Open) => handle_open_command(),
        Some(ConfigCommands::Reset) => handle_reset_command(&mut config),
        None => handle_config_help(),
    }
}

fn handle_show_command(config: &Config) -> Result<()> {
    println!("⚙️  Tablero Configuration");
    println!("==========================");

    println!("Backend:");
    if config.backend.url.is_empty() {
        println!("  URL: (not set)");
    } else {
        println!("  URL: {}", config.backend.url);
    }
    if config.backend.anon_key.is_empty() {
        println!("  Anon key: (not set)");
    } else {
        println!("  Anon key: ✓");
    }

    println!("UI:");
    println!("  Theme: {}", config.ui.theme);
    println!("  Color: {}", config.ui.color);

    Ok(())
}

fn handle_config_help() -> Result<()> {
    println!("⚙️  Configuration Management");
    println!("==========================");
    println!("Available configuration commands:");
    println!("  tablero config show    - Show current configuration");
    println!("  tablero config open    - Open configuration file in editor");
    println!("  tablero config reset   - Reset configuration to defaults");
    println!();
    println!(
        "Configuration file location: {}",
        Config::config_file_path().display()
    );
    Ok(())
}

fn handle_open_command() -> Result<()> {
    Config::ensure_config_exists()?;

    println!("Opening configuration file in editor...");
    let config_path = Config::config_file_path();
    println!("File: {}", config_path.display());

    utils::open_in_editor(&config_path)?;
    Ok(())
}

fn handle_reset_command(config: &mut Config) -> Result<()> {
    if utils::prompt_yes_no(
        "Are you sure you want to reset configuration to defaults? This will overwrite your current settings.",
    )? {
        *config = Config::default();
        config.save()?;
        println!("✓ Configuration reset to defaults!");
    } else {
        println!("Reset cancelled.");
    }
    Ok(())
}

/// Switch the persisted theme; with no argument the current one is toggled.
pub fn handle_theme_command(mut config: Config, args: &ThemeArgs) -> Result<()> {
    let next = args.theme.unwrap_or_else(|| config.ui.theme.toggle());
    config.ui.theme = next;
    config.save()?;

    let icon = match next {
        Theme::Dark => "🌙",
        Theme::Light => "☀️",
    };
    println!(
        "{} {}",
        icon,
        OutputStyle::success(&format!("Tema cambiado a {}", next))
    );

    Ok(())
}
