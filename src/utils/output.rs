use crate::config::{Theme, UiConfig};
use crate::models::{Estado, Prioridad};
use colored::*;

pub struct OutputStyle;

impl OutputStyle {
    // Primary colors for different field types
    pub fn name(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn content(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Accent used for top-level headings, tracks the configured theme
    pub fn heading(text: &str, theme: Theme) -> ColoredString {
        match theme {
            Theme::Dark => text.bright_purple().bold(),
            Theme::Light => text.blue().bold(),
        }
    }

    pub fn estado_badge(estado: Estado) -> ColoredString {
        match estado {
            Estado::Completado => "Completado".green(),
            Estado::EnProgreso => "En progreso".blue(),
            Estado::Pausado => "Pausado".dimmed(),
            Estado::PorHacer => "Por hacer".yellow(),
        }
    }

    pub fn prioridad_badge(prioridad: Prioridad) -> ColoredString {
        match prioridad {
            Prioridad::Alta => "Alta".red(),
            Prioridad::Media => "Media".yellow(),
            Prioridad::Baja => "Baja".green(),
        }
    }

    // Formatting helpers
    pub fn separator() -> String {
        "─".repeat(50)
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>12}: {}", Self::label(label), color_fn(value));
    }
}

/// Honor the color toggle before any styled output is produced
pub fn apply_ui_settings(ui: &UiConfig) {
    if !ui.color {
        colored::control::set_override(false);
    }
}

pub fn print_success(msg: &str) {
    println!("✅ {}", OutputStyle::success(msg));
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {}", OutputStyle::warning(msg));
}

pub fn print_system_error(msg: &str) {
    eprintln!("❌ {}", OutputStyle::error(msg));
}

pub fn print_network_error(msg: &str) {
    println!("🌐 {}", OutputStyle::error(msg));
}
