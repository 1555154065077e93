use crate::commands::{backup, configure, projects, subs};
use crate::config::{Config, Theme};
use crate::models::{Estado, Prioridad};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tablero")]
#[command(about = "A project dashboard CLI backed by Supabase")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Commands {
    pub async fn execute(self, config: Config) -> Result<()> {
        match self {
            Commands::List(args) => {
                projects::handle_list_command(config, &args).await?;
            }
            Commands::Show(args) => {
                projects::handle_show_command(config, &args).await?;
            }
            Commands::New(args) => {
                projects::handle_new_command(config, &args).await?;
            }
            Commands::Edit(args) => {
                projects::handle_edit_command(config, &args).await?;
            }
            Commands::Delete(args) => {
                projects::handle_delete_command(config, &args).await?;
            }
            Commands::Sub(args) => match args.command {
                SubCommands::New(args) => {
                    subs::handle_sub_new_command(config, &args).await?;
                }
                SubCommands::Edit(args) => {
                    subs::handle_sub_edit_command(config, &args).await?;
                }
                SubCommands::Delete(args) => {
                    subs::handle_sub_delete_command(config, &args).await?;
                }
            },
            Commands::Export(args) => {
                backup::handle_export_command(config, &args).await?;
            }
            Commands::Import(args) => {
                backup::handle_import_command(config, &args).await?;
            }
            Commands::Theme(args) => {
                configure::handle_theme_command(config, &args)?;
            }
            Commands::Config(args) => {
                configure::handle_config_command(config, args.command.clone())?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all projects
    List(ListArgs),

    /// Show one project's board (columns and statistics)
    Show(ShowArgs),

    /// Create a new project
    New(NewArgs),

    /// Edit an existing project
    Edit(EditArgs),

    /// Delete a project and all its sub-projects
    Delete(DeleteArgs),

    /// Manage sub-projects
    Sub(SubArgs),

    /// Export all data to a backup file
    Export(ExportArgs),

    /// Import data from a backup file, replacing everything
    Import(ImportArgs),

    /// Switch between light and dark theme
    Theme(ThemeArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long, help = "Show overall statistics instead of the project list")]
    pub stats: bool,

    #[arg(short, long)]
    pub format: Option<ListFormat>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(help = "Project id or name")]
    pub identifier: String,
}

#[derive(Args)]
pub struct NewArgs {
    #[arg(short, long)]
    pub nombre: Option<String>,

    #[arg(short, long)]
    pub descripcion: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(help = "Project id or name")]
    pub identifier: String,

    #[arg(long)]
    pub nombre: Option<String>,

    #[arg(long)]
    pub descripcion: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(help = "Project id or name")]
    pub identifier: String,

    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct SubArgs {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// Create a sub-project under a project
    New(SubNewArgs),

    /// Edit an existing sub-project
    Edit(SubEditArgs),

    /// Delete a sub-project
    Delete(SubDeleteArgs),
}

#[derive(Args)]
pub struct SubNewArgs {
    #[arg(help = "Parent project id or name")]
    pub project: String,

    #[arg(short, long)]
    pub nombre: Option<String>,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3),
          help = "Workflow column: 1 = por hacer, 2 = en proceso, 3 = completado")]
    pub step: u8,

    #[arg(long, default_value = "por-hacer")]
    pub estado: Estado,

    #[arg(long, default_value_t = 0)]
    pub progreso: i32,

    #[arg(long)]
    pub prioridad: Option<Prioridad>,

    #[arg(long)]
    pub responsable: Option<String>,

    #[arg(long)]
    pub tecnologia: Option<String>,

    #[arg(long)]
    pub fecha_inicio: Option<String>,

    #[arg(long)]
    pub fecha_fin: Option<String>,

    #[arg(long)]
    pub observaciones: Option<String>,
}

#[derive(Args)]
pub struct SubEditArgs {
    #[arg(help = "Sub-project id or name")]
    pub identifier: String,

    #[arg(long)]
    pub nombre: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub step: Option<u8>,

    #[arg(long)]
    pub estado: Option<Estado>,

    #[arg(long)]
    pub progreso: Option<i32>,

    #[arg(long)]
    pub prioridad: Option<Prioridad>,

    #[arg(long)]
    pub responsable: Option<String>,

    #[arg(long)]
    pub tecnologia: Option<String>,

    #[arg(long)]
    pub fecha_inicio: Option<String>,

    #[arg(long)]
    pub fecha_fin: Option<String>,

    #[arg(long)]
    pub observaciones: Option<String>,
}

#[derive(Args)]
pub struct SubDeleteArgs {
    #[arg(help = "Sub-project id or name")]
    pub identifier: String,

    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(help = "Output file (defaults to proyectos-<date>.json)")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(help = "Backup file to import from")]
    pub file: PathBuf,

    #[arg(short, long, help = "Skip the confirmation prompt")]
    pub force: bool,
}

#[derive(Args)]
pub struct ThemeArgs {
    #[arg(help = "Theme to switch to; omit to toggle")]
    pub theme: Option<Theme>,
}

#[derive(clap::ValueEnum, Clone)]
pub enum ListFormat {
    Simple,
    Json,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Open,

    /// Reset configuration to defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sub_new_defaults() {
        let cli = Cli::parse_from(["tablero", "sub", "new", "CRM", "--nombre", "DB Design"]);
        match cli.command {
            Commands::Sub(args) => match args.command {
                SubCommands::New(args) => {
                    assert_eq!(args.project, "CRM");
                    assert_eq!(args.step, 1);
                    assert_eq!(args.estado, Estado::PorHacer);
                    assert_eq!(args.progreso, 0);
                    assert!(args.prioridad.is_none());
                }
                _ => panic!("expected sub new"),
            },
            _ => panic!("expected sub command"),
        }
    }

    #[test]
    fn test_sub_new_rejects_step_out_of_range() {
        let result = Cli::try_parse_from(["tablero", "sub", "new", "CRM", "--step", "4"]);
        assert!(result.is_err());
    }
}
