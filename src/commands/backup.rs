// Backup operations - export and import

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use super::load_store;
use crate::cli::{ExportArgs, ImportArgs};
use crate::config::Config;
use crate::store::Backup;
use crate::utils::{self, print_cancelled, print_success, print_warning};

pub async fn handle_export_command(config: Config, args: &ExportArgs) -> Result<()> {
    let store = load_store(&config).await?;
    let backup = store.export_data();

    let path = args
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(Backup::file_name(Utc::now())));

    fs::write(&path, backup.to_json_bytes()?)
        .with_context(|| format!("Failed to write backup file: {}", path.display()))?;

    print_success(&format!(
        "Exportados {} proyectos y {} sub-proyectos a {}",
        backup.projects.len(),
        backup.sub_projects.len(),
        path.display()
    ));

    Ok(())
}

pub async fn handle_import_command(config: Config, args: &ImportArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read backup file: {}", args.file.display()))?;

    let mut store = load_store(&config).await?;

    if !args.force {
        print_warning("Esto reemplazará todos los datos actuales del backend");
        if !utils::prompt_yes_no("¿Continuar con la importación?")? {
            print_cancelled("Importación cancelada");
            return Ok(());
        }
    }

    println!("📥 Importando respaldo...");
    store
        .import_data(&contents)
        .await
        .context("Failed to import backup")?;

    print_success(&format!(
        "Datos importados correctamente ({} proyectos, {} sub-proyectos)",
        store.projects().len(),
        store.sub_projects().len()
    ));

    Ok(())
}
