// Sub-project CRUD, scoped to one parent project

use anyhow::{Context, Result};

use super::load_store;
use crate::cli::{SubDeleteArgs, SubEditArgs, SubNewArgs};
use crate::config::Config;
use crate::models::{step_label, Prioridad, SubProjectDraft, SubProjectPatch};
use crate::utils::{
    self, handle_not_found, print_cancelled, print_success, print_system_error, print_warning,
    OutputStyle,
};

pub async fn handle_sub_new_command(config: Config, args: &SubNewArgs) -> Result<()> {
    let mut store = load_store(&config).await?;

    let project = match store.find_project(&args.project) {
        Some(found) => found.clone(),
        None => {
            handle_not_found("Proyecto", &args.project);
            return Ok(());
        }
    };

    let nombre = match &args.nombre {
        Some(nombre) => nombre.clone(),
        None => {
            match utils::prompt_required(&format!(
                "{}: ",
                OutputStyle::label("Nombre del sub-proyecto")
            ))? {
                Some(nombre) => nombre,
                None => {
                    print_cancelled("Creación cancelada");
                    return Ok(());
                }
            }
        }
    };

    if nombre.trim().is_empty() {
        print_system_error("El nombre es obligatorio");
        return Err(anyhow::anyhow!("El nombre es obligatorio"));
    }

    let draft = SubProjectDraft {
        nombre,
        step: args.step,
        estado: args.estado,
        progreso: args.progreso,
        responsable: args.responsable.clone(),
        prioridad: args.prioridad.or(Some(Prioridad::Media)),
        tecnologia: args.tecnologia.clone(),
        fecha_inicio: args.fecha_inicio.clone(),
        fecha_fin: args.fecha_fin.clone(),
        observaciones: args.observaciones.clone(),
    };

    let sub = store
        .create_sub_project(&project.id, draft)
        .await
        .context("Failed to create sub-project")?;

    print_success(&format!(
        "Sub-proyecto '{}' creado en '{}' ({})",
        sub.nombre,
        project.nombre,
        step_label(sub.step)
    ));
    println!("{}", OutputStyle::muted(&format!("id {}", sub.id)));

    Ok(())
}

pub async fn handle_sub_edit_command(config: Config, args: &SubEditArgs) -> Result<()> {
    let mut store = load_store(&config).await?;

    let sub = match store.find_sub_project(&args.identifier) {
        Some(found) => found.clone(),
        None => {
            handle_not_found("Sub-proyecto", &args.identifier);
            return Ok(());
        }
    };

    let patch = SubProjectPatch {
        nombre: args.nombre.clone(),
        step: args.step,
        estado: args.estado,
        progreso: args.progreso,
        responsable: args.responsable.clone(),
        prioridad: args.prioridad,
        tecnologia: args.tecnologia.clone(),
        fecha_inicio: args.fecha_inicio.clone(),
        fecha_fin: args.fecha_fin.clone(),
        observaciones: args.observaciones.clone(),
    };

    if patch.is_empty() {
        print_warning("Nada que actualizar");
        return Ok(());
    }

    let updated = store
        .update_sub_project(&sub.id, patch)
        .await
        .context("Failed to update sub-project")?;

    print_success(&format!("Sub-proyecto '{}' actualizado!", updated.nombre));

    Ok(())
}

pub async fn handle_sub_delete_command(config: Config, args: &SubDeleteArgs) -> Result<()> {
    let mut store = load_store(&config).await?;

    let sub = match store.find_sub_project(&args.identifier) {
        Some(found) => found.clone(),
        None => {
            handle_not_found("Sub-proyecto", &args.identifier);
            return Ok(());
        }
    };

    println!("Sub-proyecto a eliminar:");
    println!("  {} ({})", sub.nombre, step_label(sub.step));

    if !args.force && !utils::prompt_yes_no("\n¿Estás seguro de eliminar este sub-proyecto?")? {
        print_cancelled("Sub-proyecto no eliminado");
        return Ok(());
    }

    store
        .delete_sub_project(&sub.id)
        .await
        .context("Failed to delete sub-project")?;

    println!("✓ Sub-proyecto '{}' eliminado!", sub.nombre);

    Ok(())
}
