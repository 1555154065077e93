// Project CRUD and the two dashboard views (list and board)

use anyhow::{Context, Result};

use super::load_store;
use crate::cli::{DeleteArgs, EditArgs, ListArgs, ListFormat, NewArgs, ShowArgs};
use crate::config::{Config, Theme};
use crate::models::{subs_by_step, step_label, BoardStats, Project, ProjectPatch, SubProject};
use crate::store::{ProjectStore, SupabaseClient};
use crate::utils::stats::StatsCalculator;
use crate::utils::{
    self, format_date, handle_not_found, print_cancelled, print_empty_result, print_success,
    print_system_error, print_warning, progress_bar, OutputStyle,
};

pub async fn handle_list_command(config: Config, args: &ListArgs) -> Result<()> {
    let store = load_store(&config).await?;

    if args.stats {
        return show_overall_stats(&store);
    }

    if store.projects().is_empty() {
        println!("🚀 ¡Crea tu primer proyecto!");
        println!(
            "{}",
            OutputStyle::muted("Organiza tus tareas en proyectos y sub-proyectos: tablero new")
        );
        return Ok(());
    }

    match args.format.as_ref().unwrap_or(&ListFormat::Simple) {
        ListFormat::Simple => print_project_list(&store, config.ui.theme),
        ListFormat::Json => print_json_list(store.projects())?,
    }

    Ok(())
}

fn show_overall_stats(store: &ProjectStore<SupabaseClient>) -> Result<()> {
    let stats = BoardStats::calculate(store.sub_projects());

    OutputStyle::print_header("📊 Estadísticas");
    OutputStyle::print_field_colored(
        "Proyectos",
        &store.projects().len().to_string(),
        OutputStyle::info,
    );
    OutputStyle::print_field_colored("Sub-proyectos", &stats.total.to_string(), OutputStyle::info);
    OutputStyle::print_field_colored(
        "Completados",
        &stats.completed.to_string(),
        OutputStyle::success,
    );
    OutputStyle::print_field_colored(
        "En Proceso",
        &stats.in_process.to_string(),
        OutputStyle::info,
    );
    OutputStyle::print_field_colored(
        "Progreso",
        &format!("{}%", stats.avg_progress),
        OutputStyle::warning,
    );

    Ok(())
}

fn print_project_list(store: &ProjectStore<SupabaseClient>, theme: Theme) {
    println!(
        "{}",
        OutputStyle::heading(&format!("Mis Proyectos ({})", store.projects().len()), theme)
    );
    println!("{}", OutputStyle::header_separator());

    for project in store.projects() {
        let sub_count = store.sub_projects_of(&project.id).len();

        println!();
        println!(
            "{} {}  {}",
            project.icono,
            OutputStyle::name(&project.nombre),
            OutputStyle::muted(&format!("creado {}", format_date(&project.fecha_creacion)))
        );
        println!("   {}", project.descripcion);
        println!(
            "   {}",
            OutputStyle::muted(&format!("{} sub-proyectos · id {}", sub_count, project.id))
        );
    }
}

fn print_json_list(projects: &[Project]) -> Result<()> {
    let json = serde_json::to_string_pretty(projects)
        .context("Failed to serialize projects to JSON")?;
    println!("{}", json);
    Ok(())
}

pub async fn handle_show_command(config: Config, args: &ShowArgs) -> Result<()> {
    let store = load_store(&config).await?;

    let project = match store.find_project(&args.identifier) {
        Some(found) => found.clone(),
        None => {
            handle_not_found("Proyecto", &args.identifier);
            return Ok(());
        }
    };

    let subs: Vec<SubProject> = store
        .sub_projects_of(&project.id)
        .into_iter()
        .cloned()
        .collect();

    println!(
        "{} {}",
        project.icono,
        OutputStyle::heading(&project.nombre, config.ui.theme)
    );
    println!("{}", OutputStyle::muted(&project.descripcion));
    println!();

    StatsCalculator::print_board_stats(&BoardStats::calculate(&subs));
    println!();

    if subs.is_empty() {
        println!("📝 ¡Agrega tu primer sub-proyecto!");
        println!(
            "{}",
            OutputStyle::muted("Organiza las tareas en las 3 columnas: tablero sub new")
        );
        return Ok(());
    }

    for step in 1..=3u8 {
        print_column(step, &subs_by_step(&subs, step));
    }

    Ok(())
}

fn print_column(step: u8, column: &[&SubProject]) {
    let dot = match step {
        1 => "🔵",
        2 => "🟡",
        _ => "🟢",
    };

    println!(
        "{} {} ({})",
        dot,
        OutputStyle::header(step_label(step)),
        column.len()
    );
    println!("{}", OutputStyle::separator());

    if column.is_empty() {
        println!("{}", OutputStyle::muted("  Sin sub-proyectos"));
    }

    for sub in column {
        print_sub_card(sub);
    }
    println!();
}

fn print_sub_card(sub: &SubProject) {
    let mut badges = vec![OutputStyle::estado_badge(sub.estado).to_string()];
    if let Some(prioridad) = sub.prioridad {
        badges.push(OutputStyle::prioridad_badge(prioridad).to_string());
    }

    println!("  {}  {}", OutputStyle::name(&sub.nombre), badges.join(" "));
    if sub.progreso > 0 {
        println!("     {}", progress_bar(sub.progreso));
    }
    if let Some(responsable) = &sub.responsable {
        println!("     👤 {}", responsable);
    }
    if let Some(fecha_fin) = &sub.fecha_fin {
        println!("     📅 {}", fecha_fin);
    }
    if let Some(observaciones) = &sub.observaciones {
        println!("     {}", OutputStyle::muted(observaciones));
    }
    println!("     {}", OutputStyle::muted(&format!("id {}", sub.id)));
}

pub async fn handle_new_command(config: Config, args: &NewArgs) -> Result<()> {
    let nombre = match &args.nombre {
        Some(nombre) => nombre.clone(),
        None => {
            match utils::prompt_required(&format!("{}: ", OutputStyle::label("Nombre del proyecto")))? {
                Some(nombre) => nombre,
                None => {
                    print_cancelled("Creación cancelada");
                    return Ok(());
                }
            }
        }
    };

    let descripcion = match &args.descripcion {
        Some(descripcion) => descripcion.clone(),
        None => {
            match utils::prompt_required(&format!("{}: ", OutputStyle::label("Descripción")))? {
                Some(descripcion) => descripcion,
                None => {
                    print_cancelled("Creación cancelada");
                    return Ok(());
                }
            }
        }
    };

    // required non-empty, checked here rather than inside the store
    if nombre.trim().is_empty() || descripcion.trim().is_empty() {
        print_system_error("Nombre y descripción son obligatorios");
        return Err(anyhow::anyhow!("Nombre y descripción son obligatorios"));
    }

    let mut store = load_store(&config).await?;
    let project = store
        .create_project(nombre, descripcion)
        .await
        .context("Failed to create project")?;

    print_success(&format!("Proyecto '{}' creado!", project.nombre));
    println!("{}", OutputStyle::muted(&format!("id {}", project.id)));

    Ok(())
}

pub async fn handle_edit_command(config: Config, args: &EditArgs) -> Result<()> {
    let mut store = load_store(&config).await?;

    let project = match store.find_project(&args.identifier) {
        Some(found) => found.clone(),
        None => {
            handle_not_found("Proyecto", &args.identifier);
            return Ok(());
        }
    };

    let patch = if args.nombre.is_none() && args.descripcion.is_none() {
        // interactive edit; Enter keeps the current value
        println!(
            "Editando '{}' (Enter mantiene el valor actual)",
            project.nombre
        );
        let nombre = utils::prompt_input(&format!(
            "{} [{}]: ",
            OutputStyle::label("Nombre"),
            project.nombre
        ))?;
        let descripcion = utils::prompt_input(&format!(
            "{} [{}]: ",
            OutputStyle::label("Descripción"),
            project.descripcion
        ))?;

        ProjectPatch {
            nombre: (!nombre.is_empty()).then_some(nombre),
            descripcion: (!descripcion.is_empty()).then_some(descripcion),
        }
    } else {
        ProjectPatch {
            nombre: args.nombre.clone(),
            descripcion: args.descripcion.clone(),
        }
    };

    if patch.is_empty() {
        print_warning("Nada que actualizar");
        return Ok(());
    }

    let updated = store
        .update_project(&project.id, patch)
        .await
        .context("Failed to update project")?;

    print_success(&format!("Proyecto '{}' actualizado!", updated.nombre));

    Ok(())
}

pub async fn handle_delete_command(config: Config, args: &DeleteArgs) -> Result<()> {
    let mut store = load_store(&config).await?;

    let project = match store.find_project(&args.identifier) {
        Some(found) => found.clone(),
        None => {
            // fall back to interactive selection
            let items: Vec<String> = store
                .projects()
                .iter()
                .map(|p| format!("{} {}", p.icono, p.nombre))
                .collect();

            if items.is_empty() {
                print_empty_result("proyectos");
                return Ok(());
            }

            match utils::select_from_list(&items)? {
                Some(index) => store.projects()[index].clone(),
                None => {
                    print_cancelled("Selección cancelada");
                    return Ok(());
                }
            }
        }
    };

    let sub_count = store.sub_projects_of(&project.id).len();

    println!("Proyecto a eliminar:");
    println!(
        "  {} {} ({} sub-proyectos)",
        project.icono, project.nombre, sub_count
    );

    if !args.force
        && !utils::prompt_yes_no(
            "\n¿Estás seguro de eliminar este proyecto y todos sus sub-proyectos?",
        )?
    {
        print_cancelled("Proyecto no eliminado");
        return Ok(());
    }

    store
        .delete_project(&project.id)
        .await
        .context("Failed to delete project")?;

    println!("✓ Proyecto '{}' eliminado!", project.nombre);

    Ok(())
}
