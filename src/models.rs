//! Core data structures for project tracking
//!
//! Row types mirror the two backend tables (`projects`, `sub_projects`)
//! plus the partial-update payloads sent on edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Workflow status of a sub-project. Stored independently from `step`;
/// the two are never reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Estado {
    #[serde(rename = "Por hacer")]
    PorHacer,
    #[serde(rename = "En progreso")]
    EnProgreso,
    #[serde(rename = "Completado")]
    Completado,
    #[serde(rename = "Pausado")]
    Pausado,
}

impl Default for Estado {
    fn default() -> Self {
        Estado::PorHacer
    }
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Estado::PorHacer => "Por hacer",
            Estado::EnProgreso => "En progreso",
            Estado::Completado => "Completado",
            Estado::Pausado => "Pausado",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Estado {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', " ").as_str() {
            "por hacer" => Ok(Estado::PorHacer),
            "en progreso" => Ok(Estado::EnProgreso),
            "completado" => Ok(Estado::Completado),
            "pausado" => Ok(Estado::Pausado),
            other => Err(format!(
                "estado desconocido '{}' (valores: por-hacer, en-progreso, completado, pausado)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prioridad {
    Alta,
    Media,
    Baja,
}

impl fmt::Display for Prioridad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Prioridad::Alta => "Alta",
            Prioridad::Media => "Media",
            Prioridad::Baja => "Baja",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Prioridad {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alta" => Ok(Prioridad::Alta),
            "media" => Ok(Prioridad::Media),
            "baja" => Ok(Prioridad::Baja),
            other => Err(format!(
                "prioridad desconocida '{}' (valores: alta, media, baja)",
                other
            )),
        }
    }
}

// Cosmetic palettes, cycled by creation-order index
const PROJECT_COLORS: [&str; 6] = [
    "from-purple-500 to-blue-500",
    "from-green-500 to-teal-500",
    "from-orange-500 to-red-500",
    "from-pink-500 to-rose-500",
    "from-indigo-500 to-purple-500",
    "from-cyan-500 to-blue-500",
];

const PROJECT_ICONS: [&str; 6] = ["🚀", "💡", "🎯", "⚡", "🔥", "💎"];

pub fn project_color(index: usize) -> &'static str {
    PROJECT_COLORS[index % PROJECT_COLORS.len()]
}

pub fn project_icon(index: usize) -> &'static str {
    PROJECT_ICONS[index % PROJECT_ICONS.len()]
}

/// Human label of a workflow column (1 = to-do, 2 = in process, 3 = done).
pub fn step_label(step: u8) -> &'static str {
    match step {
        1 => "Por hacer",
        2 => "En proceso",
        3 => "Completado",
        _ => "Desconocido",
    }
}

/// A top-level project row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub nombre: String,
    pub descripcion: String,
    pub color: String,
    pub icono: String,
    pub fecha_creacion: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Build a new project row. The id and creation timestamp are assigned
    /// client-side; color and icon derive from the creation-order index.
    pub fn new(nombre: String, descripcion: String, index: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            nombre,
            descripcion,
            color: project_color(index).to_string(),
            icono: project_icon(index).to_string(),
            fecha_creacion: Utc::now(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icono, self.nombre)
    }
}

/// A sub-project row, belonging to exactly one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubProject {
    pub id: String,
    pub proyecto_id: String,
    pub nombre: String,
    pub step: u8,
    pub estado: Estado,
    pub progreso: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prioridad: Option<Prioridad>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tecnologia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// User-supplied fields for a new sub-project, before the store assigns
/// identity and ownership.
#[derive(Debug, Clone)]
pub struct SubProjectDraft {
    pub nombre: String,
    pub step: u8,
    pub estado: Estado,
    pub progreso: i32,
    pub responsable: Option<String>,
    pub prioridad: Option<Prioridad>,
    pub tecnologia: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub observaciones: Option<String>,
}

impl Default for SubProjectDraft {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            step: 1,
            estado: Estado::PorHacer,
            progreso: 0,
            responsable: None,
            prioridad: Some(Prioridad::Media),
            tecnologia: None,
            fecha_inicio: None,
            fecha_fin: None,
            observaciones: None,
        }
    }
}

impl SubProject {
    pub fn new(proyecto_id: String, draft: SubProjectDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            proyecto_id,
            nombre: draft.nombre,
            step: draft.step,
            estado: draft.estado,
            progreso: draft.progreso,
            responsable: draft.responsable,
            prioridad: draft.prioridad,
            tecnologia: draft.tecnologia,
            fecha_inicio: draft.fecha_inicio,
            fecha_fin: draft.fecha_fin,
            observaciones: draft.observaciones,
            fecha_creacion: Utc::now(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Stored progress clamped to 0-100 for display. The stored value is
    /// never validated on write.
    pub fn progreso_display(&self) -> i32 {
        self.progreso.clamp(0, 100)
    }
}

/// Partial update for a project; only set fields reach the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none() && self.descripcion.is_none()
    }
}

/// Partial update for a sub-project; only set fields reach the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<Estado>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progreso: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioridad: Option<Prioridad>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tecnologia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

impl SubProjectPatch {
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .map(|v| v.as_object().map(|m| m.is_empty()).unwrap_or(true))
            .unwrap_or(true)
    }
}

/// Statistics over one project's sub-projects, recomputed from state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardStats {
    pub total: usize,
    pub completed: usize,
    pub in_process: usize,
    pub avg_progress: i32,
}

impl BoardStats {
    pub fn calculate(subs: &[SubProject]) -> Self {
        let total = subs.len();
        let completed = subs.iter().filter(|s| s.estado == Estado::Completado).count();
        let in_process = subs.iter().filter(|s| s.step == 2).count();
        let avg_progress = if total == 0 {
            0
        } else {
            let sum: i64 = subs.iter().map(|s| s.progreso as i64).sum();
            (sum as f64 / total as f64).round() as i32
        };

        Self {
            total,
            completed,
            in_process,
            avg_progress,
        }
    }
}

/// Sub-projects of one column, preserving collection order
pub fn subs_by_step<'a>(subs: &'a [SubProject], step: u8) -> Vec<&'a SubProject> {
    subs.iter().filter(|s| s.step == step).collect()
}
