use crate::models::{Project, SubProject};
use crate::utils::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-disk backup document: the two collections plus the export timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    pub projects: Vec<Project>,
    #[serde(rename = "subProjects")]
    pub sub_projects: Vec<SubProject>,
    #[serde(default = "Utc::now")]
    pub exported: DateTime<Utc>,
}

impl Backup {
    pub fn new(projects: Vec<Project>, sub_projects: Vec<SubProject>) -> Self {
        Self {
            projects,
            sub_projects,
            exported: Utc::now(),
        }
    }

    /// Parse a backup file. Invalid JSON reads as "Error al leer archivo";
    /// valid JSON that is missing either collection (or whose rows do not
    /// fit the data model) reads as "Archivo inválido".
    pub fn parse(contents: &str) -> AppResult<Self> {
        let value: serde_json::Value = serde_json::from_str(contents)
            .map_err(|_| AppError::Import("Error al leer archivo".to_string()))?;

        serde_json::from_value(value).map_err(|_| AppError::Import("Archivo inválido".to_string()))
    }

    pub fn to_json_bytes(&self) -> AppResult<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| AppError::Io(format!("Failed to serialize backup: {}", e)))
    }

    pub fn file_name(now: DateTime<Utc>) -> String {
        format!("proyectos-{}.json", now.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_name_pattern() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 15, 30, 0).unwrap();
        assert_eq!(Backup::file_name(date), "proyectos-2024-03-09.json");
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = Backup::parse("{not json").unwrap_err();
        assert!(matches!(err, AppError::Import(ref msg) if msg == "Error al leer archivo"));
    }

    #[test]
    fn test_parse_rejects_missing_sub_projects_key() {
        let err = Backup::parse(r#"{"projects": []}"#).unwrap_err();
        assert!(matches!(err, AppError::Import(ref msg) if msg == "Archivo inválido"));
    }

    #[test]
    fn test_parse_accepts_exported_absent() {
        let backup = Backup::parse(r#"{"projects": [], "subProjects": []}"#).unwrap();
        assert!(backup.projects.is_empty());
        assert!(backup.sub_projects.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_rows() {
        let project = Project::new("CRM".to_string(), "desc".to_string(), 0);
        let sub = SubProject::new(project.id.clone(), crate::models::SubProjectDraft {
            nombre: "DB Design".to_string(),
            ..Default::default()
        });

        let backup = Backup::new(vec![project.clone()], vec![sub.clone()]);
        let bytes = backup.to_json_bytes().unwrap();
        let parsed = Backup::parse(std::str::from_utf8(&bytes).unwrap()).unwrap();

        assert_eq!(parsed.projects.len(), 1);
        assert_eq!(parsed.projects[0].id, project.id);
        assert_eq!(parsed.projects[0].nombre, "CRM");
        assert_eq!(parsed.sub_projects.len(), 1);
        assert_eq!(parsed.sub_projects[0].id, sub.id);
        assert_eq!(parsed.sub_projects[0].proyecto_id, project.id);
    }
}
