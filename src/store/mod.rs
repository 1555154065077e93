//! Project store: owns the in-memory collections and mediates every
//! mutation through the remote backend, patching local state to match.

pub mod backup;
pub mod remote;

pub use backup::Backup;
pub use remote::{RemoteStore, SupabaseClient, Table};

use crate::models::{Project, ProjectPatch, SubProject, SubProjectDraft, SubProjectPatch};
use crate::utils::error::{AppError, AppResult};

/// In-memory view of both tables, kept in sync with the backend across
/// create/update/delete/import/export. Collections are owned here for the
/// session lifetime; the remote client is stateless per call.
pub struct ProjectStore<S: RemoteStore> {
    client: S,
    projects: Vec<Project>,
    sub_projects: Vec<SubProject>,
    loading: bool,
    error: Option<String>,
}

impl<S: RemoteStore> ProjectStore<S> {
    pub fn new(client: S) -> Self {
        Self {
            client,
            projects: Vec::new(),
            sub_projects: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn sub_projects(&self) -> &[SubProject] {
        &self.sub_projects
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sub-projects belonging to one project, preserving collection order.
    pub fn sub_projects_of(&self, project_id: &str) -> Vec<&SubProject> {
        self.sub_projects
            .iter()
            .filter(|s| s.proyecto_id == project_id)
            .collect()
    }

    /// Resolve a project by id, falling back to exact name match.
    pub fn find_project(&self, identifier: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == identifier)
            .or_else(|| self.projects.iter().find(|p| p.nombre == identifier))
    }

    /// Resolve a sub-project by id, falling back to exact name match.
    pub fn find_sub_project(&self, identifier: &str) -> Option<&SubProject> {
        self.sub_projects
            .iter()
            .find(|s| s.id == identifier)
            .or_else(|| self.sub_projects.iter().find(|s| s.nombre == identifier))
    }

    /// Load both collections from the backend. On failure the previous
    /// collections are kept and the error is recorded.
    pub async fn load(&mut self) -> AppResult<()> {
        self.loading = true;
        self.error = None;

        let result = self.load_collections().await;

        self.loading = false;
        if let Err(err) = &result {
            self.error = Some(err.to_string());
        }
        result
    }

    async fn load_collections(&mut self) -> AppResult<()> {
        let projects = self.client.list_all::<Project>().await?;
        let sub_projects = self.client.list_all::<SubProject>().await?;

        self.projects = projects;
        self.sub_projects = sub_projects;
        Ok(())
    }

    fn record_failure<T>(&mut self, err: AppError) -> AppResult<T> {
        self.error = Some(err.to_string());
        Err(err)
    }

    /// Create a project. Identity, creation timestamp, and the cosmetic
    /// color/icon (from the creation-order index) are assigned client-side
    /// before insert. The created row is prepended, matching the backend's
    /// newest-first ordering.
    pub async fn create_project(
        &mut self,
        nombre: String,
        descripcion: String,
    ) -> AppResult<Project> {
        let row = Project::new(nombre, descripcion, self.projects.len());

        match self.client.insert(&row).await {
            Ok(created) => {
                self.projects.insert(0, created.clone());
                Ok(created)
            }
            Err(err) => self.record_failure(err),
        }
    }

    /// Update a project; the backend stamps `updated_at`. The matching
    /// local entry is replaced in place, position unchanged.
    pub async fn update_project(&mut self, id: &str, patch: ProjectPatch) -> AppResult<Project> {
        let patch_value = serde_json::to_value(&patch)
            .map_err(|e| AppError::Backend(format!("Failed to encode update: {}", e)))?;

        match self.client.update::<Project>(id, patch_value).await {
            Ok(updated) => {
                if let Some(entry) = self.projects.iter_mut().find(|p| p.id == id) {
                    *entry = updated.clone();
                }
                Ok(updated)
            }
            Err(err) => self.record_failure(err),
        }
    }

    /// Delete a project, then cascade to its sub-projects. The cascade is
    /// client-enforced row by row and not atomic with the project deletion;
    /// an interruption can leave orphaned sub-project rows server-side.
    pub async fn delete_project(&mut self, id: &str) -> AppResult<()> {
        if let Err(err) = self.client.delete::<Project>(id).await {
            return self.record_failure(err);
        }

        let sub_ids: Vec<String> = self
            .sub_projects
            .iter()
            .filter(|s| s.proyecto_id == id)
            .map(|s| s.id.clone())
            .collect();
        for sub_id in &sub_ids {
            if let Err(err) = self.client.delete::<SubProject>(sub_id).await {
                return self.record_failure(err);
            }
        }

        self.projects.retain(|p| p.id != id);
        self.sub_projects.retain(|s| s.proyecto_id != id);
        Ok(())
    }

    /// Create a sub-project under an existing project. The foreign key is
    /// checked against the loaded collection before the insert.
    pub async fn create_sub_project(
        &mut self,
        proyecto_id: &str,
        draft: SubProjectDraft,
    ) -> AppResult<SubProject> {
        if !self.projects.iter().any(|p| p.id == proyecto_id) {
            return self.record_failure(AppError::NotFound(format!(
                "projects '{}'",
                proyecto_id
            )));
        }

        let row = SubProject::new(proyecto_id.to_string(), draft);

        match self.client.insert(&row).await {
            Ok(created) => {
                self.sub_projects.insert(0, created.clone());
                Ok(created)
            }
            Err(err) => self.record_failure(err),
        }
    }

    pub async fn update_sub_project(
        &mut self,
        id: &str,
        patch: SubProjectPatch,
    ) -> AppResult<SubProject> {
        let patch_value = serde_json::to_value(&patch)
            .map_err(|e| AppError::Backend(format!("Failed to encode update: {}", e)))?;

        match self.client.update::<SubProject>(id, patch_value).await {
            Ok(updated) => {
                if let Some(entry) = self.sub_projects.iter_mut().find(|s| s.id == id) {
                    *entry = updated.clone();
                }
                Ok(updated)
            }
            Err(err) => self.record_failure(err),
        }
    }

    pub async fn delete_sub_project(&mut self, id: &str) -> AppResult<()> {
        if let Err(err) = self.client.delete::<SubProject>(id).await {
            return self.record_failure(err);
        }

        self.sub_projects.retain(|s| s.id != id);
        Ok(())
    }

    /// Snapshot the current state as a backup document. Pure function of
    /// state; no backend call.
    pub fn export_data(&self) -> Backup {
        Backup::new(self.projects.clone(), self.sub_projects.clone())
    }

    /// Replace all backend data with the contents of a backup file, then
    /// reload. Clearing respects the foreign-key direction (sub-projects
    /// first). The sequence is not transactional: a failure after the clear
    /// leaves the backend empty. Parse failures happen before any backend
    /// call and leave existing data untouched.
    pub async fn import_data(&mut self, contents: &str) -> AppResult<()> {
        let backup = Backup::parse(contents)?;

        self.client.delete_all::<SubProject>().await?;
        self.client.delete_all::<Project>().await?;

        if !backup.projects.is_empty() {
            self.client.bulk_insert(&backup.projects).await?;
        }
        if !backup.sub_projects.is_empty() {
            self.client.bulk_insert(&backup.sub_projects).await?;
        }

        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::remote::stamp_updated_at;
    use super::*;
    use crate::models::Estado;
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Backend double storing rows as JSON keyed by table name. Listing
    /// returns newest first, mirroring the `created_at desc` contract.
    #[derive(Clone, Default)]
    struct MemoryStore {
        tables: Arc<Mutex<HashMap<&'static str, Vec<Value>>>>,
        fail: Arc<AtomicBool>,
    }

    impl MemoryStore {
        fn check_fail(&self) -> AppResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                Err(AppError::Backend("connection refused".to_string()))
            } else {
                Ok(())
            }
        }

        fn rows(&self, table: &'static str) -> Vec<Value> {
            self.tables
                .lock()
                .unwrap()
                .get(table)
                .cloned()
                .unwrap_or_default()
        }

        fn row_count(&self, table: &'static str) -> usize {
            self.rows(table).len()
        }
    }

    #[async_trait]
    impl RemoteStore for MemoryStore {
        async fn list_all<T: Table>(&self) -> AppResult<Vec<T>> {
            self.check_fail()?;
            self.rows(T::NAME)
                .into_iter()
                .rev()
                .map(|v| {
                    serde_json::from_value(v).map_err(|e| AppError::Backend(e.to_string()))
                })
                .collect()
        }

        async fn insert<T: Table>(&self, row: &T) -> AppResult<T> {
            self.check_fail()?;
            let mut value =
                serde_json::to_value(row).map_err(|e| AppError::Backend(e.to_string()))?;
            if let Value::Object(map) = &mut value {
                map.insert("created_at".to_string(), json!(Utc::now()));
                map.insert("updated_at".to_string(), json!(Utc::now()));
            }
            self.tables
                .lock()
                .unwrap()
                .entry(T::NAME)
                .or_default()
                .push(value.clone());
            serde_json::from_value(value).map_err(|e| AppError::Backend(e.to_string()))
        }

        async fn update<T: Table>(&self, id: &str, mut patch: Value) -> AppResult<T> {
            self.check_fail()?;
            stamp_updated_at(&mut patch);

            let mut tables = self.tables.lock().unwrap();
            let rows = tables.entry(T::NAME).or_default();
            for row in rows.iter_mut() {
                if row["id"] == id {
                    if let (Value::Object(target), Value::Object(fields)) = (&mut *row, &patch) {
                        for (key, value) in fields {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                    return serde_json::from_value(row.clone())
                        .map_err(|e| AppError::Backend(e.to_string()));
                }
            }
            Err(AppError::NotFound(format!("{} '{}'", T::NAME, id)))
        }

        async fn delete<T: Table>(&self, id: &str) -> AppResult<()> {
            self.check_fail()?;
            self.tables
                .lock()
                .unwrap()
                .entry(T::NAME)
                .or_default()
                .retain(|row| row["id"] != id);
            Ok(())
        }

        async fn delete_all<T: Table>(&self) -> AppResult<()> {
            self.check_fail()?;
            self.tables.lock().unwrap().insert(T::NAME, Vec::new());
            Ok(())
        }

        async fn bulk_insert<T: Table>(&self, rows: &[T]) -> AppResult<()> {
            self.check_fail()?;
            let mut tables = self.tables.lock().unwrap();
            let entry = tables.entry(T::NAME).or_default();
            for row in rows {
                entry.push(serde_json::to_value(row).map_err(|e| AppError::Backend(e.to_string()))?);
            }
            Ok(())
        }
    }

    async fn loaded_store() -> (ProjectStore<MemoryStore>, MemoryStore) {
        let backend = MemoryStore::default();
        let mut store = ProjectStore::new(backend.clone());
        store.load().await.unwrap();
        (store, backend)
    }

    fn draft(nombre: &str, step: u8) -> SubProjectDraft {
        SubProjectDraft {
            nombre: nombre.to_string(),
            step,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_populates_collections() {
        let (mut store, backend) = loaded_store().await;
        store
            .create_project("Uno".to_string(), "d".to_string())
            .await
            .unwrap();

        let mut fresh = ProjectStore::new(backend.clone());
        fresh.load().await.unwrap();
        assert_eq!(fresh.projects().len(), 1);
        assert!(!fresh.is_loading());
        assert!(fresh.error().is_none());
    }

    #[tokio::test]
    async fn test_load_failure_records_error_and_keeps_state() {
        let backend = MemoryStore::default();
        backend.fail.store(true, Ordering::SeqCst);

        let mut store = ProjectStore::new(backend);
        let result = store.load().await;

        assert!(result.is_err());
        assert!(store.error().is_some());
        assert!(!store.is_loading());
        assert!(store.projects().is_empty());
    }

    #[tokio::test]
    async fn test_create_project_prepends_and_assigns_identity() {
        let (mut store, _backend) = loaded_store().await;

        let first = store
            .create_project("CRM".to_string(), "desc".to_string())
            .await
            .unwrap();
        assert!(!first.id.is_empty());
        assert_eq!(first.color, "from-purple-500 to-blue-500");
        assert_eq!(first.icono, "🚀");
        assert!(first.created_at.is_some());

        let second = store
            .create_project("Web".to_string(), "otra".to_string())
            .await
            .unwrap();
        assert_eq!(store.projects().len(), 2);
        assert_eq!(store.projects()[0].id, second.id);
        assert_eq!(store.projects()[1].id, first.id);
    }

    #[tokio::test]
    async fn test_update_project_replaces_in_place() {
        let (mut store, _backend) = loaded_store().await;
        let a = store
            .create_project("A".to_string(), "d".to_string())
            .await
            .unwrap();
        let b = store
            .create_project("B".to_string(), "d".to_string())
            .await
            .unwrap();

        let updated = store
            .update_project(
                &a.id,
                ProjectPatch {
                    nombre: Some("A2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.nombre, "A2");
        assert!(updated.updated_at.is_some());
        assert_eq!(store.projects().len(), 2);
        // position unchanged, the other entry untouched
        assert_eq!(store.projects()[0].id, b.id);
        assert_eq!(store.projects()[1].nombre, "A2");
        assert_eq!(store.projects()[0].nombre, "B");
    }

    #[tokio::test]
    async fn test_update_missing_project_is_not_found() {
        let (mut store, _backend) = loaded_store().await;
        let result = store
            .update_project("nope", ProjectPatch::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn test_delete_project_cascades_to_sub_projects() {
        let (mut store, backend) = loaded_store().await;
        let project = store
            .create_project("CRM".to_string(), "d".to_string())
            .await
            .unwrap();
        let other = store
            .create_project("Web".to_string(), "d".to_string())
            .await
            .unwrap();
        store
            .create_sub_project(&project.id, draft("t1", 1))
            .await
            .unwrap();
        store
            .create_sub_project(&project.id, draft("t2", 2))
            .await
            .unwrap();
        store
            .create_sub_project(&other.id, draft("t3", 1))
            .await
            .unwrap();

        store.delete_project(&project.id).await.unwrap();

        assert_eq!(store.projects().len(), 1);
        assert!(store.find_project(&project.id).is_none());
        assert!(store.sub_projects_of(&project.id).is_empty());
        assert_eq!(store.sub_projects().len(), 1);
        // cascade reached the backend, not just local state
        assert_eq!(backend.row_count("sub_projects"), 1);
        assert_eq!(backend.row_count("projects"), 1);
    }

    #[tokio::test]
    async fn test_delete_project_without_subs_leaves_collection_unchanged() {
        let (mut store, _backend) = loaded_store().await;
        let a = store
            .create_project("A".to_string(), "d".to_string())
            .await
            .unwrap();
        let b = store
            .create_project("B".to_string(), "d".to_string())
            .await
            .unwrap();
        store
            .create_sub_project(&b.id, draft("t", 1))
            .await
            .unwrap();

        store.delete_project(&a.id).await.unwrap();

        assert_eq!(store.projects().len(), 1);
        assert_eq!(store.sub_projects().len(), 1);
    }

    #[tokio::test]
    async fn test_create_sub_project_requires_existing_project() {
        let (mut store, backend) = loaded_store().await;
        let result = store.create_sub_project("ghost", draft("t", 1)).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(backend.row_count("sub_projects"), 0);
    }

    #[tokio::test]
    async fn test_mutation_failure_leaves_collections_unchanged() {
        let (mut store, backend) = loaded_store().await;
        store
            .create_project("A".to_string(), "d".to_string())
            .await
            .unwrap();

        backend.fail.store(true, Ordering::SeqCst);
        let result = store
            .create_project("B".to_string(), "d".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Backend(_))));
        assert!(store.error().unwrap().contains("connection refused"));
        assert_eq!(store.projects().len(), 1);
    }

    #[tokio::test]
    async fn test_import_invalid_file_leaves_backend_untouched() {
        let (mut store, backend) = loaded_store().await;
        store
            .create_project("A".to_string(), "d".to_string())
            .await
            .unwrap();

        let err = store.import_data(r#"{"projects": []}"#).await.unwrap_err();
        assert!(matches!(err, AppError::Import(ref msg) if msg == "Archivo inválido"));
        assert_eq!(backend.row_count("projects"), 1);

        let err = store.import_data("{broken").await.unwrap_err();
        assert!(matches!(err, AppError::Import(ref msg) if msg == "Error al leer archivo"));
        assert_eq!(backend.row_count("projects"), 1);
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let (mut store, backend) = loaded_store().await;
        let project = store
            .create_project("CRM".to_string(), "desc".to_string())
            .await
            .unwrap();
        let sub = store
            .create_sub_project(&project.id, draft("DB Design", 1))
            .await
            .unwrap();

        let backup = store.export_data();
        let bytes = backup.to_json_bytes().unwrap();

        // stale rows get wiped by the clear-then-insert sequence
        store
            .create_project("Temporal".to_string(), "x".to_string())
            .await
            .unwrap();

        store
            .import_data(std::str::from_utf8(&bytes).unwrap())
            .await
            .unwrap();

        assert_eq!(store.projects().len(), 1);
        assert_eq!(store.projects()[0].id, project.id);
        assert_eq!(store.projects()[0].nombre, "CRM");
        assert_eq!(store.sub_projects().len(), 1);
        assert_eq!(store.sub_projects()[0].id, sub.id);
        assert_eq!(backend.row_count("projects"), 1);
        assert_eq!(backend.row_count("sub_projects"), 1);
    }

    #[tokio::test]
    async fn test_board_scenario() {
        let (mut store, _backend) = loaded_store().await;

        let project = store
            .create_project("CRM".to_string(), "desc".to_string())
            .await
            .unwrap();
        assert_eq!(project.color, crate::models::project_color(0));
        assert_eq!(project.icono, crate::models::project_icon(0));

        let sub = store
            .create_sub_project(
                &project.id,
                SubProjectDraft {
                    nombre: "DB Design".to_string(),
                    step: 1,
                    estado: Estado::PorHacer,
                    progreso: 0,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let subs: Vec<SubProject> = store
            .sub_projects_of(&project.id)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(crate::models::subs_by_step(&subs, 1).len(), 1);
        assert_eq!(crate::models::BoardStats::calculate(&subs).avg_progress, 0);

        store
            .update_sub_project(
                &sub.id,
                SubProjectPatch {
                    progreso: Some(50),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let subs: Vec<SubProject> = store
            .sub_projects_of(&project.id)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(crate::models::BoardStats::calculate(&subs).avg_progress, 50);

        store.delete_project(&project.id).await.unwrap();
        assert!(store.sub_projects_of(&project.id).is_empty());
    }

    #[tokio::test]
    async fn test_delete_sub_project_is_idempotent() {
        let (mut store, _backend) = loaded_store().await;
        let project = store
            .create_project("A".to_string(), "d".to_string())
            .await
            .unwrap();
        let sub = store
            .create_sub_project(&project.id, draft("t", 1))
            .await
            .unwrap();

        store.delete_sub_project(&sub.id).await.unwrap();
        assert!(store.sub_projects().is_empty());

        // deleting again is not an error
        store.delete_sub_project(&sub.id).await.unwrap();
    }
}
