use crate::config::BackendConfig;
use crate::models::{Project, SubProject};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

/// Marker binding a row type to one backend table.
pub trait Table: Serialize + DeserializeOwned + Send + Sync {
    const NAME: &'static str;
}

impl Table for Project {
    const NAME: &'static str = "projects";
}

impl Table for SubProject {
    const NAME: &'static str = "sub_projects";
}

/// Table-level operations against the remote backend. Stateless per call;
/// every method either succeeds or raises a typed failure, with no retries.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch every row of a table, newest first (`created_at` descending).
    async fn list_all<T: Table>(&self) -> AppResult<Vec<T>>;

    /// Insert one row and return it with backend-assigned fields populated.
    async fn insert<T: Table>(&self, row: &T) -> AppResult<T>;

    /// Apply a partial update to the row with the given id. `updated_at` is
    /// stamped to the current time as part of the call.
    async fn update<T: Table>(&self, id: &str, patch: Value) -> AppResult<T>;

    /// Delete one row by id. Deleting a nonexistent id is not an error.
    async fn delete<T: Table>(&self, id: &str) -> AppResult<()>;

    /// Delete every row of a table. Used only by bulk import.
    async fn delete_all<T: Table>(&self) -> AppResult<()>;

    /// Insert many rows in one call. Best-effort: partial-insert behavior
    /// is whatever the backend itself provides.
    async fn bulk_insert<T: Table>(&self, rows: &[T]) -> AppResult<()>;
}

pub(crate) fn stamp_updated_at(patch: &mut Value) {
    if let Value::Object(map) = patch {
        map.insert("updated_at".to_string(), json!(Utc::now()));
    }
}

/// PostgREST client for a Supabase-hosted backend.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        if config.url.is_empty() || config.anon_key.is_empty() {
            return Err(AppError::Config(
                "Missing backend URL or anon key. Set them in the config file or via TABLERO_SUPABASE_URL / TABLERO_SUPABASE_ANON_KEY".to_string(),
            ));
        }

        Ok(Self {
            client: Client::builder()
                .user_agent(concat!("tablero/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| AppError::Backend(format!("Failed to create HTTP client: {}", e)))?,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn check_status(response: reqwest::Response, action: &str) -> AppResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        Err(AppError::Backend(format!(
            "Failed to {}: {} - {}",
            action, status, error_text
        )))
    }
}

#[async_trait]
impl RemoteStore for SupabaseClient {
    async fn list_all<T: Table>(&self) -> AppResult<Vec<T>> {
        let response = self
            .request(Method::GET, T::NAME)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to fetch {}: {}", T::NAME, e)))?;

        let response = Self::check_status(response, &format!("fetch {}", T::NAME)).await?;

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse {} response: {}", T::NAME, e)))
    }

    async fn insert<T: Table>(&self, row: &T) -> AppResult<T> {
        let response = self
            .request(Method::POST, T::NAME)
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to insert into {}: {}", T::NAME, e)))?;

        let response = Self::check_status(response, &format!("insert into {}", T::NAME)).await?;

        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse {} response: {}", T::NAME, e)))?;

        if rows.is_empty() {
            return Err(AppError::Backend(format!(
                "Insert into {} returned no representation",
                T::NAME
            )));
        }
        Ok(rows.remove(0))
    }

    async fn update<T: Table>(&self, id: &str, mut patch: Value) -> AppResult<T> {
        stamp_updated_at(&mut patch);

        let response = self
            .request(Method::PATCH, T::NAME)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to update {}: {}", T::NAME, e)))?;

        let response = Self::check_status(response, &format!("update {}", T::NAME)).await?;

        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse {} response: {}", T::NAME, e)))?;

        if rows.is_empty() {
            return Err(AppError::NotFound(format!("{} '{}'", T::NAME, id)));
        }
        Ok(rows.remove(0))
    }

    async fn delete<T: Table>(&self, id: &str) -> AppResult<()> {
        let response = self
            .request(Method::DELETE, T::NAME)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to delete from {}: {}", T::NAME, e)))?;

        Self::check_status(response, &format!("delete from {}", T::NAME)).await?;
        Ok(())
    }

    async fn delete_all<T: Table>(&self) -> AppResult<()> {
        // id=neq.<empty> matches every row, the PostgREST idiom for a
        // whole-table delete
        let response = self
            .request(Method::DELETE, T::NAME)
            .query(&[("id", "neq.")])
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to clear {}: {}", T::NAME, e)))?;

        Self::check_status(response, &format!("clear {}", T::NAME)).await?;
        Ok(())
    }

    async fn bulk_insert<T: Table>(&self, rows: &[T]) -> AppResult<()> {
        let response = self
            .request(Method::POST, T::NAME)
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to bulk insert into {}: {}", T::NAME, e)))?;

        Self::check_status(response, &format!("bulk insert into {}", T::NAME)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new(&BackendConfig {
            url: "https://example.supabase.co/".to_string(),
            anon_key: "anon".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Project::NAME, "projects");
        assert_eq!(SubProject::NAME, "sub_projects");
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let client = client();
        assert_eq!(
            client.table_url("projects"),
            "https://example.supabase.co/rest/v1/projects"
        );
    }

    #[test]
    fn test_new_rejects_blank_config() {
        let result = SupabaseClient::new(&BackendConfig {
            url: String::new(),
            anon_key: String::new(),
        });
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_stamp_updated_at() {
        let mut patch = json!({ "nombre": "nuevo" });
        stamp_updated_at(&mut patch);
        let map = patch.as_object().unwrap();
        assert!(map.contains_key("updated_at"));
        assert_eq!(map["nombre"], "nuevo");
    }
}
