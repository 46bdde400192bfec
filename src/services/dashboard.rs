use crate::core::RegionCatalog;
use crate::models::{Region, RosterEntry, UserRecord};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the dashboard backend
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// A notification ready to be stored and delivered by the backend
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub name: String,
    pub title: String,
    pub content: String,
    /// Recipient identities in audience order
    pub users: Vec<String>,
    pub app_notification_settings: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RegionsPayload {
    regions: Vec<Region>,
}

/// Dashboard backend API client
///
/// Supplies the two inputs of audience selection and carries the result out:
/// - Fetching the user roster
/// - Fetching the region catalog
/// - Storing a notification for its recipients
pub struct DashboardClient {
    base_url: String,
    client: Client,
}

impl DashboardClient {
    /// Create a new dashboard client
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, DashboardError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch every user, preserving the order the backend lists them in
    pub async fn fetch_roster(&self) -> Result<Vec<RosterEntry>, DashboardError> {
        let url = self.endpoint("get_all_users");

        tracing::debug!("Fetching roster from: {}", url);

        let response = self.client.get(&url).send().await?;

        // The backend answers 404 when the users node is empty
        if response.status() == StatusCode::NOT_FOUND {
            tracing::info!("Backend reported no users, roster is empty");
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            return Err(DashboardError::ApiError(format!(
                "Failed to fetch users: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let users = json
            .get("users")
            .and_then(|u| u.as_object())
            .ok_or_else(|| DashboardError::InvalidResponse("Missing users object".into()))?;

        let mut roster = Vec::with_capacity(users.len());
        for (id, data) in users {
            if !data.is_object() {
                tracing::warn!("Skipping invalid user data for user ID: {}", id);
                continue;
            }

            match serde_json::from_value::<UserRecord>(data.clone()) {
                Ok(user) => roster.push(RosterEntry::new(id.clone(), user)),
                Err(e) => tracing::warn!("Skipping unparseable user {}: {}", id, e),
            }
        }

        tracing::debug!("Fetched roster of {} users", roster.len());

        Ok(roster)
    }

    /// Fetch the named-region catalog
    pub async fn fetch_regions(&self) -> Result<RegionCatalog, DashboardError> {
        let url = self.endpoint("get_regions");

        tracing::debug!("Fetching regions from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(DashboardError::ApiError(format!(
                "Failed to fetch regions: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let payload: RegionsPayload = serde_json::from_str(&body)
            .map_err(|e| DashboardError::InvalidResponse(format!("Failed to parse regions: {}", e)))?;

        Ok(RegionCatalog::new(payload.regions))
    }

    /// Store a notification addressed to the drafted recipients
    pub async fn add_notification(&self, draft: &NotificationDraft) -> Result<(), DashboardError> {
        let url = self.endpoint("add_notification");

        let mut form = vec![
            ("name", draft.name.clone()),
            ("title", draft.title.clone()),
            ("content", draft.content.clone()),
            ("users", serde_json::to_string(&draft.users)?),
        ];
        if let Some(settings) = &draft.app_notification_settings {
            form.push(("appNotificationSettings", serde_json::to_string(settings)?));
        }

        let response = self.client.post(&url).form(&form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to add notification {:?}: {} - {}", draft.name, status, body);
            return Err(DashboardError::ApiError(format!(
                "Failed to add notification: {}",
                status
            )));
        }

        tracing::debug!("Stored notification {:?} for {} users", draft.name, draft.users.len());

        Ok(())
    }
}
