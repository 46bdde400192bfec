use serde::{Deserialize, Serialize};

use crate::models::domain::Region;

/// One matched user as shown in the preview list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudienceMember {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
}

/// Response for the audience preview endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudiencePreviewResponse {
    pub count: usize,
    #[serde(rename = "rosterSize")]
    pub roster_size: usize,
    pub sample: Vec<AudienceMember>,
}

/// Response for the notification send endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendNotificationResponse {
    pub success: bool,
    pub recipients: usize,
    #[serde(rename = "dispatchId")]
    pub dispatch_id: String,
}

/// Region catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionsResponse {
    /// Region labels in catalog order
    pub names: Vec<String>,
    pub regions: Vec<Region>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
