use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::criteria::AudienceCriteria;

/// Request to preview the audience a set of criteria selects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub criteria: AudienceCriteria,
    #[serde(alias = "sample_size", rename = "sampleSize", default)]
    pub sample_size: Option<usize>,
}

/// Request to send a notification to the audience selected by `criteria`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendNotificationRequest {
    #[validate(length(min = 1, message = "Name of notification is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Title of notification is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[serde(default)]
    pub criteria: AudienceCriteria,
    /// In-app popup presentation, forwarded to the backend untouched
    #[serde(alias = "app_notification_settings", rename = "appNotificationSettings", default)]
    pub app_notification_settings: Option<serde_json::Value>,
}
